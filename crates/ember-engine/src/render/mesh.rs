use bytemuck::{Pod, Zeroable};

use crate::math::Vec2;

use super::MeshError;

/// Sprite vertex: object-space position on the unit sprite.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub pos: [f32; 2],
}

impl SpriteVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(x: f32, y: f32) -> SpriteVertex {
    SpriteVertex { pos: [x, y] }
}

/// Unit rectangle as a strip: bottom-left, bottom-right, top-left, top-right.
pub const RECTANGLE_VERTICES: [SpriteVertex; 4] =
    [v(-0.5, -0.5), v(0.5, -0.5), v(-0.5, 0.5), v(0.5, 0.5)];

/// Unit triangle pointing up.
pub const TRIANGLE_VERTICES: [SpriteVertex; 3] = [v(-0.5, -0.5), v(0.5, -0.5), v(0.0, 0.5)];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Topology {
    Strip,
    List,
}

impl Topology {
    pub(crate) fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::Strip => wgpu::PrimitiveTopology::TriangleStrip,
            Topology::List => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// Handle to a mesh registered in a [`MeshLibrary`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MeshHandle(u32);

/// Shape drawn by a sprite renderer or a particle system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sprite {
    Rectangle,
    Triangle,
    Custom(MeshHandle),
}

impl Sprite {
    /// Looks up a built-in shape by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" | "square" => Some(Sprite::Rectangle),
            "triangle" => Some(Sprite::Triangle),
            _ => None,
        }
    }
}

/// Contiguous run of vertices in the shared vertex buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MeshRange {
    pub first: u32,
    pub count: u32,
    pub topology: Topology,
}

/// CPU-side store of every sprite mesh, laid out as one vertex buffer.
///
/// The two built-in shapes always occupy the front of the buffer. `revision`
/// bumps on every registration so the GPU copy knows when to re-upload.
#[derive(Debug, Clone)]
pub struct MeshLibrary {
    vertices: Vec<SpriteVertex>,
    custom: Vec<MeshRange>,
    revision: u64,
}

impl Default for MeshLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshLibrary {
    const RECTANGLE: MeshRange = MeshRange {
        first: 0,
        count: RECTANGLE_VERTICES.len() as u32,
        topology: Topology::Strip,
    };
    const TRIANGLE: MeshRange = MeshRange {
        first: RECTANGLE_VERTICES.len() as u32,
        count: TRIANGLE_VERTICES.len() as u32,
        topology: Topology::List,
    };

    pub fn new() -> Self {
        let mut vertices = Vec::with_capacity(RECTANGLE_VERTICES.len() + TRIANGLE_VERTICES.len());
        vertices.extend_from_slice(&RECTANGLE_VERTICES);
        vertices.extend_from_slice(&TRIANGLE_VERTICES);
        Self {
            vertices,
            custom: Vec::new(),
            revision: 0,
        }
    }

    /// Registers a custom mesh given as a triangle list in object space.
    pub fn register(&mut self, triangles: &[Vec2]) -> Result<MeshHandle, MeshError> {
        if triangles.is_empty() || triangles.len() % 3 != 0 {
            return Err(MeshError::NotTriangles(triangles.len()));
        }
        if !triangles.iter().all(|p| p.is_finite()) {
            return Err(MeshError::NonFinite);
        }

        let range = MeshRange {
            first: self.vertices.len() as u32,
            count: triangles.len() as u32,
            topology: Topology::List,
        };
        self.vertices.extend(triangles.iter().map(|p| v(p.x, p.y)));

        let handle = MeshHandle(self.custom.len() as u32);
        self.custom.push(range);
        self.revision += 1;
        Ok(handle)
    }

    pub fn resolve(&self, sprite: Sprite) -> Option<MeshRange> {
        match sprite {
            Sprite::Rectangle => Some(Self::RECTANGLE),
            Sprite::Triangle => Some(Self::TRIANGLE),
            Sprite::Custom(MeshHandle(i)) => self.custom.get(i as usize).copied(),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[SpriteVertex] {
        &self.vertices
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
