use std::collections::HashMap;
use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::math::Mat4;

use super::{
    BlendMode, DrawCall, MeshLibrary, MeshRange, RenderCtx, RenderTarget, ShaderError,
    SpriteBatch, SpriteProgram, SpriteUniforms, SpriteVertex, Topology,
};

type PipelineKey = (Topology, BlendMode);

const PIPELINE_KEYS: [PipelineKey; 4] = [
    (Topology::Strip, BlendMode::Opaque),
    (Topology::Strip, BlendMode::Alpha),
    (Topology::List, BlendMode::Opaque),
    (Topology::List, BlendMode::Alpha),
];

const MAT4_SIZE: u64 = std::mem::size_of::<Mat4>() as u64;
const COLOR_SIZE: u64 = std::mem::size_of::<[f32; 4]>() as u64;

/// GPU side of sprite rendering.
///
/// Owns the validated program, one pipeline per (topology, blend) pair, the
/// shared mesh vertex buffer and a uniform buffer split into three regions
/// (model, projection, color). Draw `i` reads slot `i` of every region through
/// dynamic offsets, so a whole batch is one render pass.
pub struct SpriteResources {
    program: SpriteProgram,
    shader: wgpu::ShaderModule,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,

    uniform_stride: u64,
    uniform_capacity: usize,
    uniform_buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,

    vertex_buffer: Option<wgpu::Buffer>,
    vertex_revision: Option<u64>,

    warned_missing_mesh: bool,
}

impl SpriteResources {
    /// Validates the built-in program and creates the GPU objects.
    pub fn new(ctx: &RenderCtx<'_>, meshes: &MeshLibrary) -> Result<Self, ShaderError> {
        Self::with_program(ctx, SpriteProgram::builtin()?, meshes)
    }

    pub fn with_program(
        ctx: &RenderCtx<'_>,
        program: SpriteProgram,
        meshes: &MeshLibrary,
    ) -> Result<Self, ShaderError> {
        log::info!("creating sprite GPU resources");

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ember sprite shader"),
            source: wgpu::ShaderSource::Wgsl(program.source().to_owned().into()),
        });

        let entries = layout_entries(program.uniforms());
        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("ember sprite bgl"),
                entries: &entries,
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("ember sprite pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let alignment = u64::from(ctx.device.limits().min_uniform_buffer_offset_alignment);

        let mut resources = Self {
            program,
            shader,
            pipeline_format: None,
            pipelines: HashMap::new(),
            bind_group_layout,
            pipeline_layout,
            uniform_stride: alignment.max(MAT4_SIZE),
            uniform_capacity: 0,
            uniform_buffer: None,
            bind_group: None,
            vertex_buffer: None,
            vertex_revision: None,
            warned_missing_mesh: false,
        };
        resources.ensure_pipelines(ctx);
        resources.ensure_vertices(ctx, meshes);

        log::info!(
            "sprite GPU resources ready ({} mesh vertices, uniform stride {})",
            meshes.vertices().len(),
            resources.uniform_stride
        );
        Ok(resources)
    }

    /// Draws every recorded call into `target`, in submission order.
    ///
    /// Calls whose custom mesh is not registered are skipped.
    pub fn flush(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        batch: &SpriteBatch,
        meshes: &MeshLibrary,
    ) {
        let calls = batch.calls();
        let draws = plan_draws(calls, meshes);
        if draws.len() != calls.len() && !self.warned_missing_mesh {
            log::debug!(
                "SpriteResources: {} draw(s) reference unregistered meshes; skipped",
                calls.len() - draws.len()
            );
            self.warned_missing_mesh = true;
        }
        if draws.is_empty() {
            return;
        }

        // Mutating methods must happen before borrowing pipelines/buffers immutably.
        self.ensure_pipelines(ctx);
        self.ensure_vertices(ctx, meshes);
        self.ensure_uniform_capacity(ctx, draws.len());
        self.write_uniforms(ctx, calls, &draws);

        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vertex_buffer) = self.vertex_buffer.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ember sprite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_vertex_buffer(0, vertex_buffer.slice(..));

        let mut bound: Option<PipelineKey> = None;
        for (slot, draw) in draws.iter().enumerate() {
            if bound != Some(draw.key) {
                let Some(pipeline) = self.pipelines.get(&draw.key) else { continue };
                rpass.set_pipeline(pipeline);
                bound = Some(draw.key);
            }

            let offset = (slot as u64 * self.uniform_stride) as u32;
            rpass.set_bind_group(0, bind_group, &[offset; 3]);

            let first = draw.range.first;
            rpass.draw(first..first + draw.range.count, 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && !self.pipelines.is_empty() {
            return;
        }

        self.pipelines.clear();
        for key in PIPELINE_KEYS {
            let pipeline = self.create_pipeline(ctx, key);
            self.pipelines.insert(key, pipeline);
        }
        self.pipeline_format = Some(ctx.surface_format);
        log::debug!("sprite pipelines built for {:?}", ctx.surface_format);
    }

    fn create_pipeline(&self, ctx: &RenderCtx<'_>, (topology, blend): PipelineKey) -> wgpu::RenderPipeline {
        let blend = match blend {
            BlendMode::Opaque => None,
            BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
        };

        ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ember sprite pipeline"),
            layout: Some(&self.pipeline_layout),

            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some(super::shader::VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[SpriteVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some(super::shader::FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: topology.to_wgpu(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn ensure_vertices(&mut self, ctx: &RenderCtx<'_>, meshes: &MeshLibrary) {
        if self.vertex_revision == Some(meshes.revision()) && self.vertex_buffer.is_some() {
            return;
        }

        self.vertex_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ember sprite vbo"),
            contents: bytemuck::cast_slice(meshes.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.vertex_revision = Some(meshes.revision());
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.uniform_capacity && self.bind_group.is_some() {
            return;
        }

        let capacity = required.next_power_of_two().max(64);
        let regions = region_offsets(capacity, self.uniform_stride);
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ember sprite ubo"),
            size: regions[2] + capacity as u64 * self.uniform_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let u = self.program.uniforms();
        let slot = |binding: u32, offset: u64, size: u64| wgpu::BindGroupEntry {
            binding,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset,
                size: NonZeroU64::new(size),
            }),
        };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ember sprite bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                slot(u.model.binding, regions[0], MAT4_SIZE),
                slot(u.projection.binding, regions[1], MAT4_SIZE),
                slot(u.sprite_color.binding, regions[2], COLOR_SIZE),
            ],
        });

        self.uniform_buffer = Some(buffer);
        self.bind_group = Some(bind_group);
        self.uniform_capacity = capacity;
    }

    fn write_uniforms(&self, ctx: &RenderCtx<'_>, calls: &[DrawCall], draws: &[PlannedDraw]) {
        let Some(buffer) = self.uniform_buffer.as_ref() else { return };

        let stride = self.uniform_stride as usize;
        let regions = region_offsets(self.uniform_capacity, self.uniform_stride);
        let mut model = vec![0u8; draws.len() * stride];
        let mut projection = vec![0u8; draws.len() * stride];
        let mut color = vec![0u8; draws.len() * stride];

        for (slot, draw) in draws.iter().enumerate() {
            let call = &calls[draw.call];
            let at = slot * stride;
            model[at..at + MAT4_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&call.model));
            projection[at..at + MAT4_SIZE as usize]
                .copy_from_slice(bytemuck::bytes_of(&call.projection));
            color[at..at + COLOR_SIZE as usize]
                .copy_from_slice(bytemuck::cast_slice(&call.color.to_array()));
        }

        ctx.queue.write_buffer(buffer, regions[0], &model);
        ctx.queue.write_buffer(buffer, regions[1], &projection);
        ctx.queue.write_buffer(buffer, regions[2], &color);
    }
}

fn layout_entries(u: SpriteUniforms) -> [wgpu::BindGroupLayoutEntry; 3] {
    let entry = |binding: u32, size: u64, visibility: wgpu::ShaderStages| wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: true,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    };

    [
        entry(u.model.binding, MAT4_SIZE, wgpu::ShaderStages::VERTEX),
        entry(u.projection.binding, MAT4_SIZE, wgpu::ShaderStages::VERTEX),
        entry(u.sprite_color.binding, COLOR_SIZE, wgpu::ShaderStages::FRAGMENT),
    ]
}

/// Byte offsets of the model, projection and color regions.
fn region_offsets(capacity: usize, stride: u64) -> [u64; 3] {
    let region = capacity as u64 * stride;
    [0, region, region * 2]
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct PlannedDraw {
    /// Index into the batch's calls.
    call: usize,
    range: MeshRange,
    key: PipelineKey,
}

fn plan_draws(calls: &[DrawCall], meshes: &MeshLibrary) -> Vec<PlannedDraw> {
    calls
        .iter()
        .enumerate()
        .filter_map(|(call, c)| {
            let range = meshes.resolve(c.sprite)?;
            Some(PlannedDraw {
                call,
                range,
                key: (range.topology, c.blend),
            })
        })
        .collect()
}
