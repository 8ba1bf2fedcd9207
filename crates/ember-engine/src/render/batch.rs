use crate::math::{Color32, Mat4, Vec2};

use super::Sprite;

/// Half-extent of the default sprite view volume in world units.
pub const SPRITE_VIEW_EXTENT: f32 = 10.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Color overwrites the target.
    Opaque,
    /// Straight-alpha "over" blending.
    Alpha,
}

/// One recorded sprite draw with its fully resolved uniforms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCall {
    pub sprite: Sprite,
    pub model: Mat4,
    pub projection: Mat4,
    pub color: Color32,
    pub blend: BlendMode,
}

/// Fixed projection used when no camera drives the view: `[-10, 10]` on both axes.
pub fn sprite_projection() -> Mat4 {
    let e = SPRITE_VIEW_EXTENT;
    Mat4::orthographic(-e, e, -e, e, -1.0, 1.0)
}

/// Model matrix for a sprite: scale, then rotate (degrees, CCW), then translate.
///
/// Scale and rotation act in the sprite's local frame; translation is in world space.
pub fn sprite_model_matrix(position: Vec2, rotation: f32, scale: Vec2) -> Mat4 {
    Mat4::from_scale(scale)
        .then(Mat4::from_rotation_z(rotation))
        .then(Mat4::from_translation(position))
}

/// Per-frame list of sprite draws, recorded in submission order.
///
/// Projection and blend mode are sticky state captured into each call, so a
/// component can bracket its draws with `enable_blending`/`disable_blending`
/// without touching anyone else's.
#[derive(Debug)]
pub struct SpriteBatch {
    calls: Vec<DrawCall>,
    projection: Mat4,
    blend: BlendMode,
}

impl Default for SpriteBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            projection: sprite_projection(),
            blend: BlendMode::Opaque,
        }
    }

    /// Drops last frame's calls and resets projection and blending.
    pub fn begin_frame(&mut self) {
        self.calls.clear();
        self.projection = sprite_projection();
        self.blend = BlendMode::Opaque;
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    #[inline]
    pub fn enable_blending(&mut self) {
        self.blend = BlendMode::Alpha;
    }

    #[inline]
    pub fn disable_blending(&mut self) {
        self.blend = BlendMode::Opaque;
    }

    #[inline]
    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    pub fn draw(&mut self, sprite: Sprite, position: Vec2, rotation: f32, scale: Vec2, color: Color32) {
        self.calls.push(DrawCall {
            sprite,
            model: sprite_model_matrix(position, rotation, scale),
            projection: self.projection,
            color,
            blend: self.blend,
        });
    }

    #[inline]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}
