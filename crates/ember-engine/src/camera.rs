//! Orthographic 2D camera and screen/world mapping.

use crate::math::{Mat4, Vec2};
use crate::render::SpriteBatch;

/// Orthographic camera over a window of `screen_size` logical pixels.
///
/// The view spans `zoom` world units from the center to the top edge, and
/// `aspect * zoom` to the right edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    screen_size: (f32, f32),
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            screen_size: (width, height),
        }
    }

    pub fn update_screen_size(&mut self, width: f32, height: f32) {
        self.screen_size = (width, height);
    }

    #[inline]
    pub fn screen_size(&self) -> (f32, f32) {
        self.screen_size
    }

    /// Width over height; a zero-height window counts as one pixel tall.
    pub fn aspect(&self) -> f32 {
        let (w, h) = self.screen_size;
        w / h.max(1.0)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let half_w = self.aspect() * self.zoom;
        let half_h = self.zoom;
        Mat4::orthographic(
            -half_w + self.position.x,
            half_w + self.position.x,
            -half_h + self.position.y,
            half_h + self.position.y,
            -1.0,
            1.0,
        )
    }

    /// Makes this camera's projection the batch's active projection.
    pub fn apply_projection(&self, batch: &mut SpriteBatch) {
        batch.set_projection(self.projection_matrix());
    }

    /// Maps a window position (logical px, top-left origin, Y down) to world space.
    pub fn screen_to_world(&self, x: f32, y: f32) -> Vec2 {
        let (w, h) = self.screen_dims();
        let ndc_x = (x / w) * 2.0 - 1.0;
        let ndc_y = 1.0 - (y / h) * 2.0;

        Vec2::new(
            ndc_x * self.aspect() * self.zoom + self.position.x,
            ndc_y * self.zoom + self.position.y,
        )
    }

    pub fn world_to_screen(&self, world: Vec2) -> (f32, f32) {
        let (w, h) = self.screen_dims();
        let ndc_x = (world.x - self.position.x) / (self.aspect() * self.zoom);
        let ndc_y = (world.y - self.position.y) / self.zoom;

        ((ndc_x + 1.0) * 0.5 * w, (1.0 - ndc_y) * 0.5 * h)
    }

    fn screen_dims(&self) -> (f32, f32) {
        (self.screen_size.0.max(1.0), self.screen_size.1.max(1.0))
    }
}
