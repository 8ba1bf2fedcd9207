use crate::math::{Color32, Vec2};
use crate::render::Sprite;
use crate::scene::{Component, UpdateCtx};

/// Draws one sprite at the owning object's transform every frame.
///
/// A renderer without a sprite (unknown name) draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteRenderer {
    pub sprite: Option<Sprite>,
    pub color: Color32,
    /// Overrides the transform's scale when set.
    pub custom_size: Option<Vec2>,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self::new(Sprite::Rectangle)
    }
}

impl SpriteRenderer {
    pub fn new(sprite: Sprite) -> Self {
        Self {
            sprite: Some(sprite),
            color: Color32::WHITE,
            custom_size: None,
        }
    }

    /// Resolves `name` once; an unknown name logs a warning and disables drawing.
    pub fn named(name: &str) -> Self {
        let sprite = Sprite::from_name(name);
        if sprite.is_none() {
            log::warn!("no sprite named {name:?}; renderer will draw nothing");
        }
        Self {
            sprite,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.custom_size = Some(size);
        self
    }
}

impl Component for SpriteRenderer {
    fn update(&mut self, ctx: &mut UpdateCtx<'_, '_>) -> anyhow::Result<()> {
        let Some(sprite) = self.sprite else {
            return Ok(());
        };

        let t = *ctx.transform;
        let scale = self.custom_size.unwrap_or(t.scale);
        ctx.batch().draw(sprite, t.position, t.rotation, scale, self.color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::input::{InputFrame, InputState};
    use crate::math::Mat4;
    use crate::render::{sprite_model_matrix, SpriteBatch};
    use crate::scene::{FrameState, GameObject, Transform};

    fn render(object: &mut GameObject) -> SpriteBatch {
        let input = InputState::default();
        let input_frame = InputFrame::default();
        let camera = Camera::new(800.0, 600.0);
        let mut batch = SpriteBatch::new();
        let mut frame = FrameState {
            dt: 0.016,
            input: &input,
            input_frame: &input_frame,
            camera: &camera,
            batch: &mut batch,
        };
        object.update_components(&mut frame);
        batch
    }

    #[test]
    fn draws_at_transform() {
        let transform = Transform::new(Vec2::new(1.0, 2.0), 45.0, Vec2::new(0.2, 0.2));
        let mut obj = GameObject::with_transform("player", transform);
        obj.add_component(SpriteRenderer::new(Sprite::Triangle).with_color(Color32::RED));

        let batch = render(&mut obj);
        let call = batch.calls()[0];
        assert_eq!(call.sprite, Sprite::Triangle);
        assert_eq!(call.color, Color32::RED);
        assert_eq!(call.model, sprite_model_matrix(transform.position, 45.0, transform.scale));
    }

    #[test]
    fn custom_size_overrides_scale() {
        let mut obj = GameObject::new("wall");
        obj.add_component(SpriteRenderer::default().with_size(Vec2::new(3.0, 1.0)));

        let batch = render(&mut obj);
        assert_eq!(batch.calls()[0].model, Mat4::from_scale(Vec2::new(3.0, 1.0)));
    }

    #[test]
    fn unknown_name_draws_nothing() {
        let mut obj = GameObject::new("ghost");
        obj.add_component(SpriteRenderer::named("hexagon"));
        assert!(render(&mut obj).is_empty());
        assert_eq!(SpriteRenderer::named("triangle").sprite, Some(Sprite::Triangle));
    }
}
