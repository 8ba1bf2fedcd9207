//! Built-in components.

mod sprite_renderer;

pub use sprite_renderer::SpriteRenderer;
