//! GPU sprite rendering.
//!
//! Components record draws into a [`SpriteBatch`] during the frame; the engine
//! hands the batch to [`SpriteResources::flush`] once per frame.
//!
//! Convention:
//! - world space is Y-up, angles are degrees counter-clockwise
//! - sprite meshes are unit-sized and centered on the origin

mod batch;
mod ctx;
mod error;
mod mesh;
mod resources;
pub mod shader;

pub use batch::{sprite_model_matrix, sprite_projection, BlendMode, DrawCall, SpriteBatch, SPRITE_VIEW_EXTENT};
pub use ctx::{RenderCtx, RenderTarget, Viewport};
pub use error::{MeshError, ShaderError};
pub use mesh::{MeshHandle, MeshLibrary, MeshRange, Sprite, SpriteVertex, Topology};
pub use resources::SpriteResources;
pub use shader::{SpriteProgram, SpriteUniforms, UniformBinding};
