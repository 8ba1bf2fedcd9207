//! Math kernel shared by the scene graph, renderer and particle system.
//!
//! World space conventions:
//! - +X right, +Y up
//! - angles are degrees unless a function name says otherwise
//! - matrices are column-major and act on column vectors (`M * v`)

mod color;
pub mod mathf;
mod mat4;
mod quat;
mod vec2;
mod vec3;

pub use color::{Color32, ParseColorError};
pub use mat4::Mat4;
pub use quat::Quat;
pub use vec2::Vec2;
pub use vec3::Vec3;
