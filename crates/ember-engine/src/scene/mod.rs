//! Scene graph: game objects, components and scenes.
//!
//! Ownership is strictly top-down: a `SceneManager` owns the current `Scene`,
//! a scene owns its `GameObject`s, an object owns its components. Components
//! reach their owner only through the context lent to each lifecycle hook.

mod component;
mod game_object;
#[allow(clippy::module_inception)]
mod scene;
mod transform;

pub use component::{AsAny, Component, FrameState, StartCtx, UpdateCtx};
pub use game_object::{Direction, GameObject};
pub use scene::{Scene, SceneManager};
pub use transform::Transform;
