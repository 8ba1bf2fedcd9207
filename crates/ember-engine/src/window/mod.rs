//! Window + runtime loop.
//!
//! Owns the winit event loop and the single engine window, and wires them to
//! the GPU layer and the [`App`](crate::core::App).

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
