//! Ember engine crate.
//!
//! A small 2D engine: game objects with components, a wgpu sprite renderer,
//! a CPU particle system, and the winit runtime that drives them.

pub mod camera;
pub mod components;
pub mod config;
pub mod core;
pub mod device;
pub mod engine;
pub mod input;
pub mod logging;
pub mod math;
pub mod particles;
pub mod physics;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;

pub use config::EngineConfig;
pub use engine::Engine;
