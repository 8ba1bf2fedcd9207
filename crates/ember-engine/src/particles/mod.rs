//! CPU particle emitter.

mod config;
mod particle;
mod system;

pub use config::{ColorRange, EmitterShape, ParticleSystemConfig, ValueRange};
pub use particle::Particle;
pub use system::{ParticlePhase, ParticleSystem};
