//! wgpu device and window surface.

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuFrame, GpuInit};
pub use surface::{present_mode, SurfaceErrorAction};
