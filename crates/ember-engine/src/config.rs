use std::time::Duration;

use winit::dpi::LogicalSize;

use crate::device::{present_mode, GpuInit};
use crate::logging::LoggingConfig;
use crate::math::Color32;
use crate::time::FrameClock;
use crate::window::RuntimeConfig;

/// Engine-wide settings; split into runtime and GPU settings at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub title: String,
    /// Logical pixels.
    pub size: (f32, f32),
    pub clear_color: Color32,
    pub vsync: bool,
    /// Frames per second cap; `0` disables it.
    pub fps_limit: u32,
    /// Frame deltas above this become zero.
    pub max_frame_delta: Duration,
    pub warn_on_frame_overhead: bool,
    /// Render through the camera's projection instead of the fixed `±10` view.
    pub camera_projection: bool,
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "ember".to_string(),
            size: (800.0, 600.0),
            clear_color: Color32::BLACK,
            vsync: true,
            fps_limit: 0,
            max_frame_delta: FrameClock::DEFAULT_MAX_DELTA,
            warn_on_frame_overhead: true,
            camera_projection: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.size.0 as f64, self.size.1 as f64),
            fps_limit: self.fps_limit,
            max_frame_delta: self.max_frame_delta,
            warn_on_frame_overhead: self.warn_on_frame_overhead,
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            present_mode: present_mode(self.vsync),
            ..GpuInit::default()
        }
    }
}
