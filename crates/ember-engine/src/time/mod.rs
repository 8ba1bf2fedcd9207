//! Frame timing.
//!
//! One [`FrameClock`] drives the loop; call `tick()` once per presented frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
