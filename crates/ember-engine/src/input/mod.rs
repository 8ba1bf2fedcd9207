//! Input subsystem.
//!
//! Public types do not expose winit. The runtime converts window events with
//! [`translate_window_event`] and feeds them to [`InputState::apply_event`].

mod frame;
mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use platform::translate_window_event;
pub use state::InputState;
pub use types::{Axis, InputEvent, Key, KeyState, MouseButton};
