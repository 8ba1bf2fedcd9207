use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{Axis, InputEvent, Key, KeyState, MouseButton};

/// Held keys, held buttons and pointer position for the window.
///
/// Transitions are written into the [`InputFrame`] passed to `apply_event`.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are not delivered after focus loss.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((x, y)),
            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state } => {
                record(&mut self.keys_down, &mut frame.keys_pressed, &mut frame.keys_released, key, state)
            }

            InputEvent::Button { button, state } => record(
                &mut self.buttons_down,
                &mut frame.buttons_pressed,
                &mut frame.buttons_released,
                button,
                state,
            ),

            InputEvent::Wheel { x, y } => {
                frame.wheel.0 += x;
                frame.wheel.1 += y;
            }
        }

        frame.events.push(ev);
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    #[inline]
    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Digital axis value in `{-1, 0, 1}`; opposite keys cancel out.
    pub fn axis(&self, axis: Axis) -> f32 {
        let (positive, negative) = axis.keys();
        let pos = positive.iter().any(|k| self.key_down(*k));
        let neg = negative.iter().any(|k| self.key_down(*k));
        match (pos, neg) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Updates the held set and records an edge only on a real transition.
fn record<T: Copy + Eq + std::hash::Hash>(
    held: &mut HashSet<T>,
    pressed: &mut HashSet<T>,
    released: &mut HashSet<T>,
    item: T,
    state: KeyState,
) {
    match state {
        KeyState::Pressed => {
            if held.insert(item) {
                pressed.insert(item);
            }
        }
        KeyState::Released => {
            if held.remove(&item) {
                released.insert(item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state }
    }

    #[test]
    fn press_and_release_are_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        assert!(state.key_down(Key::Space));
        assert!(frame.key_pressed(Key::Space));
        assert_eq!(frame.events.len(), 2);

        frame.clear();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Released));
        assert!(!state.key_down(Key::Space));
        assert!(frame.key_released(Key::Space));
        assert!(!frame.key_pressed(Key::Space));
    }

    #[test]
    fn buttons_track_held_and_pressed() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let press = InputEvent::Button { button: MouseButton::Left, state: KeyState::Pressed };

        state.apply_event(&mut frame, press);
        assert!(state.button_down(MouseButton::Left));
        assert!(frame.button_pressed(MouseButton::Left));
    }

    #[test]
    fn wheel_accumulates_until_cleared() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Wheel { x: 0.0, y: 1.0 });
        state.apply_event(&mut frame, InputEvent::Wheel { x: 0.5, y: 2.0 });
        assert_eq!(frame.wheel, (0.5, 3.0));

        frame.clear();
        assert_eq!(frame.wheel, (0.0, 0.0));
    }

    #[test]
    fn axis_reads_wasd_and_arrows() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        assert_eq!(state.axis(Axis::Horizontal), 0.0);

        state.apply_event(&mut frame, key(Key::ArrowRight, KeyState::Pressed));
        assert_eq!(state.axis(Axis::Horizontal), 1.0);

        state.apply_event(&mut frame, key(Key::A, KeyState::Pressed));
        assert_eq!(state.axis(Axis::Horizontal), 0.0);

        state.apply_event(&mut frame, key(Key::S, KeyState::Pressed));
        assert_eq!(state.axis(Axis::Vertical), -1.0);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::W, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
        assert_eq!(state.axis(Axis::Vertical), 0.0);
    }

    #[test]
    fn pointer_tracks_moves_and_leave() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved { x: 4.0, y: 2.0 });
        assert_eq!(state.pointer_pos, Some((4.0, 2.0)));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }
}
