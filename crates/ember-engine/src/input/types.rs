/// Keys the engine reads for gameplay, by physical position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Escape,
    Shift,
    /// Any other key; carries the platform key code.
    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Virtual movement axis read from the keyboard.
///
/// `Horizontal`: D / Right arrow is `+1`, A / Left arrow is `-1`.
/// `Vertical`: W / Up arrow is `+1`, S / Down arrow is `-1`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub(crate) fn keys(self) -> ([Key; 2], [Key; 2]) {
        match self {
            Axis::Horizontal => ([Key::D, Key::ArrowRight], [Key::A, Key::ArrowLeft]),
            Axis::Vertical => ([Key::W, Key::ArrowUp], [Key::S, Key::ArrowDown]),
        }
    }
}

/// Window input, already in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: KeyState },
    Button { button: MouseButton, state: KeyState },
    /// Pointer position, top-left origin.
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    /// Wheel movement in notches; touchpad pixel deltas are scaled down to notches.
    Wheel { x: f32, y: f32 },
    Focused(bool),
}
