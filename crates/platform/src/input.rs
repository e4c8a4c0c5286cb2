//! Input device abstraction

use core::fmt;

/// Input device trait for the frame buttons
pub trait InputDevice {
    /// Wait for next input event.
    ///
    /// Returns `None` once the device is gone (e.g. stdin closed); callers
    /// stop polling at that point.
    fn wait_for_event(&mut self) -> impl core::future::Future<Output = Option<InputEvent>>;
}

/// Input events from the buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Button pressed (falling edge on the active-low line)
    ButtonPress(Button),
}

/// Physical buttons, named top to bottom along the panel edge.
///
/// Names are stable; which GPIO line drives each one is a wiring detail of
/// the edge source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    /// Top button
    A,
    /// Second button
    B,
    /// Third button
    C,
    /// Bottom button
    D,
}

impl Button {
    /// All buttons, top to bottom.
    pub const ALL: [Button; 4] = [Button::A, Button::B, Button::C, Button::D];

    /// Parse a button name (`"a"`..`"d"`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            n if n.eq_ignore_ascii_case("a") => Some(Self::A),
            n if n.eq_ignore_ascii_case("b") => Some(Self::B),
            n if n.eq_ignore_ascii_case("c") => Some(Self::C),
            n if n.eq_ignore_ascii_case("d") => Some(Self::D),
            _ => None,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        f.write_str(name)
    }
}
