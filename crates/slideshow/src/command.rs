//! Logical commands and the button-to-command mapping.

use core::fmt;

use platform::Button;

/// What a button press asks the scheduler to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Show the next picture.
    Advance,
    /// Show the previous picture.
    Retreat,
    /// Forget the history, keeping what is on screen.
    ResetHistory,
    /// Stop or restart the automatic advance.
    TogglePause,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Advance => "advance",
            Self::Retreat => "retreat",
            Self::ResetHistory => "reset-history",
            Self::TogglePause => "toggle-pause",
        };
        f.write_str(name)
    }
}

/// Result of applying a command to the scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A display update was in flight; nothing changed.
    IgnoredBusy,
    /// The selection changed and a new frame is pending.
    Navigated,
    /// History truncated to the current entry; the screen is unchanged.
    HistoryReset,
    /// The automatic advance is now paused.
    Paused,
    /// The automatic advance restarted with a fresh interval.
    Resumed,
}

impl CommandOutcome {
    /// `true` when the scheduler should be woken to act on the change.
    pub fn wakes_scheduler(self) -> bool {
        matches!(self, Self::Navigated | Self::Resumed | Self::Paused)
    }
}

/// Button → command table.
///
/// A plain value so the wiring can be swapped without touching the
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMap {
    a: Command,
    b: Command,
    c: Command,
    d: Command,
}

impl ButtonMap {
    /// Build a custom mapping, top button first.
    pub fn new(a: Command, b: Command, c: Command, d: Command) -> Self {
        Self { a, b, c, d }
    }

    /// Command bound to `button`.
    pub fn command(&self, button: Button) -> Command {
        match button {
            Button::A => self.a,
            Button::B => self.b,
            Button::C => self.c,
            Button::D => self.d,
        }
    }
}

impl Default for ButtonMap {
    /// A advance, B retreat, C reset history, D toggle pause.
    fn default() -> Self {
        Self::new(
            Command::Advance,
            Command::Retreat,
            Command::ResetHistory,
            Command::TogglePause,
        )
    }
}
