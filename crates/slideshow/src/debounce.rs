//! Per-button debounce.
//!
//! A press is accepted when the same button has not been accepted within the
//! quiet window. The window is measured from the last *accepted* press, so a
//! burst of bounces shorter than the window collapses into one press. Each
//! button has its own window.

use std::collections::HashMap;

use platform::Button;
use tokio::time::{Duration, Instant};

/// Quiet-window filter over button presses.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_accepted: HashMap<Button, Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: HashMap::new(),
        }
    }

    /// Quiet window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns `true` when the press at `now` should be acted on.
    pub fn accept(&mut self, button: Button, now: Instant) -> bool {
        match self.last_accepted.get(&button) {
            Some(&last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last_accepted.insert(button, now);
                true
            }
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(platform::config::DEBOUNCE_WINDOW)
    }
}
