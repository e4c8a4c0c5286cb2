//! Scheduler state and its lock domain.
//!
//! Every field a command or a scheduler cycle touches lives in
//! [`SchedulerState`], and the only way to reach it is through the
//! `tokio::sync::Mutex` inside [`Shared`]. Holders never perform I/O.

use core::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, Notify};
use tokio::time::{Duration, Instant};

use crate::command::{Command, CommandOutcome};
use crate::engine::HistoryEngine;
use crate::history::History;
use crate::selection::Picker;
use crate::timer::SlideTimer;

/// Current selection, pending flag, timer and busy flag.
#[derive(Debug)]
pub struct SchedulerState<T, P> {
    engine: HistoryEngine<T, P>,
    current: T,
    pending_update: bool,
    timer: SlideTimer,
    display_busy: bool,
}

impl<T, P> SchedulerState<T, P>
where
    T: Clone + PartialEq + fmt::Display,
    P: Picker,
{
    /// Make the initial selection and queue it for display.
    ///
    /// The history becomes `[first]` with the cursor on it and the timer
    /// starts at `now`.
    pub fn start(mut engine: HistoryEngine<T, P>, interval: Duration, now: Instant) -> Self {
        let current = engine.advance();
        tracing::info!(item = %current, "initial selection");
        Self {
            engine,
            current,
            pending_update: true,
            timer: SlideTimer::new(interval, now),
            display_busy: false,
        }
    }

    /// Apply a button command.
    ///
    /// While a display update is in flight every command is ignored; nothing
    /// is queued for later.
    pub fn apply(&mut self, command: Command, now: Instant) -> CommandOutcome {
        if self.display_busy {
            tracing::info!(%command, "display busy, ignoring command");
            return CommandOutcome::IgnoredBusy;
        }
        match command {
            Command::Advance => {
                self.current = self.engine.advance();
                self.navigated(now)
            }
            Command::Retreat => {
                self.current = self.engine.retreat();
                self.navigated(now)
            }
            Command::ResetHistory => {
                self.engine.reset(self.current.clone());
                tracing::info!(item = %self.current, "history reset");
                CommandOutcome::HistoryReset
            }
            Command::TogglePause => {
                if self.timer.is_paused() {
                    self.timer.resume(now);
                    self.timer.reset(now);
                    tracing::info!("slideshow resumed");
                    CommandOutcome::Resumed
                } else {
                    self.timer.pause(now);
                    tracing::info!("slideshow paused");
                    CommandOutcome::Paused
                }
            }
        }
    }

    fn navigated(&mut self, now: Instant) -> CommandOutcome {
        self.pending_update = true;
        self.timer.reset(now);
        tracing::info!(
            item = %self.current,
            cursor = ?self.engine.history().cursor(),
            history_len = self.engine.history().len(),
            "selection changed"
        );
        CommandOutcome::Navigated
    }

    /// Advance automatically when the timer has run out.
    ///
    /// Not gated by `display_busy`: the timer keeps the slideshow moving
    /// even while a retry is pending. Returns `true` when it fired.
    pub fn auto_advance(&mut self, now: Instant) -> bool {
        if !self.timer.expired(now) {
            return false;
        }
        self.current = self.engine.advance();
        self.pending_update = true;
        self.timer.reset(now);
        tracing::info!(item = %self.current, "timer expired, advancing");
        true
    }

    /// Mark the display busy and hand out the content to show, when an
    /// update is pending.
    pub fn begin_update(&mut self) -> Option<T> {
        if !self.pending_update {
            return None;
        }
        self.display_busy = true;
        Some(self.current.clone())
    }

    /// The gateway committed the frame.
    pub fn finish_update(&mut self, now: Instant) {
        self.pending_update = false;
        self.display_busy = false;
        self.timer.reset(now);
    }

    /// Content on screen or queued for it.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// A new frame must be pushed to the gateway.
    pub fn is_pending(&self) -> bool {
        self.pending_update
    }

    /// A frame is in flight; input is ignored.
    pub fn is_busy(&self) -> bool {
        self.display_busy
    }

    /// Automatic advance is paused.
    pub fn is_paused(&self) -> bool {
        self.timer.is_paused()
    }

    /// Navigation history.
    pub fn history(&self) -> &History<T> {
        self.engine.history()
    }

    /// The automatic advance timer.
    pub fn timer(&self) -> &SlideTimer {
        &self.timer
    }

    /// Next automatic advance, `None` while paused.
    pub fn deadline(&self, now: Instant) -> Option<Instant> {
        self.timer.deadline(now)
    }
}

/// The lock domain shared by the scheduler and the input controller, plus
/// the wake-up signal for an idle scheduler.
#[derive(Debug)]
pub struct Shared<T, P> {
    state: Mutex<SchedulerState<T, P>>,
    wake: Notify,
}

impl<T, P> Shared<T, P> {
    /// Wrap `state` for sharing between tasks.
    pub fn new(state: SchedulerState<T, P>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            wake: Notify::new(),
        })
    }

    /// Enter the critical section.
    pub async fn lock(&self) -> MutexGuard<'_, SchedulerState<T, P>> {
        self.state.lock().await
    }

    /// Wake an idle scheduler. A wake sent while the scheduler is busy is
    /// kept until it next goes idle.
    pub fn wake(&self) {
        self.wake.notify_one();
    }

    pub(crate) async fn woken(&self) {
        self.wake.notified().await;
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::selection::ScriptedPicker;

    const INTERVAL: Duration = Duration::from_secs(180);

    fn state(script: &[usize]) -> SchedulerState<char, ScriptedPicker> {
        let engine = HistoryEngine::new(
            vec!['A', 'B', 'C'],
            10,
            ScriptedPicker::new(script.iter().copied()),
        )
        .expect("engine");
        SchedulerState::start(engine, INTERVAL, Instant::now())
    }

    #[test]
    fn test_start_queues_first_selection() {
        let s = state(&[0]);
        assert_eq!(*s.current(), 'A');
        assert!(s.is_pending());
        assert!(!s.is_busy());
        assert_eq!(s.history().cursor(), Some(0));
    }

    #[test]
    fn test_advance_marks_pending_and_resets_timer() {
        let mut s = state(&[0, 1]);
        s.finish_update(Instant::now());
        let later = Instant::now() + Duration::from_secs(100);
        assert_eq!(s.apply(Command::Advance, later), CommandOutcome::Navigated);
        assert_eq!(*s.current(), 'B');
        assert!(s.is_pending());
        assert_eq!(s.timer().remaining(later), INTERVAL);
    }

    #[test]
    fn test_busy_ignores_every_command() {
        let mut s = state(&[0]);
        assert_eq!(s.begin_update(), Some('A'));
        let now = Instant::now();
        for cmd in [
            Command::Advance,
            Command::Retreat,
            Command::ResetHistory,
            Command::TogglePause,
        ] {
            assert_eq!(s.apply(cmd, now), CommandOutcome::IgnoredBusy);
        }
        assert_eq!(*s.current(), 'A');
        assert_eq!(s.history().len(), 1);
        assert!(!s.is_paused());
        assert!(s.is_pending());
    }

    #[test]
    fn test_reset_history_does_not_mark_pending() {
        let mut s = state(&[0, 1, 2]);
        let now = Instant::now();
        s.finish_update(now);
        s.apply(Command::Advance, now);
        s.finish_update(now);
        s.apply(Command::Advance, now);
        s.finish_update(now);
        assert_eq!(s.apply(Command::ResetHistory, now), CommandOutcome::HistoryReset);
        assert!(!s.is_pending());
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history().get(0), Some(s.current()));
    }

    #[test]
    fn test_toggle_pause_resume_resets_timer() {
        let mut s = state(&[0]);
        let t0 = Instant::now();
        s.finish_update(t0);
        assert_eq!(s.apply(Command::TogglePause, t0 + Duration::from_secs(170)), CommandOutcome::Paused);
        assert!(s.is_paused());
        let t1 = t0 + Duration::from_secs(500);
        assert_eq!(s.apply(Command::TogglePause, t1), CommandOutcome::Resumed);
        assert_eq!(s.timer().remaining(t1), INTERVAL);
    }

    #[test]
    fn test_auto_advance_only_after_interval() {
        let mut s = state(&[0, 1]);
        let t0 = Instant::now();
        s.finish_update(t0);
        assert!(!s.auto_advance(t0 + Duration::from_secs(179)));
        assert!(s.auto_advance(t0 + INTERVAL));
        assert_eq!(*s.current(), 'B');
        assert!(s.is_pending());
    }

    #[test]
    fn test_auto_advance_ignores_busy() {
        let mut s = state(&[0, 1]);
        let t0 = Instant::now();
        assert!(s.begin_update().is_some());
        assert!(s.auto_advance(t0 + INTERVAL + Duration::from_secs(1)));
        assert!(s.is_busy());
        assert_eq!(*s.current(), 'B');
    }
}
