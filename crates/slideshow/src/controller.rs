//! Input controller.
//!
//! Edge sources push button presses onto a bounded channel; the controller
//! drains it, debounces per button, maps buttons to commands and applies
//! them inside the scheduler's critical section.
//!
//! ```text
//! InputDevice ──forward_events──▶ InputSender ══ mpsc(16) ══▶ InputController
//!                                                               │ debounce
//!                                                               │ ButtonMap
//!                                                               ▼
//!                                                   Shared<SchedulerState>
//! ```
//!
//! # Overflow handling
//!
//! [`InputSender::try_send_event`] never waits. If the controller stalls and
//! the channel reaches [`CHANNEL_DEPTH`], presses are dropped rather than
//! blocking the edge source.

use core::fmt;
use std::sync::Arc;

use platform::{InputDevice, InputEvent};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::{Duration, Instant};

use crate::command::{ButtonMap, CommandOutcome};
use crate::debounce::Debouncer;
use crate::selection::Picker;
use crate::state::Shared;

/// Number of presses that may queue before new ones are dropped.
pub const CHANNEL_DEPTH: usize = 16;

/// A press stamped with the time it left the edge source.
#[derive(Debug, Clone, Copy)]
struct StampedEvent {
    event: InputEvent,
    at: Instant,
}

/// Create the input queue.
pub fn input_channel() -> (InputSender, InputReceiver) {
    let (tx, rx) = mpsc::channel(CHANNEL_DEPTH);
    (InputSender { tx }, InputReceiver { rx })
}

/// Producer half held by edge sources.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::Sender<StampedEvent>,
}

impl InputSender {
    /// Queue `event` without waiting.
    ///
    /// Returns `false` when the event was dropped because the queue is full
    /// or the controller is gone.
    pub fn try_send_event(&self, event: InputEvent) -> bool {
        let stamped = StampedEvent {
            event,
            at: Instant::now(),
        };
        match self.tx.try_send(stamped) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(?event, "input queue full, dropping press");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// `true` once the controller has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half owned by the [`InputController`].
#[derive(Debug)]
pub struct InputReceiver {
    rx: mpsc::Receiver<StampedEvent>,
}

/// Pump events from an edge source into the queue until either side stops.
pub async fn forward_events<D: InputDevice>(mut device: D, sender: InputSender) {
    while let Some(event) = device.wait_for_event().await {
        if sender.is_closed() {
            break;
        }
        sender.try_send_event(event);
    }
    tracing::debug!("input forwarding stopped");
}

/// Drains the input queue and applies commands to the scheduler state.
pub struct InputController<T, P> {
    rx: InputReceiver,
    shared: Arc<Shared<T, P>>,
    map: ButtonMap,
    debouncer: Debouncer,
}

impl<T, P> InputController<T, P>
where
    T: Clone + PartialEq + fmt::Display,
    P: Picker,
{
    /// Create a controller over `shared`.
    pub fn new(
        rx: InputReceiver,
        shared: Arc<Shared<T, P>>,
        map: ButtonMap,
        debounce_window: Duration,
    ) -> Self {
        Self {
            rx,
            shared,
            map,
            debouncer: Debouncer::new(debounce_window),
        }
    }

    /// Handle one press made at `at`.
    ///
    /// Returns `None` when the debouncer swallowed it.
    pub async fn handle(&mut self, event: InputEvent, at: Instant) -> Option<CommandOutcome> {
        let InputEvent::ButtonPress(button) = event;
        if !self.debouncer.accept(button, at) {
            tracing::debug!(%button, "debounced");
            return None;
        }
        let command = self.map.command(button);
        let outcome = {
            let mut state = self.shared.lock().await;
            state.apply(command, Instant::now())
        };
        tracing::debug!(%button, %command, ?outcome, "command applied");
        if outcome.wakes_scheduler() {
            self.shared.wake();
        }
        Some(outcome)
    }

    /// Process presses until every sender is dropped.
    pub async fn run(mut self) {
        while let Some(StampedEvent { event, at }) = self.rx.rx.recv().await {
            self.handle(event, at).await;
        }
        tracing::debug!("input queue closed, controller stopping");
    }
}
