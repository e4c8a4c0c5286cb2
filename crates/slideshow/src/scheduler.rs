//! Picture scheduler.
//!
//! One cycle combines the automatic advance timer, the pending-update flag
//! and the gateway's backpressure:
//!
//! ```text
//!            timer expired / pending_update
//!   Idle ─────────────────────────────────▶ Rendering
//!    ▲                                          │
//!    │ committed                                ▼
//!    └──────────────────────────────────── AwaitingGateway ──error──▶ (loop ends)
//!                                           │       ▲
//!                                           └───────┘ not_ready: sleep, retry
//! ```
//!
//! The state lock is held only to read and update [`SchedulerState`];
//! rendering, staging and committing run with it released. A `not_ready`
//! retry re-commits the frame already staged and re-renders only when the
//! timer moved the selection on in the meantime.

use core::convert::Infallible;
use core::fmt;
use std::sync::Arc;

use platform::{DisplayGateway, FrameOptions, Renderer};
use tokio::time::{Duration, Instant};

use crate::commit::{self, Commit};
use crate::engine::HistoryEngine;
use crate::error::{ConfigError, SchedulerError};
use crate::selection::Picker;
use crate::state::{SchedulerState, Shared};

/// What one scheduler cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome<T> {
    /// Nothing to show.
    Idle,
    /// `T` is now on the panel.
    Committed(T),
    /// The gateway asked for a pause; the cycle already waited `wait`.
    Retrying {
        /// Content awaiting commit.
        content: T,
        /// Wait the gateway asked for.
        wait: Duration,
    },
}

/// Drives a picture slideshow onto a display gateway.
pub struct PictureScheduler<T, P, R, G> {
    shared: Arc<Shared<T, P>>,
    renderer: R,
    gateway: G,
    options: FrameOptions,
    staged: Option<T>,
}

impl<T, P, R, G> PictureScheduler<T, P, R, G>
where
    T: Clone + PartialEq + fmt::Display,
    P: Picker,
    R: Renderer<T>,
    G: DisplayGateway,
{
    /// Make the initial selection and prepare the loop.
    ///
    /// The first cycle renders immediately; the advance timer starts now.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroInterval`] when `interval` is zero.
    pub fn new(
        engine: HistoryEngine<T, P>,
        interval: Duration,
        renderer: R,
        gateway: G,
        options: FrameOptions,
    ) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval("picture"));
        }
        let state = SchedulerState::start(engine, interval, Instant::now());
        Ok(Self {
            shared: Shared::new(state),
            renderer,
            gateway,
            options,
            staged: None,
        })
    }

    /// Handle for the input controller.
    pub fn shared(&self) -> Arc<Shared<T, P>> {
        Arc::clone(&self.shared)
    }

    /// The display gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run one cycle.
    ///
    /// A `not_ready` answer is waited out before this returns, so calling
    /// `run_cycle` back to back never commits early.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome<T>, SchedulerError> {
        let target = {
            let mut state = self.shared.lock().await;
            state.auto_advance(Instant::now());
            match state.begin_update() {
                Some(target) => target,
                None => return Ok(CycleOutcome::Idle),
            }
        };

        if self.staged.as_ref() != Some(&target) {
            tracing::debug!(item = %target, "rendering");
            commit::stage(&mut self.renderer, &mut self.gateway, &target, self.options).await?;
            self.staged = Some(target.clone());
        }

        match commit::commit(&mut self.gateway).await? {
            Commit::Done => {
                self.staged = None;
                self.shared.lock().await.finish_update(Instant::now());
                tracing::info!(item = %target, "showing");
                Ok(CycleOutcome::Committed(target))
            }
            Commit::Retry(wait) => {
                tokio::time::sleep(wait).await;
                Ok(CycleOutcome::Retrying {
                    content: target,
                    wait,
                })
            }
        }
    }

    /// Loop until the gateway or renderer fails.
    pub async fn run(mut self) -> Result<Infallible, SchedulerError> {
        loop {
            if let CycleOutcome::Idle = self.run_cycle().await? {
                self.idle().await;
            }
        }
    }

    /// Sleep until the advance deadline or until input wakes us.
    async fn idle(&self) {
        let deadline = self.shared.lock().await.deadline(Instant::now());
        match deadline {
            Some(at) => {
                tokio::select! {
                    () = tokio::time::sleep_until(at) => {}
                    () = self.shared.woken() => {}
                }
            }
            None => self.shared.woken().await,
        }
    }
}
