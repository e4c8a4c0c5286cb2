//! Now-playing scheduler.
//!
//! The same cycle shape as the picture scheduler, with a poller in place of
//! the history engine: the timer triggers a poll instead of an advance, and
//! a polled track that differs from the one on screen becomes the pending
//! update. There is no input in this mode, so the state is owned outright.
//!
//! A poll asks for the current track and falls back to the most recently
//! played one. Transient source failures are logged and retried on the next
//! interval; fatal ones end the loop.

use core::convert::Infallible;

use platform::{DisplayGateway, FrameOptions, NowPlayingSource, Renderer, SourceError, Track};
use tokio::time::{Duration, Instant};

use crate::commit::{self, Commit};
use crate::error::{ConfigError, SchedulerError};
use crate::scheduler::CycleOutcome;
use crate::timer::SlideTimer;

/// Polls a now-playing source and shows each new track.
pub struct NowPlayingScheduler<S, R, G> {
    source: S,
    renderer: R,
    gateway: G,
    options: FrameOptions,
    poll_timer: SlideTimer,
    polled_once: bool,
    shown: Option<Track>,
    pending: Option<Track>,
    staged: Option<Track>,
}

impl<S, R, G> NowPlayingScheduler<S, R, G>
where
    S: NowPlayingSource,
    R: Renderer<Track>,
    G: DisplayGateway,
{
    /// Create a scheduler; the first cycle polls immediately.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroInterval`] when `poll_interval` is zero.
    pub fn new(
        source: S,
        renderer: R,
        gateway: G,
        options: FrameOptions,
        poll_interval: Duration,
    ) -> Result<Self, ConfigError> {
        if poll_interval.is_zero() {
            return Err(ConfigError::ZeroInterval("poll"));
        }
        Ok(Self {
            source,
            renderer,
            gateway,
            options,
            poll_timer: SlideTimer::new(poll_interval, Instant::now()),
            polled_once: false,
            shown: None,
            pending: None,
            staged: None,
        })
    }

    /// Track currently on the panel.
    pub fn shown(&self) -> Option<&Track> {
        self.shown.as_ref()
    }

    /// Track waiting to be committed.
    pub fn pending(&self) -> Option<&Track> {
        self.pending.as_ref()
    }

    /// The display gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The now-playing source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one cycle: poll when due, then push a pending track.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome<Track>, SchedulerError> {
        if !self.polled_once || self.poll_timer.expired(Instant::now()) {
            self.polled_once = true;
            let polled = self.poll().await?;
            self.poll_timer.reset(Instant::now());
            self.consider(polled);
        }

        let Some(target) = self.pending.clone() else {
            return Ok(CycleOutcome::Idle);
        };

        if self.staged.as_ref() != Some(&target) {
            tracing::debug!(track = %target, "rendering");
            commit::stage(&mut self.renderer, &mut self.gateway, &target, self.options).await?;
            self.staged = Some(target.clone());
        }

        match commit::commit(&mut self.gateway).await? {
            Commit::Done => {
                self.staged = None;
                self.pending = None;
                self.shown = Some(target.clone());
                self.poll_timer.reset(Instant::now());
                tracing::info!(track = %target, "showing");
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

    /// Loop until the gateway, renderer or source fails for good.
    pub async fn run(mut self) -> Result<Infallible, SchedulerError> {
        loop {
            if let CycleOutcome::Idle = self.run_cycle().await? {
                let now = Instant::now();
                let next_poll = self
                    .poll_timer
                    .deadline(now)
                    .unwrap_or(now + self.poll_timer.interval());
                tokio::time::sleep_until(next_poll).await;
            }
        }
    }

    /// Update the pending track from a poll result.
    fn consider(&mut self, polled: Option<Track>) {
        let Some(track) = polled else {
            tracing::debug!("nothing playing, keeping current frame");
            return;
        };
        if self.shown.as_ref() == Some(&track) {
            if self.pending.take().is_some() {
                tracing::info!(track = %track, "back to the track on screen, dropping pending update");
            }
            return;
        }
        if self.pending.as_ref() != Some(&track) {
            tracing::info!(track = %track, "new track detected");
        }
        self.pending = Some(track);
    }

    /// Current track, else the most recently played one.
    async fn poll(&mut self) -> Result<Option<Track>, SchedulerError> {
        tracing::debug!("polling now-playing source");
        match self.source.current().await {
            Ok(Some(track)) => return Ok(Some(track)),
            Ok(None) => {}
            Err(err) => return source_failed(err),
        }
        match self.source.most_recent(1).await {
            Ok(recent) => Ok(recent.into_iter().next()),
            Err(err) => source_failed(err),
        }
    }
}

fn source_failed(err: SourceError) -> Result<Option<Track>, SchedulerError> {
    if err.is_transient() {
        tracing::warn!(error = %err, "now-playing poll failed, retrying next interval");
        Ok(None)
    } else {
        tracing::error!(error = %err, "now-playing source failed");
        Err(err.into())
    }
}
