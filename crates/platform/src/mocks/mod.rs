//! Mock implementations for testing
//!
//! This module provides scripted implementations of all platform contracts
//! for use in unit and integration tests. Each mock hands out a cloneable
//! log handle so a test can inspect what happened after the mock has been
//! moved into a scheduler.
//!
//! Timestamps use `tokio::time::Instant`, so they follow a paused test clock.

#![cfg(any(test, feature = "mocks"))]

use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

use crate::*;

/// Lock a log mutex, recovering the data if a panicking test poisoned it.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// MockGateway
// ---------------------------------------------------------------------------

/// What a [`MockGateway`] saw.
#[derive(Debug, Default, Clone)]
pub struct GatewayRecord {
    /// Time of every `commit()` call, in order.
    pub commits: Vec<Instant>,
    /// Number of `set_frame()` calls.
    pub frames_set: usize,
    /// Options passed with the most recent frame.
    pub last_options: Option<FrameOptions>,
}

/// Shared view of a [`MockGateway`]'s record.
#[derive(Debug, Default, Clone)]
pub struct GatewayLog(Arc<Mutex<GatewayRecord>>);

impl GatewayLog {
    /// Snapshot of the record so far.
    pub fn snapshot(&self) -> GatewayRecord {
        lock(&self.0).clone()
    }

    /// Number of `commit()` calls so far.
    pub fn commit_count(&self) -> usize {
        lock(&self.0).commits.len()
    }
}

/// Gateway replaying a fixed script of responses.
///
/// Once the script runs out every commit succeeds.
pub struct MockGateway {
    script: VecDeque<GatewayResponse>,
    log: GatewayLog,
}

impl MockGateway {
    /// Create a gateway that answers commits from `script` in order.
    pub fn new(script: impl IntoIterator<Item = GatewayResponse>) -> Self {
        Self {
            script: script.into_iter().collect(),
            log: GatewayLog::default(),
        }
    }

    /// A gateway that accepts every frame.
    pub fn always_ready() -> Self {
        Self::new([])
    }

    /// Handle for inspecting calls later.
    pub fn log(&self) -> GatewayLog {
        self.log.clone()
    }

    /// Append more responses to the script.
    pub fn push_response(&mut self, response: GatewayResponse) {
        self.script.push_back(response);
    }
}

impl DisplayGateway for MockGateway {
    fn set_frame(&mut self, _frame: RenderedFrame, options: FrameOptions) {
        let mut rec = lock(&self.log.0);
        rec.frames_set += 1;
        rec.last_options = Some(options);
    }

    async fn commit(&mut self) -> GatewayResponse {
        lock(&self.log.0).commits.push(Instant::now());
        self.script.pop_front().unwrap_or(GatewayResponse::Committed)
    }
}

// ---------------------------------------------------------------------------
// MockRenderer
// ---------------------------------------------------------------------------

/// Error produced by a [`MockRenderer`] told to fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mock render failure for {0}")]
pub struct MockRenderError(pub String);

/// Shared list of the content a [`MockRenderer`] rendered, by display name.
#[derive(Debug, Default, Clone)]
pub struct RenderLog(Arc<Mutex<Vec<String>>>);

impl RenderLog {
    /// Names rendered so far, in order.
    pub fn rendered(&self) -> Vec<String> {
        lock(&self.0).clone()
    }
}

/// Holds a [`MockRenderer`] inside `render()` until the test releases it.
#[derive(Debug, Default, Clone)]
pub struct RenderGate {
    entered: Arc<tokio::sync::Notify>,
    release: Arc<tokio::sync::Notify>,
}

impl RenderGate {
    /// Resolve once a render call is parked at the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the parked render call finish.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// Renderer producing a small solid frame for any displayable content.
pub struct MockRenderer {
    fail_on: Option<usize>,
    calls: usize,
    log: RenderLog,
    gate: Option<RenderGate>,
}

impl MockRenderer {
    /// A renderer that always succeeds.
    pub fn new() -> Self {
        Self {
            fail_on: None,
            calls: 0,
            log: RenderLog::default(),
            gate: None,
        }
    }

    /// A renderer that parks every call until its gate is released.
    pub fn gated() -> (Self, RenderGate) {
        let gate = RenderGate::default();
        let renderer = Self {
            gate: Some(gate.clone()),
            ..Self::new()
        };
        (renderer, gate)
    }

    /// A renderer whose `n`-th call (0-based) fails.
    pub fn failing_on(n: usize) -> Self {
        Self {
            fail_on: Some(n),
            ..Self::new()
        }
    }

    /// Handle for inspecting calls later.
    pub fn log(&self) -> RenderLog {
        self.log.clone()
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Display> Renderer<C> for MockRenderer {
    type Error = MockRenderError;

    async fn render(&mut self, content: &C) -> Result<RenderedFrame, Self::Error> {
        let call = self.calls;
        self.calls += 1;
        let name = content.to_string();
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        if self.fail_on == Some(call) {
            return Err(MockRenderError(name));
        }
        lock(&self.log.0).push(name);
        Ok(RenderedFrame::solid(4, 4, [0xFF, 0xFF, 0xFF]))
    }
}

// ---------------------------------------------------------------------------
// MockNowPlaying
// ---------------------------------------------------------------------------

/// Now-playing source replaying scripted `current()` answers.
///
/// Once the script runs out `current()` keeps returning the last answer.
pub struct MockNowPlaying {
    script: VecDeque<Result<Option<Track>, SourceError>>,
    last: Result<Option<Track>, SourceError>,
    recent: Vec<Track>,
    polls: Arc<Mutex<usize>>,
}

impl MockNowPlaying {
    /// Create a source answering `current()` from `script`, with `recent`
    /// as its play history (newest first).
    pub fn new(
        script: impl IntoIterator<Item = Result<Option<Track>, SourceError>>,
        recent: Vec<Track>,
    ) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: Ok(None),
            recent,
            polls: Arc::default(),
        }
    }

    /// Shared counter of `current()` calls.
    pub fn polls(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.polls)
    }
}

impl NowPlayingSource for MockNowPlaying {
    async fn current(&mut self) -> Result<Option<Track>, SourceError> {
        *lock(&self.polls) += 1;
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last.clone()
    }

    async fn most_recent(&mut self, limit: usize) -> Result<Vec<Track>, SourceError> {
        Ok(self.recent.iter().take(limit).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// ScriptedInput
// ---------------------------------------------------------------------------

/// Input device replaying button presses after fixed delays.
pub struct ScriptedInput {
    script: VecDeque<(Duration, InputEvent)>,
}

impl ScriptedInput {
    /// Each entry fires `delay` after the previous one.
    pub fn new(script: impl IntoIterator<Item = (Duration, Button)>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|(delay, b)| (delay, InputEvent::ButtonPress(b)))
                .collect(),
        }
    }
}

impl InputDevice for ScriptedInput {
    async fn wait_for_event(&mut self) -> Option<InputEvent> {
        let (delay, event) = self.script.pop_front()?;
        tokio::time::sleep(delay).await;
        Some(event)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_mock_gateway_replays_script_then_commits() {
        let mut gw = MockGateway::new([GatewayResponse::NotReady(Duration::from_secs(2))]);
        let log = gw.log();
        gw.set_frame(RenderedFrame::solid(1, 1, [0, 0, 0]), FrameOptions::default());
        assert_eq!(gw.commit().await, GatewayResponse::NotReady(Duration::from_secs(2)));
        assert_eq!(gw.commit().await, GatewayResponse::Committed);
        let rec = log.snapshot();
        assert_eq!(rec.commits.len(), 2);
        assert_eq!(rec.frames_set, 1);
    }

    #[tokio::test]
    async fn test_mock_renderer_fails_on_requested_call() {
        let mut r = MockRenderer::failing_on(1);
        let pic = PictureRef::new("a.jpg");
        assert!(Renderer::render(&mut r, &pic).await.is_ok());
        assert!(Renderer::render(&mut r, &pic).await.is_err());
        assert_eq!(r.log().rendered(), vec!["a.jpg".to_owned()]);
    }

    #[tokio::test]
    async fn test_gated_renderer_waits_for_release() {
        let (mut r, gate) = MockRenderer::gated();
        let log = r.log();
        let task = tokio::spawn(async move {
            Renderer::render(&mut r, &PictureRef::new("a.jpg")).await.is_ok()
        });
        gate.entered().await;
        assert!(log.rendered().is_empty());
        gate.release();
        assert!(task.await.expect("render task"));
        assert_eq!(log.rendered(), vec!["a.jpg".to_owned()]);
    }

    #[tokio::test]
    async fn test_mock_now_playing_repeats_last_answer() {
        let t = Track::new("One", "", &["X"]);
        let mut src = MockNowPlaying::new([Ok(Some(t.clone()))], vec![]);
        assert_eq!(src.current().await, Ok(Some(t.clone())));
        assert_eq!(src.current().await, Ok(Some(t)));
        assert_eq!(*src.polls().lock().expect("poll counter"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_input_fires_after_delay() {
        let start = Instant::now();
        let mut input = ScriptedInput::new([(Duration::from_millis(300), Button::C)]);
        assert_eq!(input.wait_for_event().await, Some(InputEvent::ButtonPress(Button::C)));
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert_eq!(input.wait_for_event().await, None);
    }
}
