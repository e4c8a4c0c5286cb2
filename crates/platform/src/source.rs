//! Now-playing source abstraction

use crate::content::Track;

/// A service that knows what the listener is playing.
///
/// Polled on a fixed interval by the now-playing scheduler; it is never
/// called while the scheduler state lock is held.
pub trait NowPlayingSource {
    /// The track playing right now, if any.
    fn current(&mut self) -> impl core::future::Future<Output = Result<Option<Track>, SourceError>>;

    /// Up to `limit` most recently played tracks, newest first.
    fn most_recent(
        &mut self,
        limit: usize,
    ) -> impl core::future::Future<Output = Result<Vec<Track>, SourceError>>;
}

/// Poll failures, split by whether a later poll can succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The source is temporarily unavailable; the next poll may work.
    #[error("now-playing source temporarily unavailable: {0}")]
    Transient(String),
    /// The source is broken; polling again will not help.
    #[error("now-playing source failed: {0}")]
    Fatal(String),
}

impl SourceError {
    /// Returns `true` for errors worth retrying on the next poll.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}
