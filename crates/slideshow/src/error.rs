//! Error taxonomy.
//!
//! Configuration errors stop the process before any loop starts.
//! [`SchedulerError`] ends a running loop; it is the only way a scheduler
//! returns. Gateway backpressure is not an error and never appears here.

use platform::SourceError;

/// Startup validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The content pool has nothing to show.
    #[error("content pool is empty")]
    EmptyPool,
    /// A history must hold at least the current entry.
    #[error("history capacity must be at least 1")]
    ZeroCapacity,
    /// Timers and poll intervals must be positive.
    #[error("{0} interval must be greater than zero")]
    ZeroInterval(&'static str),
}

/// Terminal failures of a scheduler loop.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The gateway reported a fatal error.
    #[error("display gateway failed: {0}")]
    Gateway(String),
    /// The renderer failed; treated as a broken dependency.
    #[error("renderer failed")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The now-playing source failed in a way polling again will not fix.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl SchedulerError {
    pub(crate) fn render<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Render(Box::new(err))
    }
}
