//! Now-playing feed stored as a JSON file.
//!
//! An external agent (a listening-history poller, a media player hook)
//! rewrites the file whenever playback changes:
//!
//! ```json
//! {
//!   "current": { "title": "Hey Jude", "album": "1", "artist": "The Beatles" },
//!   "recent": [ { "title": "Let It Be", "artist": "The Beatles" } ]
//! }
//! ```
//!
//! A missing or half-written file is a transient failure; anything that
//! will not fix itself (permissions, a directory in its place) is fatal.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use platform::{NowPlayingSource, SourceError, Track};
use serde::Deserialize;

/// File contents.
#[derive(Debug, Default, Deserialize)]
pub struct Feed {
    /// Track playing now, `null` when paused or stopped.
    #[serde(default)]
    pub current: Option<Track>,
    /// Recently played tracks, newest first.
    #[serde(default)]
    pub recent: Vec<Track>,
}

/// [`NowPlayingSource`] backed by a JSON feed file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Poll the feed at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Feed file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole feed.
    pub async fn read_feed(&self) -> Result<Feed, SourceError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            let reason = format!("{}: {e}", self.path.display());
            match e.kind() {
                ErrorKind::NotFound | ErrorKind::Interrupted | ErrorKind::WouldBlock => {
                    SourceError::Transient(reason)
                }
                _ => SourceError::Fatal(reason),
            }
        })?;
        // A writer may be halfway through replacing the file.
        serde_json::from_slice(&bytes).map_err(|e| {
            SourceError::Transient(format!("{}: malformed feed: {e}", self.path.display()))
        })
    }
}

impl NowPlayingSource for JsonFileSource {
    async fn current(&mut self) -> Result<Option<Track>, SourceError> {
        Ok(self.read_feed().await?.current)
    }

    async fn most_recent(&mut self, limit: usize) -> Result<Vec<Track>, SourceError> {
        let mut recent = self.read_feed().await?.recent;
        recent.truncate(limit);
        Ok(recent)
    }
}
