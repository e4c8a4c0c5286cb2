//! Content references: the stable identities the schedulers navigate.
//!
//! A content reference never carries pixels. It is cheap to clone, immutable
//! once created, and compared by identity: path equality for pictures,
//! case-insensitive title equality for tracks.

use core::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// PictureRef
// ---------------------------------------------------------------------------

/// A picture file in the content pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PictureRef {
    path: PathBuf,
}

impl PictureRef {
    /// Wrap a picture path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full path of the picture file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used in log lines; falls back to the full path.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

impl fmt::Display for PictureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

/// A track reported by a now-playing source.
///
/// Two tracks are the same content when their titles match ignoring case;
/// album, artist and artwork do not take part in equality.
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    /// Track title.
    pub title: String,
    /// Album name.
    #[serde(default)]
    pub album: String,
    /// Display artist, e.g. `"Main (feat. Guest)"`.
    #[serde(default)]
    pub artist: String,
    /// 300 px album cover URL, when the source provides one.
    #[serde(default)]
    pub album_cover_url_300px: Option<String>,
    /// 640 px album cover URL, when the source provides one.
    #[serde(default)]
    pub album_cover_url_640px: Option<String>,
    /// When the track started playing (ISO-8601, as delivered by the source).
    #[serde(default)]
    pub played_at: Option<String>,
    /// Whether the listener saved the track; `None` when unknown.
    #[serde(default)]
    pub is_loved: Option<bool>,
}

impl Track {
    /// Create a track with only a title and an artist list.
    ///
    /// The artist list is folded into a display string by
    /// [`Track::artist_line`].
    pub fn new(title: impl Into<String>, album: impl Into<String>, artists: &[&str]) -> Self {
        Self {
            title: title.into(),
            album: album.into(),
            artist: Self::artist_line(artists),
            album_cover_url_300px: None,
            album_cover_url_640px: None,
            played_at: None,
            is_loved: None,
        }
    }

    /// Build the display artist: the first artist, then any others as
    /// `" (feat. B, C)"`.
    pub fn artist_line(artists: &[&str]) -> String {
        match artists {
            [] => String::new(),
            [main] => (*main).to_owned(),
            [main, featured @ ..] => format!("{main} (feat. {})", featured.join(", ")),
        }
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.title.to_lowercase() == other.title.to_lowercase()
    }
}

impl Eq for Track {}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.artist.is_empty() {
            f.write_str(&self.title)
        } else {
            write!(f, "{} - {}", self.title, self.artist)
        }
    }
}
