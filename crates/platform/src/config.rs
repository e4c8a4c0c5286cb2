//! Device constants and defaults
//!
//! This module defines central configuration values used across the
//! workspace. The configuration file (see the `inkframe` crate) overrides
//! the tunables; everything else should reference these constants rather
//! than hardcoding values.

use core::time::Duration;

/// The application name
pub const APP_NAME: &str = "Inkframe";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Panel width in pixels (Inky Impression 5.7")
pub const PANEL_WIDTH: u32 = 600;

/// Panel height in pixels (Inky Impression 5.7")
pub const PANEL_HEIGHT: u32 = 448;

/// Minimum time between two panel refreshes.
///
/// This is a gateway-internal invariant; the schedulers only ever react to
/// the wait a gateway reports.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// Automatic advance interval in picture mode.
pub const PICTURE_INTERVAL: Duration = Duration::from_secs(180);

/// Poll interval in now-playing mode.
pub const NOW_PLAYING_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Maximum number of entries kept in the picture history.
pub const HISTORY_LIMIT: usize = 1000;

/// Per-button debounce window.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(250);

/// Default colour saturation hint handed to the gateway.
pub const DEFAULT_SATURATION: f32 = 0.5;

/// Full application title (name + version)
pub fn app_title() -> String {
    format!("{APP_NAME} v{APP_VERSION}")
}
