//! Configuration file.
//!
//! Every key is optional; missing keys fall back to the device constants in
//! [`platform::config`]. Example:
//!
//! ```toml
//! mode = "pictures"
//!
//! [pictures]
//! dir = "/home/pi/photos"
//! interval_secs = 180
//!
//! [display]
//! saturation = 0.6
//! output_dir = "/tmp/inkframe"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use platform::config as defaults;
use platform::FrameOptions;
use serde::Deserialize;

/// Which content loop to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Random slideshow over a photo directory.
    #[default]
    Pictures,
    /// Card for the track currently playing.
    NowPlaying,
}

/// Failures loading or validating the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// The file could not be read.
    #[error("cannot read config file {}", path.display())]
    Read {
        /// File that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("invalid config file")]
    Parse(#[from] toml::de::Error),
    /// Now-playing mode needs a feed to poll.
    #[error("now-playing mode requires [now_playing] source")]
    MissingSource,
    /// A value is out of range.
    #[error("invalid setting: {0}")]
    Invalid(&'static str),
}

/// Whole configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Content loop.
    pub mode: Mode,
    /// Picture slideshow settings.
    pub pictures: PicturesConfig,
    /// Now-playing settings.
    pub now_playing: NowPlayingConfig,
    /// Panel settings.
    pub display: DisplayConfig,
    /// Button settings.
    pub input: InputConfig,
}

/// `[pictures]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PicturesConfig {
    /// Photo directory (scanned once at startup, not recursively).
    pub dir: PathBuf,
    /// Automatic advance interval.
    pub interval_secs: u64,
    /// Maximum history length.
    pub history_limit: usize,
    /// Fixed seed for a reproducible slideshow.
    pub seed: Option<u64>,
}

impl Default for PicturesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("photos"),
            interval_secs: defaults::PICTURE_INTERVAL.as_secs(),
            history_limit: defaults::HISTORY_LIMIT,
            seed: None,
        }
    }
}

/// `[now_playing]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NowPlayingConfig {
    /// JSON feed written by the listening agent.
    pub source: Option<PathBuf>,
    /// Poll interval.
    pub poll_interval_secs: u64,
}

impl Default for NowPlayingConfig {
    fn default() -> Self {
        Self {
            source: None,
            poll_interval_secs: defaults::NOW_PLAYING_POLL_INTERVAL.as_secs(),
        }
    }
}

/// `[display]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
    /// Minimum time between refreshes.
    pub min_refresh_secs: u64,
    /// Colour saturation hint, `0.0..=1.0`.
    pub saturation: f32,
    /// Derive saturation from each frame.
    pub dynamic_saturation: bool,
    /// Where the panel emulator writes frames.
    pub output_dir: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: defaults::PANEL_WIDTH,
            height: defaults::PANEL_HEIGHT,
            min_refresh_secs: defaults::MIN_REFRESH_INTERVAL.as_secs(),
            saturation: defaults::DEFAULT_SATURATION,
            dynamic_saturation: false,
            output_dir: PathBuf::from("frames"),
        }
    }
}

/// `[input]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Per-button debounce window.
    pub debounce_ms: u64,
    /// Read buttons from the keyboard (stdin).
    pub keyboard: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: defaults::DEBOUNCE_WINDOW.as_millis() as u64,
            keyboard: true,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--mode`
    pub mode: Option<Mode>,
    /// `--saturation`
    pub saturation: Option<f32>,
    /// `--dynamic-saturation`
    pub dynamic_saturation: bool,
    /// `--photos`
    pub photos: Option<PathBuf>,
    /// `--feed`
    pub feed: Option<PathBuf>,
    /// `--output`
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Read a TOML file without validating it.
    ///
    /// Validation waits for [`Config::with_overrides`], since a command-line
    /// flag may supply what the file leaves out.
    pub fn read(path: &Path) -> Result<Self, ConfigFileError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigFileError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides, then validate the result.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigFileError> {
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(saturation) = overrides.saturation {
            self.display.saturation = saturation;
        }
        if overrides.dynamic_saturation {
            self.display.dynamic_saturation = true;
        }
        if let Some(dir) = overrides.photos {
            self.pictures.dir = dir;
        }
        if let Some(feed) = overrides.feed {
            self.now_playing.source = Some(feed);
        }
        if let Some(dir) = overrides.output_dir {
            self.display.output_dir = dir;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigFileError::Invalid("display size must be non-zero"));
        }
        if !(0.0..=1.0).contains(&self.display.saturation) {
            return Err(ConfigFileError::Invalid("display.saturation must be within 0.0..=1.0"));
        }
        match self.mode {
            Mode::Pictures => {
                if self.pictures.interval_secs == 0 {
                    return Err(ConfigFileError::Invalid("pictures.interval_secs must be positive"));
                }
                if self.pictures.history_limit == 0 {
                    return Err(ConfigFileError::Invalid("pictures.history_limit must be positive"));
                }
            }
            Mode::NowPlaying => {
                if self.now_playing.source.is_none() {
                    return Err(ConfigFileError::MissingSource);
                }
                if self.now_playing.poll_interval_secs == 0 {
                    return Err(ConfigFileError::Invalid(
                        "now_playing.poll_interval_secs must be positive",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Frame options handed to the gateway with every frame.
    pub fn frame_options(&self) -> FrameOptions {
        FrameOptions::new(self.display.saturation, self.display.dynamic_saturation)
    }

    /// Picture advance interval.
    pub fn picture_interval(&self) -> Duration {
        Duration::from_secs(self.pictures.interval_secs)
    }

    /// Now-playing poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.now_playing.poll_interval_secs)
    }

    /// Panel minimum refresh interval.
    pub fn min_refresh(&self) -> Duration {
        Duration::from_secs(self.display.min_refresh_secs)
    }

    /// Button debounce window.
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.input.debounce_ms)
    }
}
