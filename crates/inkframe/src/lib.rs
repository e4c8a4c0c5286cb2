//! Inkframe: slow-refresh picture frame and now-playing display.
//!
//! Wires the `slideshow` scheduling core to concrete collaborators that run
//! on a desktop host.
//!
//! # Architecture
//!
//! ```text
//! main.rs (CLI, logging, Ctrl-C)
//!         ↓
//! app (wiring per mode)
//!         ↓
//! slideshow (history engine, input controller, schedulers)
//!         ↓
//! collaborators: PanelEmulator, FrameRenderer, KeyboardInput, JsonFileSource
//! ```
//!
//! # Modes
//!
//! - `pictures`: random slideshow over a photo directory, buttons A–D
//! - `now-playing`: polls a JSON feed and shows a card per new track

// Upgrade relevant warns to deny; keep pedantic as warn
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Pixel math converts freely between u8, u32 and f32.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_wrap)]

pub mod app;
pub mod config;
pub mod display;
pub mod input;
pub mod now_playing;
pub mod render;

pub use app::AppError;
pub use config::{Config, ConfigFileError, Mode, Overrides};
pub use display::PanelEmulator;
pub use input::KeyboardInput;
pub use now_playing::JsonFileSource;
pub use render::{FrameRenderer, RenderError};
