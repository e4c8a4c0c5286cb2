//! Scheduling core for a slow-refresh content frame.
//!
//! Decides what the panel shows next and when, independent of how pixels
//! are produced or pushed. Every collaborator (renderer, gateway, input edge
//! source, now-playing source) is a `platform` trait injected at
//! construction.
//!
//! # Modules
//!
//! - [`history`] - bounded, cursor-addressed navigation log
//! - [`selection`] - random draw that avoids immediate repeats
//! - [`engine`] - [`HistoryEngine`]: advance / retreat / reset over a pool
//! - [`timer`] - pause-aware automatic advance timer
//! - [`command`] - logical commands and the button mapping
//! - [`state`] - [`SchedulerState`] and its single lock domain
//! - [`debounce`] - per-button quiet window
//! - [`controller`] - [`InputController`]: channel drain, debounce, busy gating
//! - [`scheduler`] - [`PictureScheduler`]: timer + pending flag + backpressure
//! - [`now_playing`] - [`NowPlayingScheduler`]: the same loop over a poller
//! - [`error`] - configuration and loop errors
//!
//! # Concurrency
//!
//! The scheduler and the input controller run as separate tasks sharing one
//! `tokio::sync::Mutex<SchedulerState>`. Renderer and gateway calls happen
//! with the lock released; `display_busy` keeps input from changing the
//! selection while a frame is in flight.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod commit;

pub mod command;
pub mod controller;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod history;
pub mod now_playing;
pub mod scheduler;
pub mod selection;
pub mod state;
pub mod timer;

pub use command::{ButtonMap, Command, CommandOutcome};
pub use controller::{forward_events, input_channel, InputController, InputReceiver, InputSender};
pub use debounce::Debouncer;
pub use engine::HistoryEngine;
pub use error::{ConfigError, SchedulerError};
pub use history::History;
pub use now_playing::NowPlayingScheduler;
pub use scheduler::{CycleOutcome, PictureScheduler};
pub use selection::{Picker, Pool, RandomPicker, Selection};
pub use state::{SchedulerState, Shared};
pub use timer::SlideTimer;
