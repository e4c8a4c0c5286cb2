//! Collaborator contracts for the inkframe display.
//!
//! This crate holds the trait boundaries between the scheduling core
//! (`slideshow`) and everything it treats as an external collaborator,
//! so the core can be driven by real hardware, the desktop panel emulator,
//! or scripted mocks without changing a line.
//!
//! # Architecture Layers
//!
//! ```text
//! Process entry point (inkframe crate)
//!         ↓
//! Scheduling core (slideshow: history, input controller, schedulers)
//!         ↓
//! Contracts (this crate - traits and content types)
//!         ↓
//! Concrete collaborators (panel emulator, image renderer, feeds, buttons)
//! ```
//!
//! # Contracts
//!
//! - [`DisplayGateway`] - accepts a frame and reports committed / not-ready / error
//! - [`Renderer`] - turns a content reference into a [`RenderedFrame`]
//! - [`InputDevice`] - delivers named button presses
//! - [`NowPlayingSource`] - polls the current or most recent [`Track`]
//!
//! # Features
//!
//! - `mocks`: scripted implementations of every contract (see [`mocks`])
//!
//! # Example
//!
//! ```no_run
//! use platform::{DisplayGateway, FrameOptions, GatewayResponse, RenderedFrame};
//!
//! async fn show<G: DisplayGateway>(gateway: &mut G, frame: RenderedFrame) {
//!     gateway.set_frame(frame, FrameOptions::default());
//!     match gateway.commit().await {
//!         GatewayResponse::Committed => {}
//!         GatewayResponse::NotReady(wait) => tokio::time::sleep(wait).await,
//!         GatewayResponse::Error(reason) => panic!("{reason}"),
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod content;
pub mod display;
pub mod input;
pub mod render;
pub mod source;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

// Re-export main contracts
pub use content::{PictureRef, Track};
pub use display::{DisplayGateway, FrameOptions, GatewayResponse};
pub use input::{Button, InputDevice, InputEvent};
pub use render::{RenderedFrame, Renderer};
pub use source::{NowPlayingSource, SourceError};
