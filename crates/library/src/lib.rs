//! Picture library: scans a photo directory into the slideshow's content pool.
//!
//! # Modules
//!
//! - [`scanner`]: directory walk, extension filtering and pool validation

#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

pub mod scanner;

pub use scanner::{LibraryError, PictureLibrary, Scanner};
