//! Input edge sources for the host.

pub mod keyboard;

pub use keyboard::{parse_key, KeyboardInput};
