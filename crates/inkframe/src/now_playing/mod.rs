//! Now-playing sources for the host.

pub mod json_file;

pub use json_file::{Feed, JsonFileSource};
