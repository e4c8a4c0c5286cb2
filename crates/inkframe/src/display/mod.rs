//! Display gateway implementations for the host.

pub mod emulator;
pub mod saturation;

pub use emulator::{PanelEmulator, CURRENT_FRAME};
