//! Display gateway abstraction
//!
//! A slow-refresh panel accepts one frame, then refuses new ones until its
//! minimum refresh interval has passed. The gateway owns that invariant and
//! reports it through [`GatewayResponse::NotReady`]; callers never
//! re-implement the interval themselves.

use core::time::Duration;

use crate::config::DEFAULT_SATURATION;
use crate::render::RenderedFrame;

/// Display gateway trait for slow-refresh panels
pub trait DisplayGateway {
    /// Stage a frame for the next [`commit`](DisplayGateway::commit).
    ///
    /// Replaces any previously staged frame. Does not touch the panel.
    fn set_frame(&mut self, frame: RenderedFrame, options: FrameOptions);

    /// Attempt to push the staged frame onto the panel.
    fn commit(&mut self) -> impl core::future::Future<Output = GatewayResponse>;
}

/// Outcome of a [`DisplayGateway::commit`].
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResponse {
    /// The frame is on the panel.
    Committed,
    /// The panel cannot refresh yet; try again after the given wait.
    NotReady(Duration),
    /// The panel failed for good.
    Error(String),
}

/// Per-frame hints forwarded to the panel driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOptions {
    /// Colour saturation in `0.0..=1.0`.
    pub saturation: f32,
    /// Derive the saturation from the frame content instead.
    pub dynamic_saturation: bool,
}

impl FrameOptions {
    /// Create options, clamping `saturation` into `0.0..=1.0`.
    pub fn new(saturation: f32, dynamic_saturation: bool) -> Self {
        Self {
            saturation: if saturation.is_nan() {
                DEFAULT_SATURATION
            } else {
                saturation.clamp(0.0, 1.0)
            },
            dynamic_saturation,
        }
    }
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self::new(DEFAULT_SATURATION, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_options_clamped() {
        assert!((FrameOptions::new(3.0, false).saturation - 1.0).abs() < f32::EPSILON);
        assert!(FrameOptions::new(-0.5, false).saturation.abs() < f32::EPSILON);
    }

    #[test]
    fn test_frame_options_nan_uses_default() {
        let opts = FrameOptions::new(f32::NAN, true);
        assert!((opts.saturation - DEFAULT_SATURATION).abs() < f32::EPSILON);
        assert!(opts.dynamic_saturation);
    }
}
