//! Panel emulator: a desktop stand-in for the e-ink panel.
//!
//! Behaves like the real driver towards the schedulers (one refresh per
//! minimum interval, error on an empty commit) and writes every committed
//! frame to disk as PNG so it can be watched with any image viewer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbImage;
use platform::{DisplayGateway, FrameOptions, GatewayResponse, RenderedFrame};
use tokio::time::Instant;

use super::saturation;

/// File that always holds the most recent frame.
pub const CURRENT_FRAME: &str = "current.png";

/// Host panel that enforces the refresh interval and saves frames as PNG.
#[derive(Debug)]
pub struct PanelEmulator {
    output_dir: PathBuf,
    min_refresh: Duration,
    staged: Option<(RenderedFrame, FrameOptions)>,
    last_refresh: Option<Instant>,
    frames_written: u64,
}

impl PanelEmulator {
    /// Create an emulator writing into `output_dir` (created on first commit).
    pub fn new(output_dir: impl Into<PathBuf>, min_refresh: Duration) -> Self {
        Self {
            output_dir: output_dir.into(),
            min_refresh,
            staged: None,
            last_refresh: None,
            frames_written: 0,
        }
    }

    /// Directory frames are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Drop the staged frame.
    pub fn clear_frame(&mut self) {
        self.staged = None;
    }

    fn saturation_for(frame: &RenderedFrame, options: FrameOptions) -> f32 {
        if options.dynamic_saturation {
            saturation::dynamic_saturation(frame)
        } else {
            options.saturation
        }
    }
}

impl DisplayGateway for PanelEmulator {
    fn set_frame(&mut self, frame: RenderedFrame, options: FrameOptions) {
        tracing::debug!(
            width = frame.width(),
            height = frame.height(),
            saturation = options.saturation,
            dynamic = options.dynamic_saturation,
            "frame staged"
        );
        self.staged = Some((frame, options));
    }

    async fn commit(&mut self) -> GatewayResponse {
        let now = Instant::now();
        if let Some(last) = self.last_refresh {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.min_refresh {
                return GatewayResponse::NotReady(self.min_refresh - elapsed);
            }
        }
        // The refresh slot is spent even when there is nothing to show.
        self.last_refresh = Some(now);

        let Some((frame, options)) = &self.staged else {
            return GatewayResponse::Error("no frame to display".into());
        };

        let saturation = Self::saturation_for(frame, *options);
        let rgb = saturation::apply(frame, saturation);
        let (width, height) = (frame.width(), frame.height());
        let index = self.frames_written;
        let dir = self.output_dir.clone();

        let written =
            tokio::task::spawn_blocking(move || write_frame(&dir, index, width, height, rgb)).await;
        match written {
            Ok(Ok(path)) => {
                self.frames_written += 1;
                tracing::info!(path = %path.display(), saturation, "frame displayed");
                GatewayResponse::Committed
            }
            Ok(Err(reason)) => GatewayResponse::Error(reason),
            Err(join) => GatewayResponse::Error(format!("frame writer task failed: {join}")),
        }
    }
}

fn write_frame(
    dir: &Path,
    index: u64,
    width: u32,
    height: u32,
    rgb: Vec<u8>,
) -> Result<PathBuf, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
    let img = RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| format!("frame buffer does not match {width}x{height}"))?;

    let path = dir.join(format!("frame-{index:06}.png"));
    img.save(&path)
        .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    let current = dir.join(CURRENT_FRAME);
    std::fs::copy(&path, &current)
        .map_err(|e| format!("cannot write {}: {e}", current.display()))?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_commit_without_frame_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut panel = PanelEmulator::new(dir.path(), Duration::from_secs(15));
        assert_eq!(
            panel.commit().await,
            GatewayResponse::Error("no frame to display".into())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_commit_still_spends_refresh_slot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut panel = PanelEmulator::new(dir.path(), Duration::from_secs(15));
        panel.commit().await;
        panel.set_frame(RenderedFrame::solid(2, 2, [0, 0, 0]), FrameOptions::default());
        assert_eq!(
            panel.commit().await,
            GatewayResponse::NotReady(Duration::from_secs(15))
        );
    }
}
