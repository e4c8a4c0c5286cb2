//! Renderers for the host: picture files and now-playing cards.
//!
//! Decoding and composition are CPU-bound, so both run on tokio's blocking
//! pool and the scheduler task only awaits the finished frame.

pub mod canvas;
pub mod card;

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::RgbImage;
use platform::config::{PANEL_HEIGHT, PANEL_WIDTH};
use platform::{PictureRef, RenderedFrame, Renderer, Track};

/// Render failures. The schedulers treat every one as fatal.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A picture file could not be opened or decoded.
    #[error("cannot decode {}", path.display())]
    Decode {
        /// Picture that failed.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },
    /// The composed image does not match the panel geometry.
    #[error("rendered image is {width}x{height}, not a packed RGB frame")]
    FrameSize {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// The blocking render task panicked or was cancelled.
    #[error("render task failed")]
    Task(#[from] tokio::task::JoinError),
}

/// Renders pictures and tracks at a fixed panel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRenderer {
    width: u32,
    height: u32,
}

impl FrameRenderer {
    /// Renderer for a `width` x `height` panel.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Panel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Panel height.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new(PANEL_WIDTH, PANEL_HEIGHT)
    }
}

/// Decode `path`, scale it to cover the panel and crop the overflow evenly.
pub fn render_picture(path: &Path, width: u32, height: u32) -> Result<RenderedFrame, RenderError> {
    let img = image::open(path).map_err(|source| RenderError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let filled = img.resize_to_fill(width, height, FilterType::Lanczos3).to_rgb8();
    into_frame(filled)
}

fn into_frame(img: RgbImage) -> Result<RenderedFrame, RenderError> {
    let (width, height) = img.dimensions();
    RenderedFrame::from_rgb(width, height, img.into_raw())
        .ok_or(RenderError::FrameSize { width, height })
}

impl Renderer<PictureRef> for FrameRenderer {
    type Error = RenderError;

    async fn render(&mut self, content: &PictureRef) -> Result<RenderedFrame, Self::Error> {
        let path = content.path().to_path_buf();
        let (width, height) = (self.width, self.height);
        tracing::debug!(picture = %content, "decoding picture");
        tokio::task::spawn_blocking(move || render_picture(&path, width, height)).await?
    }
}

impl Renderer<Track> for FrameRenderer {
    type Error = RenderError;

    async fn render(&mut self, content: &Track) -> Result<RenderedFrame, Self::Error> {
        let track = content.clone();
        let (width, height) = (self.width, self.height);
        tracing::debug!(track = %content, "drawing now-playing card");
        let img = tokio::task::spawn_blocking(move || card::draw(&track, width, height)).await?;
        into_frame(img)
    }
}
