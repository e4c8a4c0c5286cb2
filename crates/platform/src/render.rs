//! Renderer abstraction and the frame type it produces.

/// Turns a content reference into pixels for the panel.
///
/// Implementations are pure functions of the reference plus their own
/// out-of-band configuration (panel size, fonts). A failure means a broken
/// dependency and is treated as fatal by the schedulers.
pub trait Renderer<C> {
    /// Error type for render failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Render `content` into a full-panel frame.
    fn render(
        &mut self,
        content: &C,
    ) -> impl core::future::Future<Output = Result<RenderedFrame, Self::Error>>;
}

/// A packed RGB888 frame, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl RenderedFrame {
    /// Wrap raw RGB888 bytes.
    ///
    /// Returns `None` when `rgb.len()` is not `width * height * 3`.
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(3)?;
        (rgb.len() == expected).then_some(Self { width, height, rgb })
    }

    /// A frame filled with one colour.
    pub fn solid(width: u32, height: u32, colour: [u8; 3]) -> Self {
        let pixels = width as usize * height as usize;
        let rgb = colour.iter().copied().cycle().take(pixels * 3).collect();
        Self { width, height, rgb }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB888 bytes.
    pub fn as_rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Consume the frame and return its bytes.
    pub fn into_rgb(self) -> Vec<u8> {
        self.rgb
    }

    /// Colour at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 3;
        match self.rgb.get(at..at + 3) {
            Some([r, g, b]) => Some([*r, *g, *b]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RenderedFrame;

    #[test]
    fn test_from_rgb_rejects_wrong_length() {
        assert!(RenderedFrame::from_rgb(2, 2, vec![0; 11]).is_none());
        assert!(RenderedFrame::from_rgb(2, 2, vec![0; 12]).is_some());
    }

    #[test]
    fn test_solid_fills_every_pixel() {
        let frame = RenderedFrame::solid(3, 2, [1, 2, 3]);
        assert_eq!(frame.as_rgb().len(), 18);
        assert_eq!(frame.pixel(2, 1), Some([1, 2, 3]));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let frame = RenderedFrame::solid(3, 2, [0, 0, 0]);
        assert_eq!(frame.pixel(3, 0), None);
        assert_eq!(frame.pixel(0, 2), None);
    }
}
