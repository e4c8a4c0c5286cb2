//! `embedded-graphics` draw target backed by an RGB image buffer.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use image::{Rgb, RgbImage};

/// Framebuffer the now-playing card is drawn into.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// A canvas filled with `colour`.
    pub fn filled(width: u32, height: u32, colour: Rgb888) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, to_rgb(colour)),
        }
    }

    /// Draw on top of an existing image.
    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    /// Direct access for raster operations (paste, blur).
    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }

    /// Colour at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.image
            .get_pixel_checked(x, y)
            .map(|p| Rgb888::new(p[0], p[1], p[2]))
    }

    /// Finish drawing.
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

fn to_rgb(colour: Rgb888) -> Rgb<u8> {
    Rgb([colour.r(), colour.g(), colour.b()])
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, colour) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x < self.image.width() && y < self.image.height() {
                self.image.put_pixel(x, y, to_rgb(colour));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_draw_clips_to_bounds() {
        let mut canvas = Canvas::filled(4, 4, Rgb888::BLACK);
        let _ = Rectangle::new(Point::new(-2, -2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::WHITE))
            .draw(&mut canvas);
        assert_eq!(canvas.pixel(1, 1), Some(Rgb888::WHITE));
        assert_eq!(canvas.pixel(2, 2), Some(Rgb888::BLACK));
    }
}
