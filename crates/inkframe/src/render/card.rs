//! Now-playing card.
//!
//! Layout on the 600x448 panel:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │        ┌──────────┐          │  blurred, darkened cover fills
//! │        │  cover   │          │  the background
//! │        │  300x300 │          │
//! │        └───────♥──┘          │  ♥ when the track is loved
//! │  Title                       │  y = 350, font stepped down to fit
//! │  Album                       │
//! │  Artist                      │
//! └──────────────────────────────┘
//! ```

use core::convert::Infallible;
use std::path::{Path, PathBuf};

use embedded_graphics::mono_font::ascii::{
    FONT_10X20, FONT_4X6, FONT_5X8, FONT_6X10, FONT_6X13_BOLD, FONT_7X13_BOLD, FONT_8X13_BOLD,
    FONT_9X15_BOLD, FONT_9X18_BOLD,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Triangle};
use embedded_graphics::text::{Baseline, Text};
use image::imageops::FilterType;
use image::RgbImage;
use platform::Track;

use super::canvas::Canvas;

/// Longest title, album or artist drawn before truncating with `...`.
pub const MAX_CHARS: usize = 50;

const MARGIN: u32 = 25;
const COVER_SIZE: u32 = 300;
const COVER_TOP: u32 = 25;
const LINE_GAP: i32 = 5;
const SHADOW_OFFSET: Point = Point::new(2, 2);

const HEART_SIZE: u32 = 50;
const HEART_INSET: u32 = 10;

const BACKGROUND: Rgb888 = Rgb888::new(40, 40, 40);
const LOVED: Rgb888 = Rgb888::new(30, 215, 96);
const DARKEN: f32 = 0.7;
const BLUR_SIGMA: f32 = 2.5;

/// Title fonts, largest first.
const FONTS: [&MonoFont<'static>; 9] = [
    &FONT_10X20,
    &FONT_9X18_BOLD,
    &FONT_9X15_BOLD,
    &FONT_8X13_BOLD,
    &FONT_7X13_BOLD,
    &FONT_6X13_BOLD,
    &FONT_6X10,
    &FONT_5X8,
    &FONT_4X6,
];

/// Subtitles sit two font steps below the title (roughly three quarters).
const SUBTITLE_STEP: usize = 2;

/// Cut `text` to [`MAX_CHARS`] characters, ending in `...` when cut.
pub fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CHARS {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(MAX_CHARS - 3).collect();
    out.push_str("...");
    out
}

/// Rendered width of `text` in `font`.
pub fn text_width(font: &MonoFont<'_>, text: &str) -> u32 {
    let chars = text.chars().count() as u32;
    chars * (font.character_size.width + font.character_spacing)
}

/// Index into the font list of the largest font that fits `text` in
/// `max_width`; the smallest font when none fits.
pub fn title_font_index(text: &str, max_width: u32) -> usize {
    FONTS
        .iter()
        .position(|font| text_width(font, text) <= max_width)
        .unwrap_or(FONTS.len() - 1)
}

/// Resolve a cover reference to a local file.
///
/// Accepts plain paths and `file://` URLs; remote URLs are not fetched.
pub fn local_path(reference: &str) -> Option<PathBuf> {
    if let Some(path) = reference.strip_prefix("file://") {
        return Some(PathBuf::from(path));
    }
    if reference.contains("://") || reference.is_empty() {
        return None;
    }
    Some(PathBuf::from(reference))
}

/// Top-left corner of the loved marker.
pub fn heart_origin(width: u32) -> Point {
    let cover_right = cover_left(width) + COVER_SIZE;
    Point::new(
        (cover_right - HEART_SIZE - HEART_INSET) as i32,
        (COVER_TOP + COVER_SIZE - HEART_SIZE - HEART_INSET) as i32,
    )
}

fn cover_left(width: u32) -> u32 {
    width.saturating_sub(COVER_SIZE) / 2
}

fn open_artwork(path: &Path) -> Option<image::DynamicImage> {
    match image::open(path) {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cover art unreadable, drawing without it");
            None
        }
    }
}

/// Draw the card for `track` at `width` x `height`.
pub fn draw(track: &Track, width: u32, height: u32) -> RgbImage {
    let large = track
        .album_cover_url_640px
        .as_deref()
        .or(track.album_cover_url_300px.as_deref())
        .and_then(local_path);
    let small = track
        .album_cover_url_300px
        .as_deref()
        .or(track.album_cover_url_640px.as_deref())
        .and_then(local_path);

    let mut canvas = match large.as_deref().and_then(open_artwork) {
        Some(art) => Canvas::from_image(background(&art, width, height)),
        None => Canvas::filled(width, height, BACKGROUND),
    };

    if let Some(art) = small.as_deref().and_then(open_artwork) {
        let cover = art
            .resize_to_fill(COVER_SIZE, COVER_SIZE, FilterType::Lanczos3)
            .to_rgb8();
        image::imageops::replace(
            canvas.image_mut(),
            &cover,
            i64::from(cover_left(width)),
            i64::from(COVER_TOP),
        );
    }

    let drawn = draw_loved(&mut canvas, track, width).and_then(|()| draw_info(&mut canvas, track, width));
    drawn.unwrap_or_else(|never| match never {});
    canvas.into_image()
}

fn background(art: &image::DynamicImage, width: u32, height: u32) -> RgbImage {
    let mut bg = art
        .resize_to_fill(width, height, FilterType::Triangle)
        .blur(BLUR_SIGMA)
        .to_rgb8();
    for px in bg.pixels_mut() {
        for c in &mut px.0 {
            *c = (f32::from(*c) * DARKEN) as u8;
        }
    }
    bg
}

fn draw_loved(canvas: &mut Canvas, track: &Track, width: u32) -> Result<(), Infallible> {
    if track.is_loved != Some(true) {
        return Ok(());
    }
    let origin = heart_origin(width);
    draw_heart(canvas, origin + SHADOW_OFFSET, Rgb888::BLACK)?;
    draw_heart(canvas, origin, LOVED)
}

fn draw_heart(canvas: &mut Canvas, at: Point, colour: Rgb888) -> Result<(), Infallible> {
    let style = PrimitiveStyle::with_fill(colour);
    let lobe = HEART_SIZE / 2 + 2;
    let size = HEART_SIZE as i32;
    Circle::new(at, lobe).into_styled(style).draw(canvas)?;
    Circle::new(at + Point::new(size - lobe as i32, 0), lobe)
        .into_styled(style)
        .draw(canvas)?;
    Triangle::new(
        at + Point::new(1, size / 3),
        at + Point::new(size - 1, size / 3),
        at + Point::new(size / 2, size - 2),
    )
    .into_styled(style)
    .draw(canvas)
}

fn draw_info(canvas: &mut Canvas, track: &Track, width: u32) -> Result<(), Infallible> {
    let title = truncate(&track.title);
    let album = truncate(&track.album);
    let artist = truncate(&track.artist);

    let index = title_font_index(&title, width.saturating_sub(MARGIN * 2));
    let title_font = FONTS[index];
    let subtitle_font = FONTS[(index + SUBTITLE_STEP).min(FONTS.len() - 1)];
    tracing::debug!(
        title_font_height = title_font.character_size.height,
        subtitle_font_height = subtitle_font.character_size.height,
        title_chars = title.chars().count(),
        "card fonts"
    );

    let x = MARGIN as i32;
    let mut y = (COVER_TOP + COVER_SIZE + MARGIN) as i32;
    shadowed_text(canvas, &title, title_font, Point::new(x, y))?;
    y += title_font.character_size.height as i32 + LINE_GAP;
    shadowed_text(canvas, &album, subtitle_font, Point::new(x, y))?;
    y += subtitle_font.character_size.height as i32 + LINE_GAP;
    shadowed_text(canvas, &artist, subtitle_font, Point::new(x, y))
}

fn shadowed_text(
    canvas: &mut Canvas,
    text: &str,
    font: &MonoFont<'_>,
    at: Point,
) -> Result<(), Infallible> {
    if text.is_empty() {
        return Ok(());
    }
    let shadow = MonoTextStyle::new(font, Rgb888::BLACK);
    let fill = MonoTextStyle::new(font, Rgb888::WHITE);
    Text::with_baseline(text, at + SHADOW_OFFSET, shadow, Baseline::Top).draw(canvas)?;
    Text::with_baseline(text, at, fill, Baseline::Top).draw(canvas)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("Hey Jude"), "Hey Jude");
        assert_eq!(truncate(&"x".repeat(50)), "x".repeat(50));
    }

    #[test]
    fn test_truncate_long_text_ends_with_ellipsis() {
        let cut = truncate(&"y".repeat(51));
        assert_eq!(cut.chars().count(), 50);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let cut = truncate(&"é".repeat(60));
        assert_eq!(cut.chars().count(), 50);
    }

    #[test]
    fn test_title_font_steps_down_to_fit() {
        let title = "w".repeat(50);
        assert_eq!(title_font_index(&title, 550), 0);
        let index = title_font_index(&title, 400);
        assert!(index > 0);
        assert!(text_width(FONTS[index], &title) <= 400);
    }

    #[test]
    fn test_title_font_smallest_when_nothing_fits() {
        assert_eq!(title_font_index(&"w".repeat(50), 10), FONTS.len() - 1);
    }

    #[test]
    fn test_local_path_accepts_files_only() {
        assert_eq!(local_path("file:///tmp/a.jpg"), Some(PathBuf::from("/tmp/a.jpg")));
        assert_eq!(local_path("/tmp/a.jpg"), Some(PathBuf::from("/tmp/a.jpg")));
        assert_eq!(local_path("https://i.scdn.co/image/abc"), None);
        assert_eq!(local_path(""), None);
    }

    #[test]
    fn test_card_has_panel_size() {
        let img = draw(&Track::new("Song", "Album", &["Artist"]), 600, 448);
        assert_eq!(img.dimensions(), (600, 448));
    }

    #[test]
    fn test_loved_marker_drawn_only_when_loved() {
        let origin = heart_origin(600);
        let centre = (
            (origin.x + HEART_SIZE as i32 / 2) as u32,
            (origin.y + HEART_SIZE as i32 / 2) as u32,
        );

        let mut loved = Track::new("Song", "Album", &["Artist"]);
        loved.is_loved = Some(true);
        let img = draw(&loved, 600, 448);
        assert_eq!(img.get_pixel(centre.0, centre.1).0, [30, 215, 96]);

        let img = draw(&Track::new("Song", "Album", &["Artist"]), 600, 448);
        assert_eq!(img.get_pixel(centre.0, centre.1).0, [40, 40, 40]);
    }

    #[test]
    fn test_missing_cover_falls_back_to_plain_background() {
        let mut track = Track::new("Song", "", &[]);
        track.album_cover_url_300px = Some("/definitely/not/here.jpg".into());
        let img = draw(&track, 600, 448);
        assert_eq!(img.get_pixel(5, 5).0, [40, 40, 40]);
    }
}
