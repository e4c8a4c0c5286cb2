//! Frame renderer against real image files.
#![allow(clippy::expect_used)]

use std::path::Path;

use image::{Rgb, RgbImage};
use inkframe::{FrameRenderer, RenderError};
use platform::{PictureRef, Renderer, Track};

fn write_png(path: &Path, width: u32, height: u32, colour: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(colour))
        .save(path)
        .expect("write png");
}

fn near(a: [u8; 3], b: [u8; 3]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
}

#[tokio::test]
async fn test_picture_scaled_to_panel() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("wide.png");
    write_png(&path, 1200, 400, [0, 128, 255]);

    let mut renderer = FrameRenderer::default();
    let frame = renderer.render(&PictureRef::new(&path)).await.expect("render");
    assert_eq!((frame.width(), frame.height()), (600, 448));
    assert!(near(frame.pixel(300, 224).expect("centre"), [0, 128, 255]));
}

#[tokio::test]
async fn test_picture_centre_cropped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tall.png");
    // Red band top and bottom, green middle; scaling to 60x40 crops the bands.
    let mut img = RgbImage::from_pixel(60, 120, Rgb([0, 255, 0]));
    for y in (0..20).chain(100..120) {
        for x in 0..60 {
            img.put_pixel(x, y, Rgb([255, 0, 0]));
        }
    }
    img.save(&path).expect("write png");

    let mut renderer = FrameRenderer::new(60, 40);
    let frame = renderer.render(&PictureRef::new(&path)).await.expect("render");
    assert!(near(frame.pixel(30, 2).expect("top"), [0, 255, 0]));
    assert!(near(frame.pixel(30, 37).expect("bottom"), [0, 255, 0]));
}

#[tokio::test]
async fn test_undecodable_picture_is_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"not a jpeg").expect("write");

    let mut renderer = FrameRenderer::default();
    let err = renderer.render(&PictureRef::new(&path)).await.expect_err("must fail");
    assert!(matches!(err, RenderError::Decode { .. }));
}

#[tokio::test]
async fn test_track_card_uses_local_cover() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cover = dir.path().join("cover.png");
    write_png(&cover, 300, 300, [200, 30, 30]);

    let mut track = Track::new("Song", "Album", &["Artist"]);
    track.album_cover_url_300px = Some(format!("file://{}", cover.display()));

    let mut renderer = FrameRenderer::default();
    let frame = renderer.render(&track).await.expect("render");
    assert_eq!((frame.width(), frame.height()), (600, 448));
    // Middle of the cover, clear of any text.
    assert!(near(frame.pixel(300, 150).expect("cover"), [200, 30, 30]));
    // Background is the darkened cover.
    assert!(near(frame.pixel(20, 20).expect("background"), [140, 21, 21]));
}
