//! HSL helpers and saturation adjustment for committed frames.

use platform::RenderedFrame;

/// HSL luminosity of a normalised RGB triple.
pub fn luminosity(r: f32, g: f32, b: f32) -> f32 {
    0.5 * (r.max(g).max(b) + r.min(g).min(b))
}

/// HSL saturation of a normalised RGB triple.
///
/// Black and white (luminosity 0 or 1) have no saturation.
pub fn hsl_saturation(r: f32, g: f32, b: f32) -> f32 {
    let l = luminosity(r, g, b);
    if l <= 0.0 || l >= 1.0 {
        return 0.0;
    }
    let chroma = r.max(g).max(b) - r.min(g).min(b);
    chroma / (1.0 - (2.0 * l - 1.0).abs())
}

fn normalise(px: &[u8]) -> (f32, f32, f32) {
    match px {
        [r, g, b] => (f32::from(*r) / 255.0, f32::from(*g) / 255.0, f32::from(*b) / 255.0),
        _ => (0.0, 0.0, 0.0),
    }
}

/// Mean HSL saturation over every pixel of `frame`.
pub fn mean_saturation(frame: &RenderedFrame) -> f32 {
    let pixels = frame.as_rgb().chunks_exact(3);
    let count = pixels.len();
    if count == 0 {
        return 0.0;
    }
    let total: f64 = pixels
        .map(|px| {
            let (r, g, b) = normalise(px);
            f64::from(hsl_saturation(r, g, b))
        })
        .sum();
    (total / count as f64) as f32
}

/// Saturation to drive the panel with for this frame.
///
/// Colourful frames get less push and washed-out frames get more.
pub fn dynamic_saturation(frame: &RenderedFrame) -> f32 {
    (1.0 - mean_saturation(frame)).clamp(0.0, 1.0)
}

/// Blend every pixel between its grey level (`0.0`) and its own colour
/// (`1.0`).
pub fn apply(frame: &RenderedFrame, saturation: f32) -> Vec<u8> {
    let s = saturation.clamp(0.0, 1.0);
    let mut out = Vec::with_capacity(frame.as_rgb().len());
    for px in frame.as_rgb().chunks_exact(3) {
        let (r, g, b) = (f32::from(px[0]), f32::from(px[1]), f32::from(px[2]));
        // Rec. 601 luma
        let grey = 0.299 * r + 0.587 * g + 0.114 * b;
        for c in [r, g, b] {
            out.push((grey + (c - grey) * s).round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}
