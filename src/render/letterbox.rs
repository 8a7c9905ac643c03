//! Fit an image into a fixed display canvas without distortion.

use super::surface::{RasterSurface, ResampleQuality};

/// Default preview canvas size (width, height).
pub const DEFAULT_DISPLAY_SIZE: (u32, u32) = (1920, 1080);

/// Gray level used for the padding around a letterboxed image.
pub const DEFAULT_BACKGROUND_GRAY: u8 = 128;

/// Size of `source` after uniform scaling to fit inside `target`.
///
/// Dimensions are truncated and clamped to `1..=target` on each axis.
pub fn fit_size(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (dst_w, dst_h) = target;
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return (0, 0);
    }

    let scale = (dst_w as f64 / src_w as f64).min(dst_h as f64 / src_h as f64);
    let new_w = ((src_w as f64 * scale) as u32).clamp(1, dst_w);
    let new_h = ((src_h as f64 * scale) as u32).clamp(1, dst_h);
    (new_w, new_h)
}

/// Scale `source` into a `target`-sized canvas filled with `background`, centered.
///
/// The returned canvas is always exactly `target`. When the leftover space on
/// an axis is odd, the top/left padding gets the smaller share.
pub fn letterbox<S: RasterSurface>(
    source: &S,
    target: (u32, u32),
    background: S::Color,
    quality: ResampleQuality,
) -> S {
    let mut canvas = S::filled(target.0, target.1, background);

    let (new_w, new_h) = fit_size(source.dimensions(), target);
    if new_w == 0 || new_h == 0 {
        return canvas;
    }

    let resized = source.resize(new_w, new_h, quality);
    let x_offset = (target.0 - new_w) / 2;
    let y_offset = (target.1 - new_h) / 2;
    canvas.blit(&resized, (i64::from(x_offset), i64::from(y_offset)));

    tracing::debug!(
        "Letterboxed {:?} -> {}x{} at offset ({}, {}) on {}x{} canvas",
        source.dimensions(),
        new_w,
        new_h,
        x_offset,
        y_offset,
        target.0,
        target.1
    );

    canvas
}
