//! Live single-pixel sampling behind the interactive color picker.
//!
//! Fires on every pointer move, so it must stay a single pixel read against
//! an already-decoded raster. Each result simply supersedes the previous
//! one; callers keep the latest and drop the rest.

use crate::color;
use crate::raster::RasterBuffer;
use rgb::RGB8;

/// The color under the pointer, in image-space coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPixelColor {
    pub hex: String,
    pub rgb: RGB8,
    pub x: u32,
    pub y: u32,
}

/// Sample the raster pixel under a display-space pointer position.
///
/// The raster is assumed to be rendered aspect-fit (letterboxed) inside a
/// `display_w` by `display_h` rectangle, so the pointer position is scaled
/// by the ratio of native to rendered size after removing the centering
/// offset. Returns `None` when the pointer sits in the letterbox bars,
/// outside the rectangle, or the rectangle is degenerate.
pub fn sample_at(
    raster: &RasterBuffer,
    display_x: f32,
    display_y: f32,
    display_w: f32,
    display_h: f32,
) -> Option<SelectedPixelColor> {
    if display_w <= 0.0 || display_h <= 0.0 {
        return None;
    }

    let scale = (display_w / raster.width() as f32).min(display_h / raster.height() as f32);
    let rendered_w = raster.width() as f32 * scale;
    let rendered_h = raster.height() as f32 * scale;
    let offset_x = (display_w - rendered_w) / 2.0;
    let offset_y = (display_h - rendered_h) / 2.0;

    let image_x = (display_x - offset_x) / scale;
    let image_y = (display_y - offset_y) / scale;
    if image_x < 0.0 || image_y < 0.0 {
        return None;
    }

    let x = image_x.floor() as u32;
    let y = image_y.floor() as u32;
    let (rgb, _alpha) = raster.pixel(x, y)?;

    Some(SelectedPixelColor {
        hex: color::rgb_to_hex(rgb),
        rgb,
        x,
        y,
    })
}
