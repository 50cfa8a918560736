//! Per-pixel value and temperature renditions.
//!
//! Both generators are pixel-local: they read one input pixel, write one
//! output pixel, and allocate a fresh buffer so the shared input raster
//! stays untouched for the other generators.

use crate::color;
use crate::raster::RasterBuffer;
use rgb::RGB8;

// Temperature tint shifts, saturating at the channel bounds.
const WARM_R_BOOST: u8 = 50;
const WARM_G_CUT: u8 = 20;
const WARM_B_CUT: u8 = 20;
const COOL_R_CUT: u8 = 20;
const COOL_G_CUT: u8 = 10;
const COOL_B_BOOST: u8 = 50;

/// Grayscale luminance rendition: R = G = B = BT.601 luma, alpha unchanged.
pub fn value_map(raster: &RasterBuffer) -> RasterBuffer {
    let mut out = Vec::with_capacity(raster.data().len());
    for px in raster.data().chunks_exact(4) {
        let lum = color::luminance(RGB8 {
            r: px[0],
            g: px[1],
            b: px[2],
        })
        .round() as u8;
        out.extend_from_slice(&[lum, lum, lum, px[3]]);
    }
    RasterBuffer::from_parts(raster.width(), raster.height(), out)
}

/// Warm/cool tinted rendition, alpha unchanged.
///
/// Warm pixels push toward red, everything else (including grays, which
/// [`color::is_warm`] puts in the cool bucket) pushes toward blue.
pub fn temperature_map(raster: &RasterBuffer) -> RasterBuffer {
    let mut out = Vec::with_capacity(raster.data().len());
    for px in raster.data().chunks_exact(4) {
        let rgb = RGB8 {
            r: px[0],
            g: px[1],
            b: px[2],
        };
        let tinted = if color::is_warm(rgb) {
            [
                rgb.r.saturating_add(WARM_R_BOOST),
                rgb.g.saturating_sub(WARM_G_CUT),
                rgb.b.saturating_sub(WARM_B_CUT),
                px[3],
            ]
        } else {
            [
                rgb.r.saturating_sub(COOL_R_CUT),
                rgb.g.saturating_sub(COOL_G_CUT),
                rgb.b.saturating_add(COOL_B_BOOST),
                px[3],
            ]
        };
        out.extend_from_slice(&tinted);
    }
    RasterBuffer::from_parts(raster.width(), raster.height(), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raster_of(pixels: &[[u8; 4]], width: u32) -> RasterBuffer {
        let height = pixels.len() as u32 / width;
        let data: Vec<u8> = pixels.iter().flatten().copied().collect();
        RasterBuffer::from_bytes(width, height, data).unwrap()
    }

    #[test]
    fn value_map_is_grayscale_with_preserved_alpha() {
        let input = raster_of(
            &[
                [255, 0, 0, 255],
                [0, 255, 0, 128],
                [0, 0, 255, 7],
                [30, 60, 90, 0],
            ],
            2,
        );
        let out = value_map(&input);
        assert_eq!(out.width(), 2);
        assert_eq!(out.height(), 2);

        for (px, src) in out.data().chunks_exact(4).zip(input.data().chunks_exact(4)) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], src[3]);
        }
    }

    #[test]
    fn value_map_known_luminances() {
        let input = raster_of(&[[255, 0, 0, 255], [255, 255, 255, 255]], 2);
        let out = value_map(&input);
        // round(0.299 * 255) = 76
        assert_eq!(out.data()[0], 76);
        assert_eq!(out.data()[4], 255);
    }

    #[test]
    fn temperature_map_tints_warm_and_cool() {
        let input = raster_of(&[[200, 100, 40, 255], [40, 100, 200, 255]], 2);
        let out = temperature_map(&input);

        // Orange (hue ~22) is warm
        assert_eq!(&out.data()[0..4], &[250, 80, 20, 255]);
        // Blue (hue ~217) is cool
        assert_eq!(&out.data()[4..8], &[20, 90, 250, 255]);
    }

    #[test]
    fn temperature_map_clamps_at_extremes() {
        let input = raster_of(
            &[
                [255, 0, 0, 255],     // warm, R and the cuts both saturate
                [0, 0, 255, 255],     // cool, B saturates
                [255, 255, 0, 255],   // warm yellow
                [255, 255, 255, 255], // achromatic white -> cool
            ],
            4,
        );
        let out = temperature_map(&input);

        assert_eq!(&out.data()[0..4], &[255, 0, 0, 255]);
        assert_eq!(&out.data()[4..8], &[0, 0, 255, 255]);
        assert_eq!(&out.data()[8..12], &[255, 235, 0, 255]);
        assert_eq!(&out.data()[12..16], &[235, 245, 255, 255]);
    }

    #[test]
    fn achromatic_pixels_take_the_cool_branch() {
        let input = raster_of(&[[128, 128, 128, 200]], 1);
        let out = temperature_map(&input);
        assert_eq!(&out.data()[0..4], &[108, 118, 178, 200]);
    }

    #[test]
    fn maps_preserve_dimensions_on_transparent_input() {
        let input = raster_of(&[[0, 0, 0, 0]; 8], 4);
        assert_eq!(value_map(&input).width(), 4);
        assert_eq!(value_map(&input).height(), 2);
        assert_eq!(temperature_map(&input).width(), 4);
        assert_eq!(temperature_map(&input).height(), 2);
    }
}
