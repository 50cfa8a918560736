//! Color-space primitives shared by every generator.
//!
//! All functions here are pure. Channel inputs are 8-bit sRGB; luminance and
//! hue are computed in f32 without intermediate clamping.

use rgb::RGB8;

/// Format a color as a lowercase `#rrggbb` string, always 6 hex digits.
pub fn rgb_to_hex(color: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Parse a `#rrggbb` string (leading `#` optional).
///
/// Returns `None` on the wrong length or non-hex characters. Exact inverse of
/// [`rgb_to_hex`] for every 24-bit color.
pub fn hex_to_rgb(hex: &str) -> Option<RGB8> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(RGB8 { r, g, b })
}

/// ITU-R BT.601 luma: `0.299 R + 0.587 G + 0.114 B`. Range [0, 255].
#[inline]
pub fn luminance(color: RGB8) -> f32 {
    0.299 * color.r as f32 + 0.587 * color.g as f32 + 0.114 * color.b as f32
}

/// HSV hue in degrees, [0, 360). `None` for achromatic colors (r == g == b).
#[inline]
pub fn hue(color: RGB8) -> Option<f32> {
    let r = color.r as f32 / 255.0;
    let g = color.g as f32 / 255.0;
    let b = color.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return None;
    }

    let h = if max == r {
        let mut h = (g - b) / delta;
        if g < b {
            h += 6.0;
        }
        h * 60.0
    } else if max == g {
        ((b - r) / delta + 2.0) * 60.0
    } else {
        ((r - g) / delta + 4.0) * 60.0
    };

    Some(h % 360.0)
}

/// Whether the color lands in the warm hue arc: reds through yellows
/// ([0°, 60°]) plus the magenta wraparound ([300°, 360°)).
///
/// Achromatic colors have no hue and fall into the cool bucket; the
/// temperature map depends on that default.
pub fn is_warm(color: RGB8) -> bool {
    match hue(color) {
        Some(h) => (0.0..=60.0).contains(&h) || h >= 300.0,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_is_zero_padded() {
        assert_eq!(rgb_to_hex(RGB8 { r: 1, g: 2, b: 3 }), "#010203");
        assert_eq!(rgb_to_hex(RGB8 { r: 255, g: 255, b: 255 }), "#ffffff");
        assert_eq!(rgb_to_hex(RGB8 { r: 0, g: 0, b: 0 }), "#000000");
    }

    #[test]
    fn hex_well_formedness() {
        for color in [
            RGB8 { r: 0, g: 0, b: 0 },
            RGB8 { r: 9, g: 15, b: 16 },
            RGB8 { r: 128, g: 200, b: 255 },
        ] {
            let hex = rgb_to_hex(color);
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert!(hex[1..].bytes().all(|b| b.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn hex_round_trip() {
        // Sweep a lattice of the 24-bit cube instead of all 16M colors
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(17) {
                    let color = RGB8 {
                        r: r as u8,
                        g: g as u8,
                        b: b as u8,
                    };
                    assert_eq!(hex_to_rgb(&rgb_to_hex(color)), Some(color));
                }
            }
        }
    }

    #[test]
    fn hex_accepts_optional_hash_and_case() {
        let expected = Some(RGB8 { r: 255, g: 0, b: 170 });
        assert_eq!(hex_to_rgb("#ff00aa"), expected);
        assert_eq!(hex_to_rgb("ff00aa"), expected);
        assert_eq!(hex_to_rgb("#FF00AA"), expected);
    }

    #[test]
    fn hex_rejects_malformed_input() {
        assert_eq!(hex_to_rgb(""), None);
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#ff00aa0"), None);
        assert_eq!(hex_to_rgb("#ggijkl"), None);
        assert_eq!(hex_to_rgb("not a color"), None);
    }

    #[test]
    fn luminance_bounds() {
        assert_eq!(luminance(RGB8 { r: 0, g: 0, b: 0 }), 0.0);
        let white = luminance(RGB8 {
            r: 255,
            g: 255,
            b: 255,
        });
        assert!((white - 255.0).abs() < 1e-3);

        for r in (0..=255u16).step_by(51) {
            for g in (0..=255u16).step_by(51) {
                for b in (0..=255u16).step_by(51) {
                    let l = luminance(RGB8 {
                        r: r as u8,
                        g: g as u8,
                        b: b as u8,
                    });
                    assert!((0.0..=255.0).contains(&l));
                }
            }
        }
    }

    #[test]
    fn luminance_weights_green_heaviest() {
        let red = luminance(RGB8 { r: 255, g: 0, b: 0 });
        let green = luminance(RGB8 { r: 0, g: 255, b: 0 });
        let blue = luminance(RGB8 { r: 0, g: 0, b: 255 });
        assert!(green > red);
        assert!(red > blue);
        assert!((red - 76.245).abs() < 1e-3);
    }

    #[test]
    fn hue_of_primaries() {
        let hue_of = |r, g, b| hue(RGB8 { r, g, b }).unwrap();
        assert_eq!(hue_of(255, 0, 0), 0.0);
        assert_eq!(hue_of(255, 255, 0), 60.0);
        assert_eq!(hue_of(0, 255, 0), 120.0);
        assert_eq!(hue_of(0, 255, 255), 180.0);
        assert_eq!(hue_of(0, 0, 255), 240.0);
        assert_eq!(hue_of(255, 0, 255), 300.0);
    }

    #[test]
    fn warm_and_cool_examples() {
        assert!(is_warm(RGB8 { r: 255, g: 0, b: 0 })); // red
        assert!(is_warm(RGB8 { r: 255, g: 160, b: 0 })); // orange
        assert!(is_warm(RGB8 { r: 255, g: 255, b: 0 })); // yellow
        assert!(is_warm(RGB8 { r: 255, g: 0, b: 255 })); // magenta wraparound

        assert!(!is_warm(RGB8 { r: 0, g: 255, b: 0 })); // green
        assert!(!is_warm(RGB8 { r: 0, g: 0, b: 255 })); // blue
        assert!(!is_warm(RGB8 { r: 0, g: 255, b: 255 })); // cyan
    }

    #[test]
    fn achromatic_is_never_warm() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            assert!(!is_warm(RGB8 { r: v, g: v, b: v }));
            assert_eq!(hue(RGB8 { r: v, g: v, b: v }), None);
        }
    }
}
