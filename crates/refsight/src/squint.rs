//! Progressive blur ("squint") levels.
//!
//! Four renditions of the full-resolution image at increasing blur strength,
//! simulating the squint test painters use to judge large value shapes. Two
//! strategies exist because heavy gaussian filtering over a large canvas is
//! slow or silently unsupported on constrained hosts: those get a downscaled
//! canvas, lighter radii, and a manual overlay approximation as a fallback
//! when the filter no-ops.

use crate::raster::RasterBuffer;
use image::imageops;

/// Number of blur levels per analysis, lightest first.
pub const LEVEL_COUNT: usize = 4;

/// Blur radii per tier.
const DESKTOP_RADII: [f32; LEVEL_COUNT] = [16.0, 32.0, 48.0, 64.0];
const CONSTRAINED_RADII: [f32; LEVEL_COUNT] = [4.0, 8.0, 12.0, 16.0];

/// Longest canvas side for the constrained tier.
const CONSTRAINED_MAX_DIM: u32 = 400;

/// Overlay fallback tuning: per-draw opacity and the pass ceiling.
const OVERLAY_ALPHA: f32 = 0.3;
const OVERLAY_MAX_PASSES: u32 = 8;

/// User-agent substrings that mark a mobile platform.
const MOBILE_UA_KEYWORDS: [&str; 7] = [
    "android",
    "iphone",
    "ipad",
    "ipod",
    "webos",
    "blackberry",
    "windows phone",
];

/// Viewport width at or below this, combined with touch input, counts as
/// constrained.
const NARROW_VIEWPORT_MAX: u32 = 768;

/// How capable the display host is. Blur generation is a pure function of
/// this tier; hosts decide the tier however they like, [`classify`] covers
/// the common case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityTier {
    /// Full-resolution gaussian blur at heavy radii.
    Desktop,
    /// Downscaled canvas, light radii, overlay fallback on filter no-op.
    Constrained,
}

/// Facts about the display host, for callers that have them.
#[derive(Debug, Clone, Default)]
pub struct DisplayEnvironment {
    pub user_agent: String,
    pub has_touch: bool,
    pub viewport_width: u32,
}

/// A mobile user-agent keyword alone, or touch input on a narrow viewport,
/// routes to the constrained tier.
pub fn classify(env: &DisplayEnvironment) -> CapabilityTier {
    let ua = env.user_agent.to_lowercase();
    if MOBILE_UA_KEYWORDS.iter().any(|kw| ua.contains(kw)) {
        return CapabilityTier::Constrained;
    }
    if env.has_touch && env.viewport_width <= NARROW_VIEWPORT_MAX {
        return CapabilityTier::Constrained;
    }
    CapabilityTier::Desktop
}

/// Produce the four blur levels for `full`, lightest first.
pub fn generate(full: &RasterBuffer, tier: CapabilityTier) -> Vec<RasterBuffer> {
    let (source, radii) = match tier {
        CapabilityTier::Desktop => (full.clone(), DESKTOP_RADII),
        CapabilityTier::Constrained => (full.scale_to_fit(CONSTRAINED_MAX_DIM), CONSTRAINED_RADII),
    };

    radii
        .iter()
        .map(|&radius| blur_level(&source, radius, tier))
        .collect()
}

fn blur_level(source: &RasterBuffer, radius: f32, tier: CapabilityTier) -> RasterBuffer {
    let blurred = RasterBuffer::from_image(imageops::blur(&source.to_image(), radius));
    if tier == CapabilityTier::Constrained && filter_nooped(source, &blurred) {
        tracing::warn!(radius, "blur left the canvas empty, using overlay fallback");
        return overlay_blur(source, radius);
    }
    blurred
}

/// A silently failed filter leaves the probe pixel fully transparent black
/// where the source wasn't.
fn filter_nooped(source: &RasterBuffer, blurred: &RasterBuffer) -> bool {
    let x = source.width() / 2;
    let y = source.height() / 2;
    let zero = |raster: &RasterBuffer| match raster.pixel(x, y) {
        Some((rgb, alpha)) => rgb.r == 0 && rgb.g == 0 && rgb.b == 0 && alpha == 0,
        None => false,
    };
    zero(blurred) && !zero(source)
}

/// Approximate a blur by drawing the source over itself `1..=min(radius, 8)`
/// times, shifted half a pixel further along each diagonal per pass, at 0.3
/// opacity per draw.
fn overlay_blur(source: &RasterBuffer, radius: f32) -> RasterBuffer {
    let passes = (radius.round() as u32).clamp(1, OVERLAY_MAX_PASSES);
    let width = source.width() as usize;
    let height = source.height() as usize;

    // f32 canvas seeded with the unblurred source
    let mut canvas: Vec<f32> = source.data().iter().map(|&v| v as f32).collect();

    for pass in 1..=passes {
        let offset = 0.5 * pass as f32;
        for (dx, dy) in [
            (offset, offset),
            (-offset, offset),
            (offset, -offset),
            (-offset, -offset),
        ] {
            composite_shifted(&mut canvas, source.data(), width, height, dx, dy);
        }
    }

    let data: Vec<u8> = canvas
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    RasterBuffer::from_parts(source.width(), source.height(), data)
}

/// dst = shifted-src * alpha + dst * (1 - alpha), bilinear at subpixel
/// offsets, edge-clamped.
fn composite_shifted(canvas: &mut [f32], src: &[u8], width: usize, height: usize, dx: f32, dy: f32) {
    for y in 0..height {
        for x in 0..width {
            let sampled = bilinear(src, width, height, x as f32 - dx, y as f32 - dy);
            let i = (y * width + x) * 4;
            for c in 0..4 {
                canvas[i + c] = sampled[c] * OVERLAY_ALPHA + canvas[i + c] * (1.0 - OVERLAY_ALPHA);
            }
        }
    }
}

fn bilinear(src: &[u8], width: usize, height: usize, x: f32, y: f32) -> [f32; 4] {
    let x = x.clamp(0.0, (width - 1) as f32);
    let y = y.clamp(0.0, (height - 1) as f32);
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let mut out = [0f32; 4];
    for (c, value) in out.iter_mut().enumerate() {
        let p00 = src[(y0 * width + x0) * 4 + c] as f32;
        let p10 = src[(y0 * width + x1) * 4 + c] as f32;
        let p01 = src[(y1 * width + x0) * 4 + c] as f32;
        let p11 = src[(y1 * width + x1) * 4 + c] as f32;
        let top = p00 + (p10 - p00) * fx;
        let bottom = p01 + (p11 - p01) * fx;
        *value = top + (bottom - top) * fy;
    }
    out
}
