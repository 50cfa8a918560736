//! Sparse pixel sampling feeding the quantizer.

use crate::raster::RasterBuffer;

/// Every 8th pixel (32 bytes of RGBA) is considered. The stride is part of
/// the palette contract: cluster counts are counts of sampled pixels, not of
/// all pixels, and changing the stride changes them.
const SAMPLE_PIXEL_STRIDE: usize = 8;

/// Pixels with alpha below this are treated as transparent and excluded from
/// dominant-color consideration.
const MIN_OPAQUE_ALPHA: u8 = 128;

/// Sampled colors in structure-of-arrays layout, channels on the 0-255 scale.
#[derive(Debug, Default)]
pub struct SampledRgbSoA {
    pub r: Vec<f32>,
    pub g: Vec<f32>,
    pub b: Vec<f32>,
}

impl SampledRgbSoA {
    pub fn with_capacity(sample_size: usize) -> Self {
        Self {
            r: Vec::with_capacity(sample_size),
            g: Vec::with_capacity(sample_size),
            b: Vec::with_capacity(sample_size),
        }
    }

    #[inline(always)]
    pub fn push(&mut self, r: f32, g: f32, b: f32) {
        self.r.push(r);
        self.g.push(g);
        self.b.push(b);
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }
}

/// Collect roughly one in eight opaque pixels from the raster.
///
/// A fully transparent raster yields an empty sample; the quantizer turns
/// that into an empty palette rather than an error.
pub fn sample(raster: &RasterBuffer) -> SampledRgbSoA {
    let data = raster.data();
    let capacity = data.len() / (SAMPLE_PIXEL_STRIDE * 4) + 1;
    let mut result = SampledRgbSoA::with_capacity(capacity);

    for px in data.chunks_exact(4).step_by(SAMPLE_PIXEL_STRIDE) {
        if px[3] < MIN_OPAQUE_ALPHA {
            continue;
        }
        result.push(px[0] as f32, px[1] as f32, px[2] as f32);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raster(width: u32, height: u32, rgba: [u8; 4]) -> RasterBuffer {
        let data: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        RasterBuffer::from_bytes(width, height, data).unwrap()
    }

    fn assert_all_len(soa: &SampledRgbSoA, len: usize) {
        assert_eq!(soa.r.len(), len);
        assert_eq!(soa.g.len(), len);
        assert_eq!(soa.b.len(), len);
    }

    #[test]
    fn with_capacity_allocates() {
        let soa = SampledRgbSoA::with_capacity(100);
        assert_eq!(soa.r.capacity(), 100);
        assert_all_len(&soa, 0);
    }

    #[test]
    fn push_adds_values() {
        let mut soa = SampledRgbSoA::with_capacity(2);
        soa.push(255.0, 0.0, 10.0);
        soa.push(0.0, 128.0, 20.0);
        assert_eq!(soa.r, vec![255.0, 0.0]);
        assert_eq!(soa.g, vec![0.0, 128.0]);
        assert_eq!(soa.b, vec![10.0, 20.0]);
    }

    #[test]
    fn stride_takes_one_in_eight() {
        // 100 pixels -> indices 0, 8, ..., 96 -> 13 samples
        let result = sample(&raster(10, 10, [50, 60, 70, 255]));
        assert_all_len(&result, 13);
        assert_eq!(result.r[0], 50.0);
        assert_eq!(result.g[0], 60.0);
        assert_eq!(result.b[0], 70.0);
    }

    #[test]
    fn single_pixel_image() {
        let result = sample(&raster(1, 1, [1, 2, 3, 255]));
        assert_all_len(&result, 1);
    }

    #[test]
    fn skips_translucent_pixels() {
        // Alpha 127 is under the threshold, 128 is at it
        let mut data = [10u8, 10, 10, 127].repeat(16);
        data[3] = 128; // pixel 0 barely opaque
        let result = sample(&RasterBuffer::from_bytes(4, 4, data).unwrap());
        // Pixels 0 and 8 are sampled, pixel 8 is translucent
        assert_all_len(&result, 1);
    }

    #[test]
    fn fully_transparent_yields_empty() {
        let result = sample(&raster(8, 8, [255, 255, 255, 0]));
        assert!(result.is_empty());
        assert_all_len(&result, 0);
    }
}
