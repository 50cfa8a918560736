//! Minimal RGBA raster abstraction.
//!
//! Everything the pipeline needs from a decoded image lives here: validated
//! construction, pixel reads, the bounded working downscale, and PNG
//! encoding. Analysis modules never touch the `image` crate directly, so
//! they stay unit-testable against synthetic in-memory buffers.

use crate::error::{
    AnalyzeError, DecodeSnafu, EmptyBufferSnafu, EncodeSnafu, ImageSizeMismatchSnafu,
    InvalidBufferLengthSnafu, RasterError, ZeroImageSizeSnafu,
};
use image::{imageops, RgbaImage};
use rgb::RGB8;
use snafu::prelude::*;

/// Longest side of the working buffer used for palette and map generation.
/// Squint levels and the picker always consume the full-resolution raster.
pub const WORKING_MAX_DIM: u32 = 500;

/// A rectangular RGBA8 pixel grid. Invariant: `width * height * 4 == data.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Build a raster from raw interleaved RGBA bytes, validating the size
    /// invariant.
    pub fn from_bytes(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        ensure!(!data.is_empty(), EmptyBufferSnafu);
        ensure!(width > 0 && height > 0, ZeroImageSizeSnafu);
        ensure!(
            data.len().is_multiple_of(4),
            InvalidBufferLengthSnafu { len: data.len() }
        );
        ensure!(
            data.len() == width as usize * height as usize * 4,
            ImageSizeMismatchSnafu {
                width,
                height,
                buf_size: data.len()
            }
        );

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode encoded image bytes (JPEG, PNG, WebP, ...) into a raster.
    pub fn decode(bytes: &[u8]) -> Result<Self, AnalyzeError> {
        let image = image::load_from_memory(bytes).context(DecodeSnafu)?;
        Ok(Self::from_image(image.to_rgba8()))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }

    /// Rebuild a raster that preserves the dimensions of an existing one.
    pub(crate) fn from_parts(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw interleaved RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Color and alpha at image-space (x, y), or `None` outside the raster.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<(RGB8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[i..i + 4];
        Some((
            RGB8 {
                r: px[0],
                g: px[1],
                b: px[2],
            },
            px[3],
        ))
    }

    /// Downscale so the longest side is at most `max_dim`, preserving aspect
    /// ratio. Already-small rasters come back as a plain copy.
    pub fn scale_to_fit(&self, max_dim: u32) -> RasterBuffer {
        let longest = self.width.max(self.height);
        if longest <= max_dim {
            return self.clone();
        }

        let scale = max_dim as f32 / longest as f32;
        let width = ((self.width as f32 * scale).round() as u32).max(1);
        let height = ((self.height as f32 * scale).round() as u32).max(1);
        let resized = imageops::resize(&self.to_image(), width, height, imageops::FilterType::Triangle);
        Self::from_image(resized)
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .expect("raster invariant: width * height * 4 == data.len()")
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, AnalyzeError> {
        let mut buf = std::io::Cursor::new(Vec::new());
        self.to_image()
            .write_to(&mut buf, image::ImageFormat::Png)
            .context(EncodeSnafu)?;
        Ok(buf.into_inner())
    }
}
