use snafu::prelude::*;

/// Failures that abort an analysis attempt.
///
/// Decoding the upload is the only step that can fail in a way the caller
/// must see. Everything else in the pipeline degrades to a
/// smaller-but-valid result instead of erroring, so a caller either gets a
/// complete [`crate::AnalysisResult`] or one of these.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum AnalyzeError {
    #[snafu(display("could not decode input image"))]
    Decode { source: image::ImageError },

    #[snafu(display("could not encode artifact as PNG"))]
    Encode { source: image::ImageError },
}

/// Validation errors for raster buffers built from raw bytes.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum RasterError {
    #[snafu(display("image size must be positive"))]
    ZeroImageSize,

    #[snafu(display("buffer is empty"))]
    EmptyBuffer,

    #[snafu(display("buffer length {len} is not a multiple of 4"))]
    InvalidBufferLength { len: usize },

    #[snafu(display("image size ({width}x{height}) doesn't match the buffer size ({buf_size})"))]
    ImageSizeMismatch {
        width: u32,
        height: u32,
        buf_size: usize,
    },
}
