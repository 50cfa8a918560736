//! Study artifacts for reference photographs.
//!
//! One uploaded image in, a bundle of analyses out: the dominant color
//! palette (weighted k-means over sparsely sampled pixels), a grayscale
//! value map, a warm/cool temperature map, and four progressively blurred
//! "squint" levels, plus a picker contract for sampling single pixels under
//! a pointer.
//!
//! ```
//! let raster = refsight::RasterBuffer::from_bytes(2, 2, [255, 0, 0, 255].repeat(4)).unwrap();
//! let result = refsight::analyze_raster(&raster, &refsight::AnalyzeOptions::default()).unwrap();
//!
//! assert_eq!(result.dominant_colors[0].hex, "#ff0000");
//! assert_eq!(result.squint_levels.len(), 4);
//! ```

pub mod color;
pub mod error;
#[cfg(feature = "_debug")]
pub mod kmeans;
#[cfg(not(feature = "_debug"))]
mod kmeans;
pub mod maps;
pub mod picker;
pub mod raster;
#[cfg(feature = "_debug")]
pub mod rng;
#[cfg(not(feature = "_debug"))]
mod rng;
#[cfg(feature = "_debug")]
pub mod sample;
#[cfg(not(feature = "_debug"))]
mod sample;
pub mod squint;

pub use error::{AnalyzeError, RasterError};
pub use picker::SelectedPixelColor;
pub use raster::RasterBuffer;
pub use rgb::RGB8;
pub use squint::{classify, CapabilityTier, DisplayEnvironment};

use std::time::Instant;

/// Number of dominant-color clusters requested by convention.
pub const DEFAULT_CLUSTER_COUNT: usize = 6;

/// Knobs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Number of dominant-color clusters to extract. Fewer come back when
    /// the image holds fewer distinct colors.
    pub cluster_count: usize,
    /// Capability tier steering the squint blur strategy.
    pub tier: CapabilityTier,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            cluster_count: DEFAULT_CLUSTER_COUNT,
            tier: CapabilityTier::Desktop,
        }
    }
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cluster_count(mut self, k: usize) -> Self {
        self.cluster_count = k;
        self
    }

    pub fn tier(mut self, tier: CapabilityTier) -> Self {
        self.tier = tier;
        self
    }
}

/// One ranked palette entry. `count` is the number of sampled pixels
/// assigned to the cluster: a proxy for coverage, not an exact pixel count,
/// since sampling is sparse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominantColorResult {
    pub hex: String,
    pub rgb: RGB8,
    pub count: usize,
}

/// A PNG-encoded image artifact, ready to render or download.
#[derive(Debug, Clone)]
pub struct ImageArtifact {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Everything derived from one uploaded image.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Sorted descending by `count`.
    pub dominant_colors: Vec<DominantColorResult>,
    pub value_map: ImageArtifact,
    pub temperature_map: ImageArtifact,
    /// Exactly [`squint::LEVEL_COUNT`] renditions, least blurred first.
    pub squint_levels: Vec<ImageArtifact>,
}

/// Run the full pipeline on encoded image bytes (JPEG, PNG, WebP, ...).
///
/// Decode failure is the only error a degraded input can surface; a fully
/// transparent or near-monochrome image just yields a smaller palette. The
/// result belongs to this input alone; callers juggling overlapping uploads
/// should key results by image and drop the stale ones.
pub fn analyze(bytes: &[u8], options: &AnalyzeOptions) -> Result<AnalysisResult, AnalyzeError> {
    let full = RasterBuffer::decode(bytes)?;
    analyze_raster(&full, options)
}

/// Same as [`analyze`], starting from an already decoded raster.
pub fn analyze_raster(
    full: &RasterBuffer,
    options: &AnalyzeOptions,
) -> Result<AnalysisResult, AnalyzeError> {
    let started = Instant::now();
    let working = full.scale_to_fit(raster::WORKING_MAX_DIM);

    // The generators share the two immutable buffers and nothing else, so
    // they fan out freely. Squint levels read the full-resolution raster,
    // everything else the working one.
    let ((clusters, value), (temperature, squints)) = rayon::join(
        || {
            rayon::join(
                || {
                    let mut rng = rng::new();
                    kmeans::find_clusters(&mut rng, &sample::sample(&working), options.cluster_count)
                },
                || maps::value_map(&working),
            )
        },
        || {
            rayon::join(
                || maps::temperature_map(&working),
                || squint::generate(full, options.tier),
            )
        },
    );

    tracing::debug!(
        elapsed = ?started.elapsed(),
        clusters = clusters.len(),
        width = full.width(),
        height = full.height(),
        "generators finished"
    );

    let dominant_colors = clusters
        .into_iter()
        .map(|cluster| DominantColorResult {
            hex: color::rgb_to_hex(cluster.color),
            rgb: cluster.color,
            count: cluster.count,
        })
        .collect();

    let value_map = encode_artifact(&value)?;
    let temperature_map = encode_artifact(&temperature)?;
    let squint_levels = squints
        .iter()
        .map(encode_artifact)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisResult {
        dominant_colors,
        value_map,
        temperature_map,
        squint_levels,
    })
}

fn encode_artifact(raster: &RasterBuffer) -> Result<ImageArtifact, AnalyzeError> {
    Ok(ImageArtifact {
        width: raster.width(),
        height: raster.height(),
        png: raster.encode_png()?,
    })
}
