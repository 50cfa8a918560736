use crate::sample::SampledRgbSoA;
use rand::Rng;
use rgb::RGB8;
use std::collections::HashMap;

pub mod lloyds;
pub mod plus_plus_init;

// References:
// - k-means++: The Advantages of Careful Seeding (D. Arthur, S. Vassilvitskii)
//   https://theory.stanford.edu/~sergei/papers/kMeansPP-soda.pdf
// - https://scikit-learn.org/stable/modules/generated/sklearn.cluster.KMeans.html

/// Iteration budget for the refinement loop.
pub const MAX_ITER: usize = 20;

/// A pass that moves no centroid further than this counts as converged.
pub const CONVERGENCE_SHIFT: f32 = 1.0;

// Channel weights on squared differences, after eye sensitivity: green
// counts most, blue least. The same metric drives seeding, assignment, and
// the convergence check.
pub const WEIGHT_R: f32 = 0.30;
pub const WEIGHT_G: f32 = 0.59;
pub const WEIGHT_B: f32 = 0.11;

#[inline(always)]
pub fn squared_distance(r0: f32, g0: f32, b0: f32, r1: f32, g1: f32, b1: f32) -> f32 {
    let dr = r0 - r1;
    let dg = g0 - g1;
    let db = b0 - b1;

    (WEIGHT_R * dr).mul_add(dr, (WEIGHT_G * dg).mul_add(dg, WEIGHT_B * db * db))
}

/// One extracted cluster: its centroid color and how many sampled pixels
/// landed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterColor {
    pub color: RGB8,
    pub count: usize,
}

/// Group the sampled colors into at most `k` clusters, ranked by descending
/// member count.
///
/// An empty sample or `k == 0` yields an empty result. When the sample holds
/// no more than `k` distinct colors, each distinct color becomes its own
/// cluster without any iteration. Otherwise `k` clusters are refined and the
/// ones that end with no members (rare, but possible when clusters collapse)
/// are dropped.
pub fn find_clusters(rng: &mut impl Rng, sample: &SampledRgbSoA, k: usize) -> Vec<ClusterColor> {
    if sample.is_empty() || k == 0 {
        return Vec::new();
    }

    // Nothing to refine when every distinct color can have its own cluster.
    let distinct = distinct_colors(sample);
    if distinct.len() <= k {
        let mut clusters: Vec<ClusterColor> = distinct
            .into_iter()
            .map(|(color, count)| ClusterColor { color, count })
            .collect();
        sort_by_dominance(&mut clusters);
        return clusters;
    }

    let seeds = plus_plus_init::find_initial(rng, sample, k);
    let mut centroids = lloyds::CentroidSoA::from_seed_indices(sample, &seeds);
    let mut assignments = vec![0usize; sample.len()];
    lloyds::lloyds_loop(sample, &mut assignments, &mut centroids);

    // The loop moves centroids after its last assignment, so assign once more
    // against the final positions before counting members.
    lloyds::assign_points(sample, &centroids, &mut assignments);

    let mut counts = vec![0usize; centroids.len()];
    for &assignment in assignments.iter() {
        counts[assignment] += 1;
    }

    let mut clusters: Vec<ClusterColor> = (0..centroids.len())
        .filter(|&i| counts[i] > 0)
        .map(|i| ClusterColor {
            color: centroids.color(i),
            count: counts[i],
        })
        .collect();
    sort_by_dominance(&mut clusters);
    clusters
}

/// Distinct sampled colors with their occurrence counts. Sample channels are
/// integral (they come from 8-bit pixels), so exact keying is safe.
fn distinct_colors(sample: &SampledRgbSoA) -> Vec<(RGB8, usize)> {
    let mut counts: HashMap<(u8, u8, u8), usize> = HashMap::new();
    for i in 0..sample.len() {
        let key = (
            sample.r[i] as u8,
            sample.g[i] as u8,
            sample.b[i] as u8,
        );
        *counts.entry(key).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((r, g, b), count)| (RGB8 { r, g, b }, count))
        .collect()
}

/// Descending by count; ties broken by channel value so results are stable
/// across runs despite hash-map iteration order.
fn sort_by_dominance(clusters: &mut [ClusterColor]) {
    clusters.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| (a.color.r, a.color.g, a.color.b).cmp(&(b.color.r, b.color.g, b.color.b)))
    });
}
