use super::{squared_distance, CONVERGENCE_SHIFT, MAX_ITER};
use crate::sample::SampledRgbSoA;
use rgb::RGB8;

/// Centroid channels in structure-of-arrays layout, one slot per cluster.
#[derive(Debug, Clone)]
pub struct CentroidSoA {
    pub r: Vec<f32>,
    pub g: Vec<f32>,
    pub b: Vec<f32>,
}

impl CentroidSoA {
    /// Seed centroids from sample points chosen by the initializer.
    pub fn from_seed_indices(sample: &SampledRgbSoA, seeds: &[usize]) -> Self {
        let mut centroids = Self {
            r: Vec::with_capacity(seeds.len()),
            g: Vec::with_capacity(seeds.len()),
            b: Vec::with_capacity(seeds.len()),
        };
        for &i in seeds {
            centroids.r.push(sample.r[i]);
            centroids.g.push(sample.g[i]);
            centroids.b.push(sample.b[i]);
        }
        centroids
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// Centroid `i` rounded back to an 8-bit color.
    pub fn color(&self, i: usize) -> RGB8 {
        RGB8 {
            r: self.r[i].round().clamp(0.0, 255.0) as u8,
            g: self.g[i].round().clamp(0.0, 255.0) as u8,
            b: self.b[i].round().clamp(0.0, 255.0) as u8,
        }
    }
}

/// Point each sample at its nearest centroid under the weighted metric.
#[inline]
pub fn assign_points(sample: &SampledRgbSoA, centroids: &CentroidSoA, assignments: &mut [usize]) {
    for (i, assignment) in assignments.iter_mut().enumerate() {
        let mut min = f32::MAX;
        let mut min_idx = 0;
        for j in 0..centroids.len() {
            let d = squared_distance(
                sample.r[i],
                sample.g[i],
                sample.b[i],
                centroids.r[j],
                centroids.g[j],
                centroids.b[j],
            );
            if d < min {
                min = d;
                min_idx = j;
            }
        }

        *assignment = min_idx;
    }
}

#[derive(Debug)]
pub struct LloydsLoopResult {
    pub iterations: usize,
    pub converged: bool,
}

/// Alternate assignment and mean-update passes until no centroid moves
/// further than [`CONVERGENCE_SHIFT`], or the iteration budget runs out.
///
/// The per-cluster accumulators are allocated once and zeroed each pass.
/// A cluster that loses all members keeps its centroid where it was; the
/// extraction pass drops it if nothing ever comes back.
pub fn lloyds_loop(
    sample: &SampledRgbSoA,
    assignments: &mut [usize],
    centroids: &mut CentroidSoA,
) -> LloydsLoopResult {
    assert_eq!(sample.r.len(), sample.g.len());
    assert_eq!(sample.r.len(), sample.b.len());
    assert_eq!(sample.r.len(), assignments.len());
    assert!(!centroids.is_empty());
    assert!(centroids.len() <= sample.r.len());

    let k = centroids.len();
    let mut sums_r = vec![0f32; k];
    let mut sums_g = vec![0f32; k];
    let mut sums_b = vec![0f32; k];
    let mut counts = vec![0u32; k];

    for iteration in 0..MAX_ITER {
        assign_points(sample, centroids, assignments);

        sums_r.fill(0.0);
        sums_g.fill(0.0);
        sums_b.fill(0.0);
        counts.fill(0);
        for (i, &assigned) in assignments.iter().enumerate() {
            counts[assigned] += 1;
            sums_r[assigned] += sample.r[i];
            sums_g[assigned] += sample.g[i];
            sums_b[assigned] += sample.b[i];
        }

        let mut max_shift = 0f32;
        for j in 0..k {
            if counts[j] == 0 {
                continue;
            }

            let new_r = sums_r[j] / counts[j] as f32;
            let new_g = sums_g[j] / counts[j] as f32;
            let new_b = sums_b[j] / counts[j] as f32;

            let shift = squared_distance(
                centroids.r[j],
                centroids.g[j],
                centroids.b[j],
                new_r,
                new_g,
                new_b,
            )
            .sqrt();

            centroids.r[j] = new_r;
            centroids.g[j] = new_g;
            centroids.b[j] = new_b;

            max_shift = max_shift.max(shift);
        }

        if max_shift <= CONVERGENCE_SHIFT {
            return LloydsLoopResult {
                iterations: iteration + 1,
                converged: true,
            };
        }
    }

    LloydsLoopResult {
        iterations: MAX_ITER,
        converged: false,
    }
}
