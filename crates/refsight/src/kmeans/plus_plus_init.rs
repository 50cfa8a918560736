use super::squared_distance;
use crate::sample::SampledRgbSoA;
use rand::Rng;

#[inline(always)]
fn sample_by_distance(rng: &mut impl Rng, min_distances: &[f32], sum: f32) -> usize {
    let random_threshold = rng.random::<f32>() * sum;
    let mut cumsum = 0.0;

    for (i, &distance) in min_distances.iter().enumerate() {
        cumsum += distance;
        if cumsum > random_threshold {
            return i;
        }
    }

    min_distances.len() - 1
}

/// Pick `k` seed indices: the first uniformly at random, each subsequent one
/// with probability proportional to its squared weighted distance to the
/// nearest already-chosen seed.
pub fn find_initial(rng: &mut impl Rng, sample: &SampledRgbSoA, k: usize) -> Vec<usize> {
    let SampledRgbSoA { r, g, b } = sample;
    let n = r.len();
    assert_eq!(g.len(), n);
    assert_eq!(b.len(), n);
    assert!(n > 0);

    // More clusters than points => silent clamping
    let k = k.min(n);

    let mut seeds = Vec::<usize>::with_capacity(k);
    let c0 = rng.random_range(0..n);
    seeds.push(c0);

    let (c0r, c0g, c0b) = (r[c0], g[c0], b[c0]);
    let mut min_distances = vec![0.0f32; n];
    let mut min_distances_sum = 0.0f32;
    for i in 0..n {
        let d = squared_distance(r[i], g[i], b[i], c0r, c0g, c0b);
        min_distances[i] = d;
        min_distances_sum += d;
    }

    for _ in 1..k {
        let next = if min_distances_sum > 0.0 {
            sample_by_distance(rng, &min_distances, min_distances_sum)
        } else {
            // Every remaining point coincides with a seed
            rng.random_range(0..n)
        };
        seeds.push(next);

        let (nr, ng, nb) = (r[next], g[next], b[next]);
        min_distances_sum = 0.0;
        for i in 0..n {
            let d = squared_distance(r[i], g[i], b[i], nr, ng, nb).min(min_distances[i]);
            min_distances[i] = d;
            min_distances_sum += d;
        }
    }

    seeds
}
