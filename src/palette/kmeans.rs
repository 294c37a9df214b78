use rayon::prelude::*;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{PalError, PalResult};
use crate::foundation::math::Rng64;
use crate::palette::model::MAX_PALETTE_LEN;

/// A clustering procedure: reduce a pool of color samples to `k` representative colors.
pub trait ColorClusterer {
    /// Return exactly `k` colors. Randomness must come from `rng` only.
    fn cluster(&self, samples: &[Rgb8], k: usize, rng: &mut Rng64) -> PalResult<Vec<Rgb8>>;
}

/// Lloyd's k-means with k-means++ seeding, in RGB space.
#[derive(Clone, Debug)]
pub struct KMeans {
    /// Upper bound on assignment/update rounds.
    pub max_iterations: u32,
}

impl Default for KMeans {
    fn default() -> Self {
        Self { max_iterations: 50 }
    }
}

type Point = [f64; 3];

fn to_point(c: Rgb8) -> Point {
    [f64::from(c.r), f64::from(c.g), f64::from(c.b)]
}

fn dist_sq(a: &Point, b: &Point) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

// Lowest index wins ties.
fn nearest(centroids: &[Point], p: &Point) -> (usize, f64) {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = dist_sq(c, p);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    (best, best_d)
}

fn round_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl KMeans {
    fn seed_plus_plus(points: &[Point], k: usize, rng: &mut Rng64) -> Vec<Point> {
        let mut centroids = Vec::with_capacity(k);
        let first = rng.next_below(points.len() as u64) as usize;
        centroids.push(points[first]);

        let mut d2: Vec<f64> = points.iter().map(|p| dist_sq(p, &points[first])).collect();
        while centroids.len() < k {
            let total: f64 = d2.iter().sum();
            let pick = if total > 0.0 {
                let target = rng.next_f64_01() * total;
                let mut acc = 0.0;
                let mut chosen = points.len() - 1;
                for (i, d) in d2.iter().enumerate() {
                    acc += d;
                    if acc > target {
                        chosen = i;
                        break;
                    }
                }
                chosen
            } else {
                rng.next_below(points.len() as u64) as usize
            };
            let c = points[pick];
            for (d, p) in d2.iter_mut().zip(points) {
                *d = d.min(dist_sq(p, &c));
            }
            centroids.push(c);
        }
        centroids
    }
}

impl ColorClusterer for KMeans {
    #[tracing::instrument(skip(self, samples, rng), fields(samples = samples.len()))]
    fn cluster(&self, samples: &[Rgb8], k: usize, rng: &mut Rng64) -> PalResult<Vec<Rgb8>> {
        if k == 0 {
            return Err(PalError::EmptyPalette);
        }
        if k > MAX_PALETTE_LEN {
            return Err(PalError::PaletteTooLarge {
                len: k,
                max: MAX_PALETTE_LEN,
            });
        }
        if samples.len() < k {
            return Err(PalError::InsufficientSamples {
                needed: k as u64,
                available: samples.len() as u64,
            });
        }

        let points: Vec<Point> = samples.iter().copied().map(to_point).collect();
        let mut centroids = Self::seed_plus_plus(&points, k, rng);
        let mut assignment = vec![usize::MAX; points.len()];

        let mut iterations = 0;
        while iterations < self.max_iterations {
            iterations += 1;

            let next: Vec<(usize, f64)> =
                points.par_iter().map(|p| nearest(&centroids, p)).collect();
            let changed = next
                .iter()
                .zip(&assignment)
                .filter(|((n, _), a)| n != *a)
                .count();
            for (a, (n, _)) in assignment.iter_mut().zip(&next) {
                *a = *n;
            }
            if changed == 0 {
                break;
            }

            let mut sums = vec![[0.0f64; 3]; k];
            let mut counts = vec![0u64; k];
            for (p, &a) in points.iter().zip(&assignment) {
                sums[a][0] += p[0];
                sums[a][1] += p[1];
                sums[a][2] += p[2];
                counts[a] += 1;
            }

            for (ci, c) in centroids.iter_mut().enumerate() {
                if counts[ci] > 0 {
                    let n = counts[ci] as f64;
                    *c = [sums[ci][0] / n, sums[ci][1] / n, sums[ci][2] / n];
                }
            }

            // Empty clusters restart at the points farthest from their current centroid.
            if counts.contains(&0) {
                let mut far: Vec<usize> = (0..points.len()).collect();
                far.sort_by(|&a, &b| next[b].1.total_cmp(&next[a].1).then(a.cmp(&b)));
                let mut far = far.into_iter();
                for (ci, c) in centroids.iter_mut().enumerate() {
                    if counts[ci] == 0
                        && let Some(pi) = far.next()
                    {
                        *c = points[pi];
                    }
                }
            }
        }

        tracing::debug!(iterations, k, "k-means finished");
        Ok(centroids
            .iter()
            .map(|c| Rgb8::new(round_channel(c[0]), round_channel(c[1]), round_channel(c[2])))
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/kmeans.rs"]
mod tests;
