//! K-means clustering over TF-IDF rows.
//!
//! Standard Lloyd iterations with k-means++ seeding and several restarts,
//! keeping the run with the lowest inertia (sum of squared Euclidean
//! distances to the assigned centroid).
//!
//! Runs are reproducible when [`KMeansParams::seed`] is set: restart `i`
//! uses seed `seed + i`. Without a seed, a fresh one is drawn per call.

use anyhow::{bail, Result};
use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ClusteringConfig;
use crate::models::ClusterAssignment;

/// Tuning knobs for a k-means fit.
#[derive(Debug, Clone)]
pub struct KMeansParams {
    pub max_iterations: usize,
    /// Stop once the summed squared centroid shift falls to this value.
    pub tolerance: f32,
    /// Number of independently seeded runs.
    pub n_init: usize,
    pub seed: Option<u64>,
}

impl Default for KMeansParams {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            tolerance: 1e-4,
            n_init: 10,
            seed: None,
        }
    }
}

impl From<&ClusteringConfig> for KMeansParams {
    fn from(cfg: &ClusteringConfig) -> Self {
        Self {
            max_iterations: cfg.max_iterations,
            tolerance: cfg.tolerance,
            n_init: cfg.n_init,
            seed: cfg.seed,
        }
    }
}

/// Cluster the rows of `data` into `k` groups.
///
/// # Errors
///
/// Fails when `data` has no rows, `k == 0`, or `k` exceeds the row count.
pub fn fit(data: &Array2<f32>, k: usize, params: &KMeansParams) -> Result<ClusterAssignment> {
    let n = data.nrows();
    if n == 0 {
        bail!("cannot cluster an empty dataset");
    }
    if k == 0 {
        bail!("number of clusters must be at least 1");
    }
    if k > n {
        bail!("number of clusters ({}) cannot exceed number of items ({})", k, n);
    }

    let base_seed = params.seed.unwrap_or_else(rand::random);
    let mut best: Option<ClusterAssignment> = None;

    for init in 0..params.n_init.max(1) {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(init as u64));
        let run = fit_single(data, k, params, &mut rng);
        let better = match &best {
            Some(b) => run.inertia < b.inertia,
            None => true,
        };
        if better {
            best = Some(run);
        }
    }

    best.ok_or_else(|| anyhow::anyhow!("k-means produced no result"))
}

fn fit_single(
    data: &Array2<f32>,
    k: usize,
    params: &KMeansParams,
    rng: &mut StdRng,
) -> ClusterAssignment {
    let n = data.nrows();
    let dims = data.ncols();

    let mut centroids = init_plus_plus(data, k, rng);
    let mut labels = vec![0usize; n];
    let mut dists = vec![0.0f32; n];
    let mut iterations = 0;

    for _ in 0..params.max_iterations {
        iterations += 1;
        assign(data, &centroids, &mut labels, &mut dists);

        let mut sums = Array2::<f32>::zeros((k, dims));
        let mut counts = vec![0usize; k];
        for (i, &label) in labels.iter().enumerate() {
            sums.row_mut(label).scaled_add(1.0, &data.row(i));
            counts[label] += 1;
        }

        // Empty clusters take over the point farthest from its centroid.
        let mut moved = vec![false; n];
        for c in 0..k {
            if counts[c] > 0 {
                continue;
            }
            let farthest = (0..n)
                .filter(|&i| !moved[i] && counts[labels[i]] > 1)
                .max_by(|&a, &b| dists[a].total_cmp(&dists[b]));
            if let Some(i) = farthest {
                let old = labels[i];
                sums.row_mut(old).scaled_add(-1.0, &data.row(i));
                counts[old] -= 1;
                sums.row_mut(c).assign(&data.row(i));
                counts[c] = 1;
                labels[i] = c;
                moved[i] = true;
            }
        }

        let mut shift = 0.0f32;
        for c in 0..k {
            if counts[c] == 0 {
                continue;
            }
            let inv = 1.0 / counts[c] as f32;
            let mut row = sums.row_mut(c);
            row.mapv_inplace(|v| v * inv);
            shift += sq_euclidean(row.view(), centroids.row(c));
        }
        for c in 0..k {
            if counts[c] > 0 {
                centroids.row_mut(c).assign(&sums.row(c));
            }
        }

        if shift <= params.tolerance {
            break;
        }
    }

    assign(data, &centroids, &mut labels, &mut dists);
    let inertia: f32 = dists.iter().sum();

    ClusterAssignment {
        labels,
        num_clusters: k,
        inertia,
        iterations,
    }
}

/// k-means++ seeding: each new centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one.
fn init_plus_plus(data: &Array2<f32>, k: usize, rng: &mut StdRng) -> Array2<f32> {
    let n = data.nrows();
    let mut centroids = Array2::<f32>::zeros((k, data.ncols()));

    let first = rng.gen_range(0..n);
    centroids.row_mut(0).assign(&data.row(first));

    let mut nearest: Vec<f32> = (0..n)
        .map(|i| sq_euclidean(data.row(i), centroids.row(0)))
        .collect();

    for c in 1..k {
        let total: f32 = nearest.iter().sum();
        let chosen = if total > 0.0 {
            let target = rng.gen::<f32>() * total;
            let mut cumulative = 0.0f32;
            let mut pick = None;
            let mut last_positive = 0;
            for (i, &d) in nearest.iter().enumerate() {
                if d <= 0.0 {
                    continue;
                }
                last_positive = i;
                cumulative += d;
                if cumulative >= target {
                    pick = Some(i);
                    break;
                }
            }
            pick.unwrap_or(last_positive)
        } else {
            rng.gen_range(0..n)
        };

        centroids.row_mut(c).assign(&data.row(chosen));
        for (i, d) in nearest.iter_mut().enumerate() {
            let candidate = sq_euclidean(data.row(i), centroids.row(c));
            if candidate < *d {
                *d = candidate;
            }
        }
    }

    centroids
}

/// Assign every row to its nearest centroid; ties go to the lower id.
fn assign(data: &Array2<f32>, centroids: &Array2<f32>, labels: &mut [usize], dists: &mut [f32]) {
    for (i, row) in data.rows().into_iter().enumerate() {
        let mut best = 0;
        let mut best_dist = f32::INFINITY;
        for (c, centroid) in centroids.rows().into_iter().enumerate() {
            let d = sq_euclidean(row, centroid);
            if d < best_dist {
                best_dist = d;
                best = c;
            }
        }
        labels[i] = best;
        dists[i] = best_dist;
    }
}

fn sq_euclidean(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}
