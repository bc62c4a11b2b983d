//! Centroid seeding policies.

use super::distance::squared_distance;
use crate::batch::BatchSource;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};
use rand::prelude::*;

/// How the initial centroids are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitPolicy {
    /// k rows drawn uniformly, with replacement, from the first batch only.
    ///
    /// A small or unrepresentative first batch gives poor or duplicated
    /// starting centroids.
    #[default]
    FirstBatch,
    /// Uniform reservoir sample of k rows over every batch.
    ///
    /// If the whole sequence holds fewer than k rows, the missing slots are
    /// drawn with replacement from the rows that were sampled.
    Reservoir,
    /// k-means++ over the first batch: each new centroid is drawn with
    /// probability proportional to its squared distance from the nearest
    /// centroid chosen so far.
    PlusPlus,
}

/// Draw `k` starting centroids according to `policy`.
///
/// `first` must be the first non-empty batch of `batches`.
pub(crate) fn seed_centroids<B: BatchSource + ?Sized>(
    policy: InitPolicy,
    k: usize,
    first: ArrayView2<'_, f64>,
    batches: &B,
    rng: &mut impl Rng,
) -> Result<Array2<f64>> {
    match policy {
        InitPolicy::FirstBatch => Ok(sample_rows(first, k, rng)),
        InitPolicy::Reservoir => reservoir(k, first.ncols(), batches, rng),
        InitPolicy::PlusPlus => Ok(plus_plus(first, k, rng)),
    }
}

fn sample_rows(data: ArrayView2<'_, f64>, k: usize, rng: &mut impl Rng) -> Array2<f64> {
    let n = data.nrows();
    let mut centroids = Array2::zeros((k, data.ncols()));
    for mut row in centroids.rows_mut() {
        row.assign(&data.row(rng.random_range(0..n)));
    }
    centroids
}

fn reservoir<B: BatchSource + ?Sized>(
    k: usize,
    d: usize,
    batches: &B,
    rng: &mut impl Rng,
) -> Result<Array2<f64>> {
    let mut centroids = Array2::zeros((k, d));
    let mut seen = 0usize;

    for batch in batches.iter_batches() {
        if batch.nrows() > 0 && batch.ncols() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: batch.ncols(),
            });
        }
        for row in batch.rows() {
            if seen < k {
                centroids.row_mut(seen).assign(&row);
            } else {
                let j = rng.random_range(0..=seen);
                if j < k {
                    centroids.row_mut(j).assign(&row);
                }
            }
            seen += 1;
        }
    }

    // Fewer rows than clusters: pad from what was sampled.
    for i in seen..k {
        let src = rng.random_range(0..seen);
        let row = centroids.row(src).to_owned();
        centroids.row_mut(i).assign(&row);
    }

    Ok(centroids)
}

fn plus_plus(data: ArrayView2<'_, f64>, k: usize, rng: &mut impl Rng) -> Array2<f64> {
    let n = data.nrows();
    let mut centroids = Array2::zeros((k, data.ncols()));

    // First centroid: random point
    let first = rng.random_range(0..n);
    centroids.row_mut(0).assign(&data.row(first));

    for i in 1..k {
        let distances: Vec<f64> = data
            .rows()
            .into_iter()
            .map(|point| {
                (0..i)
                    .map(|c| squared_distance(&point, &centroids.row(c)))
                    .fold(f64::MAX, f64::min)
            })
            .collect();

        // Every point already coincides with a centroid.
        let total: f64 = distances.iter().sum();
        if total == 0.0 {
            let idx = rng.random_range(0..n);
            centroids.row_mut(i).assign(&data.row(idx));
            continue;
        }

        let threshold = rng.random::<f64>() * total;
        let mut cumsum = 0.0;
        let mut selected = n - 1;

        for (j, &d) in distances.iter().enumerate() {
            cumsum += d;
            if cumsum >= threshold {
                selected = j;
                break;
            }
        }

        centroids.row_mut(i).assign(&data.row(selected));
    }

    centroids
}
