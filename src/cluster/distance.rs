//! Point-to-centroid distances shared by fitting and assignment.

use ndarray::{Array2, ArrayView1, ArrayView2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Compute squared Euclidean distance.
pub(crate) fn squared_distance(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Euclidean distance between every row of `points` and every row of `centroids`.
///
/// Entry `[i, j]` is `||points[i] - centroids[j]||`. With the `parallel`
/// feature the rows are computed concurrently.
pub fn pairwise_distances(points: ArrayView2<'_, f64>, centroids: ArrayView2<'_, f64>) -> Array2<f64> {
    let row_distances = |i: usize| -> Vec<f64> {
        let point = points.row(i);
        centroids
            .rows()
            .into_iter()
            .map(|c| squared_distance(&point, &c).sqrt())
            .collect()
    };

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<f64>> = (0..points.nrows()).into_par_iter().map(row_distances).collect();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<f64>> = (0..points.nrows()).map(row_distances).collect();

    Array2::from_shape_fn((points.nrows(), centroids.nrows()), |(i, j)| rows[i][j])
}

/// Column of the smallest entry. Ties go to the lowest index.
fn argmin(distances: ArrayView1<'_, f64>) -> usize {
    let mut best_cluster = 0;
    let mut best_dist = f64::INFINITY;

    for (k, &dist) in distances.iter().enumerate() {
        if dist < best_dist {
            best_dist = dist;
            best_cluster = k;
        }
    }
    best_cluster
}

/// Nearest-centroid label for every row of `points`, in row order.
///
/// Built on [`pairwise_distances`]; each label is the first minimum of its
/// distance row.
pub fn nearest_centroids(points: ArrayView2<'_, f64>, centroids: ArrayView2<'_, f64>) -> Vec<usize> {
    pairwise_distances(points, centroids)
        .rows()
        .into_iter()
        .map(argmin)
        .collect()
}
