//! Synthetic data for demos and tests.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};
use rand::prelude::*;
use rand_distr::{Distribution, Normal};

/// Isotropic Gaussian blobs around `centers`.
///
/// Rows are grouped by center: the first `n_per_center` rows belong to
/// center 0, the next to center 1, and so on. Returns the data and the true
/// center index of every row.
pub fn make_blobs(
    centers: ArrayView2<'_, f64>,
    n_per_center: usize,
    std_dev: f64,
    seed: u64,
) -> Result<(Array2<f64>, Vec<usize>)> {
    if centers.nrows() == 0 || n_per_center == 0 {
        return Err(Error::EmptyInput);
    }
    let noise = Normal::new(0.0, std_dev).map_err(|_| Error::InvalidParameter {
        name: "std_dev",
        message: "must be finite and non-negative",
    })?;

    let mut rng = StdRng::seed_from_u64(seed);
    let n = centers.nrows() * n_per_center;
    let mut data = Array2::zeros((n, centers.ncols()));
    let mut labels = Vec::with_capacity(n);

    for (i, mut row) in data.rows_mut().into_iter().enumerate() {
        let label = i / n_per_center;
        row.assign(&centers.row(label));
        row.mapv_inplace(|v| v + noise.sample(&mut rng));
        labels.push(label);
    }

    Ok((data, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_blobs_shape_and_labels() {
        let centers = array![[0.0, 0.0], [5.0, 5.0]];
        let (data, labels) = make_blobs(centers.view(), 4, 0.1, 1).unwrap();

        assert_eq!(data.dim(), (8, 2));
        assert_eq!(labels, vec![0, 0, 0, 0, 1, 1, 1, 1]);
        for (row, &l) in data.rows().into_iter().zip(&labels) {
            assert!((row[0] - centers[[l, 0]]).abs() < 1.0);
        }
    }

    #[test]
    fn test_blobs_reproducible() {
        let centers = array![[1.0, -1.0, 0.5]];
        let a = make_blobs(centers.view(), 10, 0.5, 42).unwrap();
        let b = make_blobs(centers.view(), 10, 0.5, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blobs_invalid_std() {
        let centers = array![[0.0]];
        assert!(matches!(
            make_blobs(centers.view(), 3, -1.0, 0),
            Err(Error::InvalidParameter { name: "std_dev", .. })
        ));
    }
}
