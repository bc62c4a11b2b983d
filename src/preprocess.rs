//! Column-wise scaling of cleaned feature matrices.
//!
//! Sensor features live on very different scales (step counts in the
//! thousands, blood oxygen near 100, stress on 1–10). Without scaling, PCA
//! and k-means are dominated by whichever column has the largest numbers.

use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Z-score every column: `(x − mean) / std`, with the sample (N − 1)
/// standard deviation.
///
/// Zero-variance columns come out as all zeros.
pub fn standardize(data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    if data.nrows() < 2 {
        return Err(Error::InsufficientSamples {
            required: 2,
            found: data.nrows(),
        });
    }

    let mean = data.mean_axis(Axis(0)).ok_or(Error::EmptyInput)?;
    let std = data.std_axis(Axis(0), 1.0);

    let mut out = &data - &mean;
    for (mut col, &s) in out.columns_mut().into_iter().zip(std.iter()) {
        if s > 0.0 {
            col /= s;
        } else {
            col.fill(0.0);
        }
    }
    Ok(out)
}

/// Rescale every column to `[0, 1]`: `(x − min) / (max − min)`.
///
/// Constant columns come out as all zeros.
pub fn min_max_scale(data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    if data.nrows() == 0 {
        return Err(Error::EmptyInput);
    }

    let mut out = data.to_owned();
    for mut col in out.columns_mut() {
        let min = col.fold(f64::INFINITY, |a, &b| a.min(b));
        let max = col.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let range = max - min;
        if range > 0.0 {
            col.mapv_inplace(|v| (v - min) / range);
        } else {
            col.fill(0.0);
        }
    }
    Ok(out)
}

/// Population (÷ N) variance of every column.
///
/// This is the per-feature reconstruction error of a projection that keeps
/// no components at all, which makes it the natural yardstick for
/// [`Pca::reconstruction_error`](crate::reduce::Pca::reconstruction_error).
pub fn column_variance(data: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    if data.nrows() == 0 {
        return Err(Error::EmptyInput);
    }
    Ok(data.var_axis(Axis(0), 0.0))
}
