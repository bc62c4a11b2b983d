//! Principal Component Analysis via the covariance eigendecomposition.
//!
//! # The Model
//!
//! Given centered data `X_c = X − μ` with N rows, the sample covariance is
//!
//! ```text
//! Σ = X_cᵀ X_c / (N − 1)
//! ```
//!
//! Its eigenvectors are the principal axes and its eigenvalues the variance
//! along each axis. Keeping the k eigenvectors with the largest eigenvalues,
//! stacked as columns of `W` (D × k), gives
//!
//! ```text
//! transform(X)      = (X − μ) W
//! reconstruct(Z)    = Z Wᵀ + μ
//! ```
//!
//! # Sign Ambiguity
//!
//! An eigenvector is only defined up to sign, and the solver makes no promise
//! about which sign it returns. Projections can therefore flip per component
//! between fits or versions; compare them sign-invariantly.
//!
//! # Reconstruction Error
//!
//! [`Pca::reconstruction_error`] is reported **per feature**, so it can be
//! set against [`column_variance`](crate::preprocess::column_variance): a
//! feature whose error is close to its variance was mostly thrown away.

use super::traits::DimensionReducer;
use crate::error::{Error, Result};
use faer::{Mat, Side};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use tracing::debug;

#[derive(Debug, Clone)]
struct Fitted {
    mean: Array1<f64>,
    /// D × k, orthonormal columns, descending eigenvalue.
    components: Array2<f64>,
    explained_variance: Array1<f64>,
    total_variance: f64,
}

/// Principal Component Analysis.
#[derive(Debug, Clone)]
pub struct Pca {
    n_components: usize,
    fitted: Option<Fitted>,
}

impl Pca {
    /// Create a PCA that keeps `n_components` principal axes.
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            fitted: None,
        }
    }

    /// Number of components kept.
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Per-feature training mean.
    pub fn mean(&self) -> Option<ArrayView1<'_, f64>> {
        self.fitted.as_ref().map(|f| f.mean.view())
    }

    /// Principal axes as columns (D × k), ordered by descending variance.
    pub fn components(&self) -> Option<ArrayView2<'_, f64>> {
        self.fitted.as_ref().map(|f| f.components.view())
    }

    /// Variance captured by each kept component (its eigenvalue).
    pub fn explained_variance(&self) -> Option<ArrayView1<'_, f64>> {
        self.fitted.as_ref().map(|f| f.explained_variance.view())
    }

    /// Fraction of total variance captured by each kept component.
    ///
    /// All zeros when the training data had no variance at all.
    pub fn explained_variance_ratio(&self) -> Option<Array1<f64>> {
        self.fitted.as_ref().map(|f| {
            if f.total_variance > 0.0 {
                &f.explained_variance / f.total_variance
            } else {
                Array1::zeros(f.explained_variance.len())
            }
        })
    }

    /// Map projected rows back to the original feature space.
    pub fn inverse_transform(&self, transformed: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let state = self.state()?;
        if transformed.ncols() != state.components.ncols() {
            return Err(Error::DimensionMismatch {
                expected: state.components.ncols(),
                found: transformed.ncols(),
            });
        }
        Ok(transformed.dot(&state.components.t()) + &state.mean)
    }

    /// Per-feature mean squared error between `data` and the reconstruction
    /// of `transformed`.
    ///
    /// Returns one value per original feature, averaged over rows.
    pub fn reconstruction_error(
        &self,
        data: ArrayView2<'_, f64>,
        transformed: ArrayView2<'_, f64>,
    ) -> Result<Array1<f64>> {
        let state = self.state()?;
        check_features(&data, state.mean.len())?;
        if data.nrows() != transformed.nrows() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} projected rows", data.nrows()),
                actual: format!("{} projected rows", transformed.nrows()),
            });
        }
        if data.nrows() == 0 {
            return Err(Error::EmptyInput);
        }

        let reconstructed = self.inverse_transform(transformed)?;
        let residual = &data - &reconstructed;
        residual
            .mapv(|v| v * v)
            .mean_axis(Axis(0))
            .ok_or(Error::EmptyInput)
    }

    fn state(&self) -> Result<&Fitted> {
        self.fitted.as_ref().ok_or(Error::NotFitted)
    }
}

impl DimensionReducer for Pca {
    fn fit(&mut self, data: ArrayView2<'_, f64>) -> Result<()> {
        let (n, d) = data.dim();
        if self.n_components == 0 {
            return Err(Error::InvalidParameter {
                name: "n_components",
                message: "must be at least 1",
            });
        }
        if n < 2 {
            return Err(Error::InsufficientSamples {
                required: 2,
                found: n,
            });
        }
        if d < self.n_components {
            return Err(Error::InvalidComponentCount {
                requested: self.n_components,
                n_features: d,
            });
        }

        let mean = data.mean_axis(Axis(0)).ok_or(Error::EmptyInput)?;
        let centered = &data - &mean;
        let cov = centered.t().dot(&centered) / (n as f64 - 1.0);
        let total_variance = cov.diag().sum();

        let (eigenvalues, eigenvectors) = symmetric_eigen(&cov)?;

        let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
        order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));
        order.truncate(self.n_components);

        let mut components = Array2::zeros((d, self.n_components));
        for (col, &src) in order.iter().enumerate() {
            components.column_mut(col).assign(&eigenvectors.column(src));
        }
        let explained_variance: Array1<f64> =
            order.iter().map(|&i| eigenvalues[i].max(0.0)).collect();

        debug!(
            n_samples = n,
            n_features = d,
            n_components = self.n_components,
            retained = explained_variance.sum(),
            total = total_variance,
            "pca fitted"
        );

        self.fitted = Some(Fitted {
            mean,
            components,
            explained_variance,
            total_variance,
        });
        Ok(())
    }

    fn transform(&self, data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let state = self.state()?;
        check_features(&data, state.mean.len())?;
        Ok((&data - &state.mean).dot(&state.components))
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}

fn check_features(data: &ArrayView2<'_, f64>, expected: usize) -> Result<()> {
    if data.ncols() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            found: data.ncols(),
        });
    }
    Ok(())
}

/// Eigenvalues (solver order) and matching eigenvector columns of a
/// symmetric matrix.
fn symmetric_eigen(matrix: &Array2<f64>) -> Result<(Vec<f64>, Array2<f64>)> {
    let (rows, cols) = matrix.dim();
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(Error::Decomposition(
            "covariance contains non-finite entries".to_string(),
        ));
    }

    let mat = Mat::from_fn(rows, cols, |i, j| matrix[[i, j]]);
    let eig = mat
        .as_ref()
        .self_adjoint_eigen(Side::Lower)
        .map_err(|e| Error::Decomposition(format!("{e:?}")))?;

    let diag = eig.S();
    let eigenvalues: Vec<f64> = (0..diag.dim()).map(|idx| diag[idx]).collect();

    let vectors = eig.U();
    let eigenvectors =
        Array2::from_shape_fn((vectors.nrows(), vectors.ncols()), |(i, j)| vectors[(i, j)]);

    Ok((eigenvalues, eigenvectors))
}
