//! Dimensionality reduction traits.

use crate::error::Result;
use ndarray::{Array2, ArrayView2};

/// Contract for linear dimensionality reducers.
pub trait DimensionReducer {
    /// Learn the projection from `data` (rows are samples).
    ///
    /// On error the previously fitted state, if any, is kept.
    fn fit(&mut self, data: ArrayView2<'_, f64>) -> Result<()>;

    /// Project `data` into the learned subspace.
    fn transform(&self, data: ArrayView2<'_, f64>) -> Result<Array2<f64>>;

    /// Whether the model has been fitted.
    fn is_fitted(&self) -> bool;

    /// Fit on `data`, then project it.
    fn fit_transform(&mut self, data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        self.fit(data)?;
        self.transform(data)
    }
}
