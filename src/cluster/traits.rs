//! Clustering traits.

use crate::batch::BatchSource;
use crate::error::Result;

/// Outcome of a clustering fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    /// Epochs actually run, including the one that converged.
    pub epochs_run: usize,
    /// Whether the centroid shift fell below the tolerance before the
    /// epoch budget ran out.
    pub converged: bool,
    /// Largest coordinate-wise centroid shift in the final epoch.
    pub max_shift: f64,
}

/// Trait for clustering engines that learn from batched data.
pub trait Clustering {
    /// Learn centroids from `batches`, replacing any previous fit.
    fn fit<B: BatchSource + ?Sized>(&mut self, batches: &B) -> Result<FitReport>;

    /// Label every row of `batches` with its nearest centroid.
    ///
    /// Labels are concatenated in batch order, one per input row.
    fn assign<B: BatchSource + ?Sized>(&self, batches: &B) -> Result<Vec<usize>>;

    /// Get the number of clusters.
    fn n_clusters(&self) -> usize;

    /// Fit, then label the same batches.
    fn fit_assign<B: BatchSource + ?Sized>(&mut self, batches: &B) -> Result<Vec<usize>> {
        self.fit(batches)?;
        self.assign(batches)
    }
}
