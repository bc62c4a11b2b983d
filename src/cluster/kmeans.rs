//! Mini-batch K-means with an online centroid update.
//!
//! Partitions data into k clusters without ever holding the whole dataset:
//! centroids are refined batch by batch, each one nudged toward the mean of
//! the points it won in that batch.
//!
//! # The Update Rule
//!
//! For every batch, each point is assigned to its nearest centroid and every
//! centroid that won at least one point moves part of the way toward their
//! mean:
//!
//! ```text
//! μₖ ← (1 − η) μₖ + η · mean(xᵢ : label(xᵢ) = k)
//! ```
//!
//! `η` is the learning rate. With η = 1 a single batch fully determines the
//! centroid, which is Lloyd's update restricted to that batch.
//!
//! # Epochs
//!
//! One epoch walks every batch in order. Because each batch sees the
//! centroids left by the previous one, **batch order matters**: the same
//! batches in a different order generally end somewhere else.
//!
//! At the end of an epoch:
//!
//! 1. A centroid that won no point in any batch is moved to a random row of
//!    the last non-empty batch of that epoch.
//! 2. If no centroid coordinate moved by `tol` or more since the epoch
//!    began, the fit stops and reports convergence.
//!
//! # Failure Modes
//!
//! - **First-batch seeding**: the default [`InitPolicy::FirstBatch`] only sees
//!   the first batch, so a small or skewed first batch seeds badly. Use
//!   [`InitPolicy::Reservoir`] or [`InitPolicy::PlusPlus`] when that matters.
//! - **Local optima**: like every k-means, the result depends on seeding.
//!   Compare restarts with [`MiniBatchKmeans::inertia`].

use super::distance::{nearest_centroids, squared_distance};
use super::init::{seed_centroids, InitPolicy};
use super::traits::{Clustering, FitReport};
use crate::batch::BatchSource;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};
use rand::prelude::*;
use tracing::{debug, trace, warn};

/// Mini-batch K-means clustering engine.
#[derive(Debug, Clone)]
pub struct MiniBatchKmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum passes over the batch sequence.
    max_epochs: usize,
    /// Weight of the batch mean in each centroid update.
    learning_rate: f64,
    /// Convergence tolerance (max coordinate shift per epoch).
    tol: f64,
    /// Random seed.
    seed: Option<u64>,
    /// Seeding policy.
    init: InitPolicy,
    /// Learned centroids, `k × d`.
    centroids: Option<Array2<f64>>,
}

impl MiniBatchKmeans {
    /// Create a new mini-batch K-means engine with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_epochs: 100,
            learning_rate: 0.1,
            tol: 1e-6,
            seed: None,
            init: InitPolicy::FirstBatch,
            centroids: None,
        }
    }

    /// Set the maximum number of epochs.
    pub fn with_max_epochs(mut self, max_epochs: usize) -> Self {
        self.max_epochs = max_epochs;
        self
    }

    /// Set the learning rate, in (0, 1].
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the centroid seeding policy.
    pub fn with_init(mut self, init: InitPolicy) -> Self {
        self.init = init;
        self
    }

    /// Learned centroids, one row per cluster. `None` before `fit`.
    pub fn centroids(&self) -> Option<ArrayView2<'_, f64>> {
        self.centroids.as_ref().map(|c| c.view())
    }

    /// Whether `fit` has completed at least once.
    pub fn is_fitted(&self) -> bool {
        self.centroids.is_some()
    }

    /// Sum of squared distances from every row to its nearest centroid.
    pub fn inertia<B: BatchSource + ?Sized>(&self, batches: &B) -> Result<f64> {
        let centroids = self.fitted()?;
        let mut total = 0.0;
        for batch in batches.iter_batches() {
            check_width(&batch, centroids.ncols())?;
            let labels = nearest_centroids(batch, centroids.view());
            for (point, &label) in batch.rows().into_iter().zip(&labels) {
                total += squared_distance(&point, &centroids.row(label));
            }
        }
        Ok(total)
    }

    fn fitted(&self) -> Result<&Array2<f64>> {
        self.centroids.as_ref().ok_or(Error::NotFitted)
    }

    fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidClusterCount { requested: self.k });
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "learning_rate",
                message: "must be in (0, 1]",
            });
        }
        if !(self.tol > 0.0) {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be positive",
            });
        }
        Ok(())
    }

    /// One pass over every batch. Returns per-cluster assignment counts and
    /// the last non-empty batch seen.
    fn run_epoch<'b, B: BatchSource + ?Sized>(
        &self,
        batches: &'b B,
        centroids: &mut Array2<f64>,
    ) -> Result<(Vec<usize>, Option<ArrayView2<'b, f64>>)> {
        let d = centroids.ncols();
        let mut counts = vec![0usize; self.k];
        let mut last = None;

        for (batch_idx, batch) in batches.iter_batches().enumerate() {
            if batch.nrows() == 0 {
                continue;
            }
            check_width(&batch, d)?;

            let labels = nearest_centroids(batch, centroids.view());

            let mut sums = Array2::<f64>::zeros((self.k, d));
            let mut batch_counts = vec![0usize; self.k];
            for (point, &label) in batch.rows().into_iter().zip(&labels) {
                let mut sum = sums.row_mut(label);
                sum += &point;
                batch_counts[label] += 1;
            }

            for (i, &count) in batch_counts.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                counts[i] += count;
                let mean = sums.row(i).mapv(|v| v / count as f64);
                let mut centroid = centroids.row_mut(i);
                centroid *= 1.0 - self.learning_rate;
                centroid.scaled_add(self.learning_rate, &mean);
            }

            trace!(batch = batch_idx, rows = batch.nrows(), "applied batch update");
            last = Some(batch);
        }

        Ok((counts, last))
    }
}

impl Clustering for MiniBatchKmeans {
    fn fit<B: BatchSource + ?Sized>(&mut self, batches: &B) -> Result<FitReport> {
        self.validate()?;

        let first = batches
            .iter_batches()
            .next()
            .ok_or(Error::EmptyInput)?;
        if first.nrows() == 0 {
            return Err(Error::EmptyInput);
        }

        // Initialize RNG
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut centroids = seed_centroids(self.init, self.k, first, batches, &mut rng)?;
        let mut report = FitReport {
            epochs_run: 0,
            converged: false,
            max_shift: f64::INFINITY,
        };

        for epoch in 0..self.max_epochs {
            let previous = centroids.clone();
            let (counts, last) = self.run_epoch(batches, &mut centroids)?;

            if let Some(last) = last {
                for (i, &count) in counts.iter().enumerate() {
                    if count > 0 {
                        continue;
                    }
                    let idx = rng.random_range(0..last.nrows());
                    centroids.row_mut(i).assign(&last.row(idx));
                    warn!(cluster = i, epoch, "cluster won no points; reinitialized from last batch");
                }
            }

            let shift = centroids
                .iter()
                .zip(previous.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);

            report.epochs_run = epoch + 1;
            report.max_shift = shift;
            debug!(epoch, max_shift = shift, "k-means epoch finished");

            if shift < self.tol {
                report.converged = true;
                break;
            }
        }

        debug!(
            epochs = report.epochs_run,
            converged = report.converged,
            "k-means fit finished"
        );
        self.centroids = Some(centroids);
        Ok(report)
    }

    fn assign<B: BatchSource + ?Sized>(&self, batches: &B) -> Result<Vec<usize>> {
        let centroids = self.fitted()?;
        let mut labels = Vec::new();
        for batch in batches.iter_batches() {
            check_width(&batch, centroids.ncols())?;
            labels.extend(nearest_centroids(batch, centroids.view()));
        }
        Ok(labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

fn check_width(batch: &ArrayView2<'_, f64>, d: usize) -> Result<()> {
    if batch.nrows() > 0 && batch.ncols() != d {
        return Err(Error::DimensionMismatch {
            expected: d,
            found: batch.ncols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::Batched;
    use ndarray::array;

    fn two_groups() -> Array2<f64> {
        array![
            [0.0, 0.0],
            [10.0, 10.0],
            [0.1, 0.1],
            [10.1, 10.1],
            [0.2, 0.0],
            [10.0, 10.2],
        ]
    }

    #[test]
    fn test_kmeans_basic() {
        let data = two_groups();
        let batches = Batched::new(data.view(), 2).unwrap();

        let mut kmeans = MiniBatchKmeans::new(2)
            .with_seed(42)
            .with_init(InitPolicy::PlusPlus)
            .with_learning_rate(0.5);
        let labels = kmeans.fit_assign(&batches).unwrap();

        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[0], labels[4]);
        assert_eq!(labels[1], labels[3]);
        assert_eq!(labels[1], labels[5]);
        assert_ne!(labels[0], labels[1]);
    }

    #[test]
    fn test_fit_report_counts_epochs() {
        let data = two_groups();
        let batches = Batched::new(data.view(), 3).unwrap();

        let mut kmeans = MiniBatchKmeans::new(2).with_seed(1).with_max_epochs(3).with_tol(1e-300);
        let report = kmeans.fit(&batches).unwrap();
        assert_eq!(report.epochs_run, 3);
        assert!(!report.converged);
    }

    #[test]
    fn test_single_point_converges_immediately() {
        // Every centroid starts on the only point and never moves.
        let data = array![[3.0, 4.0]];
        let batches = Batched::new(data.view(), 1).unwrap();

        let mut kmeans = MiniBatchKmeans::new(1).with_seed(0).with_learning_rate(1.0);
        let report = kmeans.fit(&batches).unwrap();
        assert!(report.converged);
        assert_eq!(report.epochs_run, 1);
        assert_eq!(report.max_shift, 0.0);
        assert_eq!(kmeans.centroids().unwrap().row(0).to_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_online_update_rule() {
        // k = 1, one epoch: c ← 0.5·c + 0.5·mean, applied per batch.
        let batches = vec![array![[2.0]], array![[4.0], [6.0]]];
        let mut kmeans = MiniBatchKmeans::new(1)
            .with_seed(0)
            .with_learning_rate(0.5)
            .with_max_epochs(1);
        kmeans.fit(&batches).unwrap();

        // Seed is 2.0; batch 1 mean 2.0 keeps it; batch 2 mean 5.0 gives 3.5.
        let c = kmeans.centroids().unwrap();
        assert!((c[[0, 0]] - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_starved_cluster_reinitialized_from_last_batch() {
        // Both centroids seed on the same point; the second one never wins a
        // point (ties go to index 0) so it must be moved into the last batch.
        let batches = vec![array![[0.0]], array![[100.0]]];
        let mut kmeans = MiniBatchKmeans::new(2).with_seed(5).with_max_epochs(1);
        kmeans.fit(&batches).unwrap();

        let c = kmeans.centroids().unwrap();
        assert_eq!(c[[1, 0]], 100.0);
    }

    #[test]
    fn test_trailing_empty_batch_is_not_reinit_source() {
        // The epoch ends on an empty batch; the starved centroid must still be
        // moved into the last batch that had rows.
        let batches = vec![array![[0.0]], array![[100.0]], Array2::<f64>::zeros((0, 1))];
        let mut kmeans = MiniBatchKmeans::new(2).with_seed(5).with_max_epochs(1);
        kmeans.fit(&batches).unwrap();

        let c = kmeans.centroids().unwrap();
        assert_eq!(c[[1, 0]], 100.0);
    }

    #[test]
    fn test_empty_batches_are_skipped() {
        let batches = vec![
            array![[1.0, 1.0], [1.2, 1.0]],
            Array2::<f64>::zeros((0, 2)),
            array![[1.1, 0.9]],
        ];
        let mut kmeans = MiniBatchKmeans::new(1).with_seed(9);
        kmeans.fit(&batches).unwrap();

        let labels = kmeans.assign(&batches).unwrap();
        assert_eq!(labels, vec![0, 0, 0]);
    }

    #[test]
    fn test_assign_concatenates_batches() {
        let data = two_groups();
        let mut kmeans = MiniBatchKmeans::new(2).with_seed(11).with_init(InitPolicy::PlusPlus);
        kmeans.fit(&Batched::new(data.view(), 6).unwrap()).unwrap();

        let whole = kmeans.assign(&Batched::new(data.view(), 6).unwrap()).unwrap();
        let split = kmeans.assign(&Batched::new(data.view(), 4).unwrap()).unwrap();
        assert_eq!(whole.len(), 6);
        assert_eq!(whole, split);
    }

    #[test]
    fn test_assign_before_fit_error() {
        let data = two_groups();
        let mut kmeans = MiniBatchKmeans::new(2);
        assert!(!kmeans.is_fitted());
        let result = kmeans.assign(&Batched::new(data.view(), 2).unwrap());
        assert_eq!(result, Err(Error::NotFitted));

        kmeans.fit(&Batched::new(data.view(), 2).unwrap()).unwrap();
        assert!(kmeans.is_fitted());
    }

    #[test]
    fn test_no_batches_error() {
        let batches: Vec<Array2<f64>> = vec![];
        let mut kmeans = MiniBatchKmeans::new(2);
        assert_eq!(kmeans.fit(&batches), Err(Error::EmptyInput));
    }

    #[test]
    fn test_empty_first_batch_error() {
        let batches = vec![Array2::<f64>::zeros((0, 2)), array![[1.0, 2.0]]];
        let mut kmeans = MiniBatchKmeans::new(1);
        assert_eq!(kmeans.fit(&batches), Err(Error::EmptyInput));
    }

    #[test]
    fn test_invalid_hyperparameters() {
        let batches = vec![array![[1.0]]];

        let mut zero_k = MiniBatchKmeans::new(0);
        assert!(matches!(zero_k.fit(&batches), Err(Error::InvalidClusterCount { .. })));

        for lr in [0.0, -0.5, 1.5, f64::NAN] {
            let mut kmeans = MiniBatchKmeans::new(1).with_learning_rate(lr);
            assert!(matches!(
                kmeans.fit(&batches),
                Err(Error::InvalidParameter { name: "learning_rate", .. })
            ));
        }

        let mut zero_tol = MiniBatchKmeans::new(1).with_tol(0.0);
        assert!(matches!(
            zero_tol.fit(&batches),
            Err(Error::InvalidParameter { name: "tol", .. })
        ));
    }

    #[test]
    fn test_failed_fit_keeps_previous_centroids() {
        let good = vec![array![[1.0, 1.0], [2.0, 2.0]]];
        let mut kmeans = MiniBatchKmeans::new(1).with_seed(3);
        kmeans.fit(&good).unwrap();
        let before = kmeans.centroids().unwrap().to_owned();

        let ragged = vec![array![[1.0, 1.0]], array![[1.0, 2.0, 3.0]]];
        assert!(matches!(
            kmeans.fit(&ragged),
            Err(Error::DimensionMismatch { expected: 2, found: 3 })
        ));
        assert_eq!(kmeans.centroids().unwrap(), before.view());
    }

    #[test]
    fn test_assign_dimension_mismatch() {
        let batches = vec![array![[1.0, 1.0]]];
        let mut kmeans = MiniBatchKmeans::new(1).with_seed(0);
        kmeans.fit(&batches).unwrap();

        let wrong = vec![array![[1.0, 1.0, 1.0]]];
        assert_eq!(
            kmeans.assign(&wrong),
            Err(Error::DimensionMismatch { expected: 2, found: 3 })
        );
    }

    #[test]
    fn test_refit_replaces_centroids() {
        let mut kmeans = MiniBatchKmeans::new(1).with_seed(0).with_learning_rate(1.0);
        kmeans.fit(&vec![array![[1.0]]]).unwrap();
        kmeans.fit(&vec![array![[-7.0, 2.0]]]).unwrap();

        let c = kmeans.centroids().unwrap();
        assert_eq!(c.dim(), (1, 2));
        assert_eq!(c.row(0).to_vec(), vec![-7.0, 2.0]);
    }

    #[test]
    fn test_inertia_zero_on_centroids() {
        let batches = vec![array![[1.0, 1.0], [1.0, 1.0]]];
        let mut kmeans = MiniBatchKmeans::new(1).with_seed(0).with_learning_rate(1.0);
        kmeans.fit(&batches).unwrap();
        assert_eq!(kmeans.inertia(&batches).unwrap(), 0.0);
    }
}
