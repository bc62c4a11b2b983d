//! # vitals
//!
//! Exploratory clustering of wearable-sensor records: standardize the
//! features, project them with PCA, and group the projections with an
//! online mini-batch k-means.
//!
//! ```text
//! records ─► matrix ─► standardize ─► Pca::fit/transform ─► MiniBatchKmeans::fit ─► assign
//! ```
//!
//! The two engines share nothing but the matrices passed between them.
//! Neither performs I/O; diagnostics go through `tracing` and only show up if
//! the caller installs a subscriber.
//!
//! ```rust
//! use ndarray::array;
//! use vitals::batch::Batched;
//! use vitals::cluster::{Clustering, InitPolicy, MiniBatchKmeans};
//! use vitals::reduce::{DimensionReducer, Pca};
//!
//! let data = array![
//!     [60.0, 98.0, 1200.0],
//!     [62.0, 97.0, 1500.0],
//!     [110.0, 95.0, 14000.0],
//!     [115.0, 96.0, 15500.0],
//! ];
//! let scaled = vitals::preprocess::standardize(data.view()).unwrap();
//!
//! let mut pca = Pca::new(2);
//! let projected = pca.fit_transform(scaled.view()).unwrap();
//!
//! let batches = Batched::new(projected.view(), 2).unwrap();
//! let mut kmeans = MiniBatchKmeans::new(2)
//!     .with_seed(3)
//!     .with_init(InitPolicy::PlusPlus);
//! let labels = kmeans.fit_assign(&batches).unwrap();
//! assert_eq!(labels.len(), 4);
//! ```

pub mod batch;
pub mod cluster;
pub mod datasets;
/// Error types used across `vitals`.
pub mod error;
pub mod metrics;
pub mod preprocess;
pub mod records;
pub mod reduce;


pub use batch::{BatchSource, Batched};
pub use cluster::{Clustering, FitReport, InitPolicy, MiniBatchKmeans};
pub use error::{Error, Result};
pub use metrics::{ari, purity};
pub use records::{records_to_matrix, SensorRecord, FEATURE_NAMES};
pub use reduce::{DimensionReducer, Pca};
