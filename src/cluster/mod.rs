//! Clustering of batched feature vectors.
//!
//! The engine here is a **mini-batch K-means**: instead of recomputing each
//! centroid as the mean of all its points (Lloyd), it moves centroids toward
//! per-batch means with an exponential update. That lets the data arrive as
//! a [`BatchSource`](crate::batch::BatchSource) of chunks rather than one
//! matrix.
//!
//! ## K-means
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! In the sensor pipeline the input is usually the PCA projection of
//! standardized records, so distances are taken in the reduced space.
//!
//! ## Usage
//!
//! ```rust
//! use ndarray::array;
//! use vitals::batch::Batched;
//! use vitals::cluster::{Clustering, InitPolicy, MiniBatchKmeans};
//!
//! let data = array![
//!     [0.0, 0.0],
//!     [10.0, 10.0],
//!     [0.1, 0.1],
//!     [10.1, 10.1],
//! ];
//! let batches = Batched::new(data.view(), 2).unwrap();
//!
//! let mut kmeans = MiniBatchKmeans::new(2)
//!     .with_seed(7)
//!     .with_init(InitPolicy::PlusPlus);
//! let report = kmeans.fit(&batches).unwrap();
//! assert!(report.epochs_run >= 1);
//!
//! let labels = kmeans.assign(&batches).unwrap();
//! assert_eq!(labels[0], labels[2]);
//! assert_ne!(labels[0], labels[1]);
//! ```

mod distance;
mod init;
mod kmeans;
mod traits;

pub use distance::{nearest_centroids, pairwise_distances};
pub use init::InitPolicy;
pub use kmeans::MiniBatchKmeans;
pub use traits::{Clustering, FitReport};
