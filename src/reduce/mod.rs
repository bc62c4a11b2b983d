//! Dimensionality reduction.
//!
//! Sensor records carry a handful of correlated features (heart rate tracks
//! activity, steps track activity level). Projecting them onto a few
//! principal axes before clustering removes the redundancy and makes the
//! clusters easy to inspect in 2D.
//!
//! ```rust
//! use ndarray::array;
//! use vitals::reduce::{DimensionReducer, Pca};
//!
//! let data = array![
//!     [1.0, 2.0, 3.1],
//!     [2.0, 4.1, 5.9],
//!     [3.0, 6.0, 9.2],
//!     [4.0, 7.9, 12.1],
//! ];
//!
//! let mut pca = Pca::new(2);
//! let projected = pca.fit_transform(data.view()).unwrap();
//! assert_eq!(projected.dim(), (4, 2));
//!
//! let err = pca.reconstruction_error(data.view(), projected.view()).unwrap();
//! assert_eq!(err.len(), 3);
//! ```

mod pca;
mod traits;

pub use pca::Pca;
pub use traits::DimensionReducer;
