//! Restartable batch sequences.
//!
//! The clustering engine never sees a whole dataset at once. It walks a
//! [`BatchSource`] once to seed its centroids and then once per epoch, so a
//! source must hand out the same batches in the same order on every call to
//! [`BatchSource::iter_batches`]. A one-shot stream does not qualify.
//!
//! ```rust
//! use ndarray::array;
//! use vitals::batch::{BatchSource, Batched};
//!
//! let data = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
//! let batches = Batched::new(data.view(), 2).unwrap();
//!
//! let sizes: Vec<usize> = batches.iter_batches().map(|b| b.nrows()).collect();
//! assert_eq!(sizes, vec![2, 1]);
//! ```

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2, Axis};

/// An ordered, re-iterable sequence of row batches.
pub trait BatchSource {
    /// Start a fresh pass over the batches, in their fixed order.
    fn iter_batches(&self) -> impl Iterator<Item = ArrayView2<'_, f64>> + '_;
}

/// A matrix split into consecutive row chunks of a fixed size.
///
/// The last chunk may be shorter. Rows are never shuffled.
#[derive(Debug, Clone, Copy)]
pub struct Batched<'a> {
    data: ArrayView2<'a, f64>,
    batch_size: usize,
}

impl<'a> Batched<'a> {
    /// Split `data` into batches of `batch_size` rows.
    pub fn new(data: ArrayView2<'a, f64>, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidParameter {
                name: "batch_size",
                message: "must be at least 1",
            });
        }
        Ok(Self { data, batch_size })
    }

    /// Rows per full batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Total number of rows across all batches.
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of batches one pass yields.
    pub fn n_batches(&self) -> usize {
        self.data.nrows().div_ceil(self.batch_size)
    }
}

impl BatchSource for Batched<'_> {
    fn iter_batches(&self) -> impl Iterator<Item = ArrayView2<'_, f64>> + '_ {
        self.data.axis_chunks_iter(Axis(0), self.batch_size)
    }
}

impl BatchSource for [Array2<f64>] {
    fn iter_batches(&self) -> impl Iterator<Item = ArrayView2<'_, f64>> + '_ {
        self.iter().map(|b| b.view())
    }
}

impl BatchSource for Vec<Array2<f64>> {
    fn iter_batches(&self) -> impl Iterator<Item = ArrayView2<'_, f64>> + '_ {
        self.as_slice().iter_batches()
    }
}
