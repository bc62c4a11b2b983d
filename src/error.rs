use core::fmt;

/// Result alias for `vitals`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the reduction and clustering engines.
///
/// Every error is raised before any fitted state is touched, so a failed
/// `fit` leaves the engine exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input had no rows (or no batches) where at least one is required.
    EmptyInput,

    /// Not enough rows for the requested statistic.
    InsufficientSamples {
        /// Minimum number of rows.
        required: usize,
        /// Rows supplied.
        found: usize,
    },

    /// Feature-count mismatch between fit-time and query-time data.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Shape mismatch (string description).
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// A query was made before `fit`.
    NotFitted,

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
    },

    /// More principal components requested than there are features.
    InvalidComponentCount {
        /// Requested component count.
        requested: usize,
        /// Number of features in the training data.
        n_features: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// The symmetric eigensolver failed.
    Decomposition(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::InsufficientSamples { required, found } => {
                write!(f, "need at least {required} samples, found {found}")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, actual {actual}")
            }
            Error::NotFitted => write!(f, "model has not been fitted"),
            Error::InvalidClusterCount { requested } => {
                write!(f, "cannot create {requested} clusters")
            }
            Error::InvalidComponentCount {
                requested,
                n_features,
            } => {
                write!(
                    f,
                    "cannot keep {requested} components from {n_features} features"
                )
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Decomposition(msg) => write!(f, "eigendecomposition failed: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
