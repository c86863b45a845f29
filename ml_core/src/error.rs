use std::fmt;

/// The result type used across the core training and aggregation routines.
pub type Result<T> = std::result::Result<T, MlError>;

/// Errors produced by the core when inputs are invalid.
#[derive(Debug, Clone, PartialEq)]
pub enum MlError {
    /// Training was requested over an empty point set.
    InsufficientData,

    /// The aggregation weight is negative or not a finite number.
    InvalidWeight(f64),

    /// The reference set has zero variance in `y`, so R² is undefined.
    DegenerateVariance,

    /// Training produced a non-finite slope or intercept.
    Diverged {
        /// Epoch (zero based) at which the parameters stopped being finite.
        epoch: usize,
    },

    /// Aggregation produced a non-finite slope or intercept.
    Overflow,
}

impl fmt::Display for MlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlError::InsufficientData => write!(f, "insufficient data: the point set is empty"),
            MlError::InvalidWeight(weight) => {
                write!(f, "invalid aggregation weight: got {weight}, expected a finite value >= 0")
            }
            MlError::DegenerateVariance => {
                write!(f, "degenerate variance: every y in the reference set is identical")
            }
            MlError::Diverged { epoch } => {
                write!(f, "training diverged at epoch {epoch}: parameters are no longer finite")
            }
            MlError::Overflow => {
                write!(f, "aggregation overflowed: the blended model is not finite")
            }
        }
    }
}

impl std::error::Error for MlError {}
