mod data;
mod error;
mod loss;
mod model;
mod stats;

pub use data::Point;
pub use error::{MlError, Result};
pub use loss::{LossFn, LossKind, Mae, Mse};
pub use model::RegressionModel;
pub use stats::{RegressionStats, compute_stats};
