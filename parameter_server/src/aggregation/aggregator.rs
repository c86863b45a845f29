use ml_core::{RegressionModel, Result};

/// Defines how a client's locally refined model is merged into the global model.
pub trait Aggregator {
    /// Merges `local` into `global`.
    ///
    /// # Arguments
    /// * `global` - The server's current model.
    /// * `local` - The model pushed by a client.
    ///
    /// # Returns
    /// The new global model. Neither input is modified.
    ///
    /// # Errors
    /// `MlError::Overflow` if the merged model isn't finite.
    fn aggregate(&self, global: &RegressionModel, local: &RegressionModel)
    -> Result<RegressionModel>;
}
