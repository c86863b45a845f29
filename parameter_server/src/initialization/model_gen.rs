use ml_core::RegressionModel;

/// A `ModelGen` generates the starting state of the global model.
pub trait ModelGen {
    /// Should produce a new model each time it's called.
    ///
    /// # Returns
    /// A finite `RegressionModel`.
    fn sample(&mut self) -> RegressionModel;
}
