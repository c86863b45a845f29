use ml_core::RegressionModel;

use super::ModelGen;

/// A model generator that always generates the same model.
#[derive(Debug, Clone, Copy)]
pub struct ConstModelGen {
    model: RegressionModel,
}

impl ConstModelGen {
    /// Creates a new `ConstModelGen` model generator.
    ///
    /// # Arguments
    /// * `model` - The model to always generate.
    ///
    /// # Returns
    /// A new `ConstModelGen` instance.
    pub fn new(model: RegressionModel) -> Self {
        Self { model }
    }
}

impl Default for ConstModelGen {
    /// The identity line `y = x`.
    fn default() -> Self {
        Self::new(RegressionModel::new(1., 0.))
    }
}

impl ModelGen for ConstModelGen {
    fn sample(&mut self) -> RegressionModel {
        self.model
    }
}
