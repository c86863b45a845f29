use ml_core::MlError;

use crate::{Result, SimulationError};

/// Process wide training settings, read by local training and aggregation.
///
/// Setters validate their input, so a `Hyperparameters` value is always usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
    epochs: usize,
    learning_rate: f64,
    aggregation_weight: f64,
}

impl Hyperparameters {
    /// Creates a new `Hyperparameters`.
    ///
    /// # Args
    /// * `epochs` - Gradient steps per local training run.
    /// * `learning_rate` - Scale of every gradient step, must be finite.
    /// * `aggregation_weight` - Influence of a pushed local model, must be finite and `>= 0`.
    ///
    /// # Errors
    /// `SimulationError::InvalidLearningRate` or `MlError::InvalidWeight`.
    pub fn new(epochs: usize, learning_rate: f64, aggregation_weight: f64) -> Result<Self> {
        let mut hyperparameters = Self::default();
        hyperparameters.set_epochs(epochs);
        hyperparameters.set_learning_rate(learning_rate)?;
        hyperparameters.set_aggregation_weight(aggregation_weight)?;
        Ok(hyperparameters)
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn aggregation_weight(&self) -> f64 {
        self.aggregation_weight
    }

    pub fn set_epochs(&mut self, epochs: usize) {
        self.epochs = epochs;
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        if !learning_rate.is_finite() {
            return Err(SimulationError::InvalidLearningRate(learning_rate));
        }

        self.learning_rate = learning_rate;
        Ok(())
    }

    pub fn set_aggregation_weight(&mut self, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0. {
            return Err(MlError::InvalidWeight(weight).into());
        }

        self.aggregation_weight = weight;
        Ok(())
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            epochs: 15,
            learning_rate: 0.1,
            aggregation_weight: 1.,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let hp = Hyperparameters::default();

        assert_eq!(hp.epochs(), 15);
        assert_eq!(hp.learning_rate(), 0.1);
        assert_eq!(hp.aggregation_weight(), 1.);
    }

    #[test]
    fn zero_values_are_allowed() {
        let hp = Hyperparameters::new(0, 0., 0.).unwrap();

        assert_eq!(hp.epochs(), 0);
        assert_eq!(hp.learning_rate(), 0.);
        assert_eq!(hp.aggregation_weight(), 0.);
    }

    #[test]
    fn negative_weight_leaves_value_unchanged() {
        let mut hp = Hyperparameters::default();
        let err = hp.set_aggregation_weight(-1.).unwrap_err();

        assert!(matches!(err, SimulationError::Ml(MlError::InvalidWeight(w)) if w == -1.));
        assert_eq!(hp.aggregation_weight(), 1.);
    }

    #[test]
    fn nan_learning_rate_is_rejected() {
        let mut hp = Hyperparameters::default();

        assert!(matches!(
            hp.set_learning_rate(f64::NAN),
            Err(SimulationError::InvalidLearningRate(_))
        ));
        assert_eq!(hp.learning_rate(), 0.1);
    }
}
