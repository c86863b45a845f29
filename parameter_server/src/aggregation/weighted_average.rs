use log::{debug, warn};
use ml_core::{MlError, RegressionModel, Result};

use super::Aggregator;

/// Blends a single client model into the global model:
/// `new = (global + local * weight) / (1 + weight)`.
///
/// This is not sample-count weighted federated averaging. Every push is merged
/// on its own with the same weight, regardless of how much data the client has.
#[derive(Debug, Clone, Copy)]
pub struct WeightedAverage {
    weight: f64,
}

impl WeightedAverage {
    /// Creates a new `WeightedAverage` aggregator.
    ///
    /// # Arguments
    /// * `weight` - Influence of the local model, `0` ignores it entirely.
    ///
    /// # Returns
    /// `MlError::InvalidWeight` if `weight` is negative or not finite.
    pub fn new(weight: f64) -> Result<Self> {
        if !weight.is_finite() || weight < 0. {
            return Err(MlError::InvalidWeight(weight));
        }

        Ok(Self { weight })
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Aggregator for WeightedAverage {
    fn aggregate(
        &self,
        global: &RegressionModel,
        local: &RegressionModel,
    ) -> Result<RegressionModel> {
        let w = self.weight;
        let blend = |g: f64, l: f64| (g + l * w) / (1. + w);

        let model = RegressionModel::new(
            blend(global.slope(), local.slope()),
            blend(global.intercept(), local.intercept()),
        );

        // `l * w` overflows for huge weights or huge local models.
        if !model.is_finite() {
            warn!(weight = w; "aggregating {local} into {global} overflowed");
            return Err(MlError::Overflow);
        }

        debug!(weight = w; "aggregated {local} into {global}, got {model}");
        Ok(model)
    }
}

/// Merges `local` into `global` with the given weight.
///
/// # Arguments
/// * `global` - The server's current model.
/// * `local` - The model pushed by a client.
/// * `weight` - Influence of the local model.
///
/// # Returns
/// The new global model.
///
/// # Errors
/// * `MlError::InvalidWeight` if `weight` is negative or not finite.
/// * `MlError::Overflow` if the merged model isn't finite.
pub fn aggregate(
    global: &RegressionModel,
    local: &RegressionModel,
    weight: f64,
) -> Result<RegressionModel> {
    WeightedAverage::new(weight)?.aggregate(global, local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_weight_is_midpoint() {
        let global = RegressionModel::new(1., 0.);
        let local = RegressionModel::new(3., 0.);

        assert_eq!(aggregate(&global, &local, 1.).unwrap(), RegressionModel::new(2., 0.));
    }

    #[test]
    fn zero_weight_keeps_global() {
        let global = RegressionModel::new(-0.4, 2.5);
        let local = RegressionModel::new(9., -9.);

        assert_eq!(aggregate(&global, &local, 0.).unwrap(), global);
    }

    #[test]
    fn large_weight_approaches_local() {
        let global = RegressionModel::new(-0.4, 2.5);
        let local = RegressionModel::new(9., -9.);
        let model = aggregate(&global, &local, 1e9).unwrap();

        assert!((model.slope() - local.slope()).abs() < 1e-6);
        assert!((model.intercept() - local.intercept()).abs() < 1e-6);
    }

    #[test]
    fn weighted_blend() {
        let global = RegressionModel::new(0., 4.);
        let local = RegressionModel::new(3., 1.);
        let model = aggregate(&global, &local, 2.).unwrap();

        assert_eq!(model, RegressionModel::new(2., 2.));
    }

    #[test]
    fn huge_weight_overflow_is_rejected() {
        let global = RegressionModel::new(1., 0.);
        let local = RegressionModel::new(3., 1.);

        assert_eq!(aggregate(&global, &local, 1e308).unwrap_err(), MlError::Overflow);
    }

    #[test]
    fn huge_local_model_overflow_is_rejected() {
        let global = RegressionModel::new(1., 0.);
        let local = RegressionModel::new(f64::MAX, 0.);

        assert_eq!(aggregate(&global, &local, 2.).unwrap_err(), MlError::Overflow);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = WeightedAverage::new(-0.5).unwrap_err();
        assert_eq!(err, MlError::InvalidWeight(-0.5));
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        assert!(WeightedAverage::new(f64::NAN).is_err());
        assert!(WeightedAverage::new(f64::INFINITY).is_err());
    }
}
