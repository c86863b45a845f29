use std::{fs, num::NonZeroUsize, path::Path};

use ml_core::{LossKind, RegressionModel};
use parameter_server::initialization::{INTERCEPT_RANGE, SLOPE_RANGE};
use serde::Deserialize;

use crate::{Hyperparameters, Result, SimulationError};

const DEFAULT_CLIENTS: NonZeroUsize = NonZeroUsize::new(3).unwrap();

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossFnConfig {
    #[default]
    Squared,
    Absolute,
}

impl From<LossFnConfig> for LossKind {
    fn from(value: LossFnConfig) -> Self {
        match value {
            LossFnConfig::Squared => LossKind::Squared,
            LossFnConfig::Absolute => LossKind::Absolute,
        }
    }
}

/// How the global model is initialized when the simulation starts.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelInitConfig {
    Const { slope: f64, intercept: f64 },
    Uniform,
}

impl Default for ModelInitConfig {
    fn default() -> Self {
        Self::Const {
            slope: 1.,
            intercept: 0.,
        }
    }
}

/// Everything needed to build a `SimulationState`.
///
/// Every field is optional in the JSON form and falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub clients: NonZeroUsize,
    pub epochs: usize,
    pub learning_rate: f64,
    pub aggregation_weight: f64,
    pub loss_fn: LossFnConfig,
    pub init: ModelInitConfig,
    pub slope_range: (f64, f64),
    pub intercept_range: (f64, f64),
    pub seed: Option<u64>,
    /// Train-and-push rounds run by the command line driver.
    pub rounds: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let hp = Hyperparameters::default();

        Self {
            clients: DEFAULT_CLIENTS,
            epochs: hp.epochs(),
            learning_rate: hp.learning_rate(),
            aggregation_weight: hp.aggregation_weight(),
            loss_fn: LossFnConfig::default(),
            init: ModelInitConfig::default(),
            slope_range: SLOPE_RANGE,
            intercept_range: INTERCEPT_RANGE,
            seed: None,
            rounds: 3,
        }
    }
}

impl SimulationConfig {
    /// Learning rate at which squared loss converges on the bundled presets.
    pub const DEMO_LEARNING_RATE: f64 = 0.01;

    /// The defaults with a learning rate small enough for squared loss to
    /// converge on the bundled presets, whose `x` spans `-10..=10`.
    pub fn demo() -> Self {
        Self {
            learning_rate: Self::DEMO_LEARNING_RATE,
            ..Default::default()
        }
    }

    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Errors
    /// Returns `SimulationError::InvalidConfig` if the JSON is malformed, or the
    /// matching validation error if a value is out of range.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    /// Returns `SimulationError::Io` if the file can't be read, otherwise see
    /// [`SimulationConfig::from_json_str`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The validated hyperparameters described by this config.
    pub fn hyperparameters(&self) -> Result<Hyperparameters> {
        Hyperparameters::new(self.epochs, self.learning_rate, self.aggregation_weight)
    }

    fn validate(&self) -> Result<()> {
        self.hyperparameters()?;

        match self.init {
            ModelInitConfig::Const { slope, intercept }
                if !RegressionModel::new(slope, intercept).is_finite() =>
            {
                Err(SimulationError::InvalidConfig(
                    "initial model must be finite".into(),
                ))
            }
            _ => Ok(()),
        }
    }
}
