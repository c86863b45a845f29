pub mod configs;
pub mod error;
mod hyperparameters;
pub mod presets;
mod simulation;

pub use error::{Result, SimulationError};
pub use hyperparameters::Hyperparameters;
pub use simulation::{DisplayFlags, RoundOutcome, SimulationState};

pub use ml_core::{Point, RegressionModel, RegressionStats};
