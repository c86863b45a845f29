use std::{fmt, io};

use ml_core::MlError;
use parameter_server::initialization::RandErr;

/// The orchestrator's result type.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// All errors that can occur while driving a simulation.
///
/// Every operation that returns one of these leaves the `SimulationState` untouched.
#[derive(Debug)]
pub enum SimulationError {
    /// A coordinate is NaN or infinite.
    InvalidPoint { client_id: usize, x: f64, y: f64 },
    /// The client id is outside `1..=clients`.
    UnknownClient { client_id: usize, clients: usize },
    /// The learning rate is NaN or infinite.
    InvalidLearningRate(f64),
    /// Invalid configuration, caught before the simulation starts.
    InvalidConfig(String),
    /// Failed to read a configuration file.
    Io(io::Error),
    /// The training or aggregation engine rejected its inputs.
    Ml(MlError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPoint { client_id, x, y } => {
                write!(f, "invalid point ({x}, {y}) for client {client_id}: coordinates must be finite")
            }
            Self::UnknownClient { client_id, clients } => {
                write!(f, "unknown client {client_id}, expected a value in 1..={clients}")
            }
            Self::InvalidLearningRate(lr) => {
                write!(f, "invalid learning rate {lr}: it must be finite")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Ml(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Ml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlError> for SimulationError {
    fn from(e: MlError) -> Self {
        Self::Ml(e)
    }
}

impl From<io::Error> for SimulationError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<RandErr> for SimulationError {
    fn from(e: RandErr) -> Self {
        Self::InvalidConfig(format!("invalid sampling range: {e}"))
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidConfig(format!("invalid JSON: {e}"))
    }
}
