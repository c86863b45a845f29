mod simulation;

pub use simulation::{LossFnConfig, ModelInitConfig, SimulationConfig};
