mod state;
mod trainer;

pub use state::ClientState;
pub use trainer::{FD_STEP, LocalTrainer, TrainReport};
