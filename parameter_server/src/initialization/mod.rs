mod constant;
mod error;
mod model_gen;
mod random;

pub use constant::ConstModelGen;
pub use error::{RandErr, Result};
pub use model_gen::ModelGen;
pub use random::{INTERCEPT_RANGE, RandModelGen, SLOPE_RANGE};
