mod aggregator;
mod weighted_average;

pub use aggregator::Aggregator;
pub use weighted_average::{WeightedAverage, aggregate};
