pub mod aggregation;
pub mod initialization;
