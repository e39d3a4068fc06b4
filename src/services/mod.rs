pub mod aggregation;
pub mod budget_api;
pub mod filter_state;
pub mod graph;
pub mod preferences;
