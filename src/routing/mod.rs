pub mod graph;
pub mod risk_index;

pub use graph::{RegionGraph, DEFAULT_HOURS_PER_DISTANCE_UNIT};
pub use risk_index::{RegionRiskIndex, RiskEntry};
