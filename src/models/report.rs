//! Read-only summaries of coordinator state

use crate::models::team::{Specialization, TeamId};
use serde::{Deserialize, Serialize};

/// Active-incident summary for one region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionSummary {
    pub region: String,
    pub active_incidents: usize,
    pub severity_avg: f64,

    /// Configured risk priority, 0 when the region was never registered
    pub risk_level: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamStatus {
    pub id: TeamId,
    pub name: String,
    pub specialization: Specialization,
    pub available: bool,
}

/// Per-region breakdown plus team availability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionReport {
    pub regions: Vec<RegionSummary>,
    pub total_active: usize,
    pub teams: Vec<TeamStatus>,
}

/// Snapshot of coordinator counters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemStatus {
    pub active_incidents: usize,
    pub queued_incidents: usize,
    pub available_teams: usize,
    pub total_teams: usize,
    pub undo_depth: usize,
}

/// Connectivity figures for the region graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GraphStats {
    pub regions: usize,
    pub connections: usize,

    /// Mean number of neighbors per region
    pub average_connectivity: f64,
}

/// A region and its direct neighbors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionConnections {
    pub region: String,
    pub neighbors: Vec<Neighbor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Neighbor {
    pub region: String,
    pub distance: f64,
}
