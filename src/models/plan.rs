use serde::{Deserialize, Serialize};

/// Minimum-weight path between two regions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// Regions from origin to destination, inclusive
    pub path: Vec<String>,

    /// Sum of edge weights along the path
    pub distance: f64,

    /// Travel time estimate in hours
    pub estimated_hours: f64,
}

impl Route {
    pub fn origin(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Regions crossed between origin and destination
    pub fn intermediate_stops(&self) -> usize {
        self.path.len().saturating_sub(2)
    }
}

/// One ranked stop of a multi-region response plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionPlan {
    pub region: String,
    pub path: Vec<String>,
    pub distance: f64,
    pub estimated_hours: f64,
    pub incident_count: usize,
    pub severity_avg: f64,

    /// `severity_avg * severity_weight - distance`
    pub score: f64,
}
