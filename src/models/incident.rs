use crate::error::{DispatchError, Result};
use crate::models::region::Coordinates;
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use validator::Validate;

/// Incident identifier, assigned monotonically from 1
pub type IncidentId = u64;

/// Represents a reported wildfire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    /// Unique identifier
    pub id: IncidentId,

    /// Region the fire was reported in
    pub region: String,

    /// Severity level
    pub severity: Severity,

    /// Reported position
    pub coordinates: Coordinates,

    /// Free-text description
    pub description: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Current status
    pub status: IncidentStatus,

    /// Team handling the incident, once dispatched
    pub assigned_team: Option<TeamId>,

    /// Actions performed on site, in order
    pub actions: Vec<String>,
}

impl Incident {
    /// Create a new pending incident
    pub fn new(
        id: IncidentId,
        region: String,
        severity: Severity,
        coordinates: Coordinates,
        description: String,
    ) -> Self {
        Self {
            id,
            region,
            severity,
            coordinates,
            description,
            created_at: Utc::now(),
            status: IncidentStatus::Pending,
            assigned_team: None,
            actions: Vec::new(),
        }
    }

    /// Assign a team and move to in-progress
    pub fn assign(&mut self, team_id: TeamId) {
        self.assigned_team = Some(team_id);
        self.status = IncidentStatus::InProgress;
    }

    pub fn is_pending(&self) -> bool {
        self.status == IncidentStatus::Pending
    }
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Incident {} - {} (severity {})",
            self.id, self.region, self.severity
        )
    }
}

/// Incident lifecycle status
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum IncidentStatus {
    Pending,
    InProgress,
    Resolved,
}

impl IncidentStatus {
    /// Parse a status name, surfacing `InvalidStatus` on failure
    pub fn parse(value: &str) -> Result<Self> {
        Self::from_str(value.trim()).map_err(|_| DispatchError::InvalidStatus(value.to_string()))
    }
}

/// Severity on a 1-10 scale, 10 being the most severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Validate a raw severity value
    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DispatchError::InvalidSeverity(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Severity {
    type Error = DispatchError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input for registering a new incident
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewIncident {
    /// Region name
    #[validate(length(min = 1, max = 255))]
    pub region: String,

    /// Raw severity, checked against the 1-10 scale
    pub severity: i64,

    /// Reported position
    pub coordinates: Coordinates,

    /// Optional description
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: String,
}

impl NewIncident {
    pub fn new(region: impl Into<String>, severity: i64, coordinates: Coordinates) -> Self {
        Self {
            region: region.into(),
            severity,
            coordinates,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
