use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Team identifier, assigned monotonically from 1
pub type TeamId = u64;

/// Response team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub specialization: Specialization,

    /// Whether the team can be matched to a new incident
    pub available: bool,

    /// Append-only action history, oldest first
    history: Vec<TeamAction>,
}

impl Team {
    pub fn new(id: TeamId, name: String, specialization: Specialization) -> Self {
        Self {
            id,
            name,
            specialization,
            available: true,
            history: Vec::new(),
        }
    }

    /// Append an entry to the team's history
    pub fn record_action(&mut self, action: impl Into<String>) {
        self.history.push(TeamAction {
            timestamp: Utc::now(),
            team_id: self.id,
            action: action.into(),
        });
    }

    pub fn history(&self) -> &[TeamAction] {
        &self.history
    }
}

/// One timestamped entry in a team's history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamAction {
    pub timestamp: DateTime<Utc>,
    pub team_id: TeamId,
    pub action: String,
}

/// Team specialization. Unknown names are kept as custom specializations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Specialization {
    Ground,
    Aerial,
    Rescue,
    Custom(String),
}

impl FromStr for Specialization {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_ascii_uppercase().as_str() {
            "GROUND" => Specialization::Ground,
            "AERIAL" => Specialization::Aerial,
            "RESCUE" => Specialization::Rescue,
            _ => Specialization::Custom(trimmed.to_string()),
        })
    }
}

impl From<String> for Specialization {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(specialization) => specialization,
            Err(never) => match never {},
        }
    }
}

impl From<Specialization> for String {
    fn from(value: Specialization) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specialization::Ground => write!(f, "GROUND"),
            Specialization::Aerial => write!(f, "AERIAL"),
            Specialization::Rescue => write!(f, "RESCUE"),
            Specialization::Custom(name) => write!(f, "{}", name),
        }
    }
}
