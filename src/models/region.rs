use serde::{Deserialize, Serialize};

/// Geographic position of a region or incident
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A named operational area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    /// Unique name
    pub name: String,

    /// Risk priority (higher is riskier)
    pub risk_priority: u8,

    /// Optional geographic position
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl Region {
    pub fn new(name: impl Into<String>, risk_priority: u8) -> Self {
        Self {
            name: name.into(),
            risk_priority,
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }
}
