use crate::dispatch::{DispatchPolicy, MatchPolicy};
use crate::models::{Coordinates, Region, Specialization};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Embedded defaults: the operational seed the dispatcher starts with
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Dispatch policy constants
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Startup data
    #[serde(default)]
    pub seed: SeedConfig,
}

impl Config {
    /// Load configuration from the embedded defaults, the file named by
    /// `WILDFIRE_CONFIG` (if any) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var("WILDFIRE_CONFIG").ok();
        Self::load_from(path.as_deref().map(Path::new))
    }

    /// Load configuration with an explicit override file
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ));

        // Override with config file if given
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            // Override with environment variables (prefix: WILDFIRE_)
            .add_source(
                config::Environment::with_prefix("WILDFIRE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parse a complete configuration from TOML text, without layering
    pub fn from_toml_str(text: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Weight of one severity point against one distance unit in plans
    #[serde(default = "default_severity_weight")]
    pub severity_weight: f64,

    /// Severity at which an aerial team is preferred
    #[serde(default = "default_aerial_threshold")]
    pub aerial_severity_threshold: u8,

    /// Severity at which a ground team is preferred
    #[serde(default = "default_ground_threshold")]
    pub ground_severity_threshold: u8,

    /// Travel time per distance unit (hours)
    #[serde(default = "default_hours_per_distance_unit")]
    pub hours_per_distance_unit: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            severity_weight: default_severity_weight(),
            aerial_severity_threshold: default_aerial_threshold(),
            ground_severity_threshold: default_ground_threshold(),
            hours_per_distance_unit: default_hours_per_distance_unit(),
        }
    }
}

impl DispatchConfig {
    pub fn policy(&self) -> DispatchPolicy {
        DispatchPolicy {
            severity_weight: self.severity_weight,
            hours_per_distance_unit: self.hours_per_distance_unit,
            matching: MatchPolicy {
                aerial_threshold: self.aerial_severity_threshold,
                ground_threshold: self.ground_severity_threshold,
            },
        }
    }
}

/// Regions, teams and connections loaded at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub regions: Vec<RegionSeed>,

    #[serde(default)]
    pub teams: Vec<TeamSeed>,

    #[serde(default)]
    pub connections: Vec<ConnectionSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSeed {
    pub name: String,
    pub risk_priority: u8,
    pub coordinates: Option<Coordinates>,
}

impl From<&RegionSeed> for Region {
    fn from(seed: &RegionSeed) -> Self {
        let region = Region::new(seed.name.clone(), seed.risk_priority);
        match seed.coordinates {
            Some(coordinates) => region.with_coordinates(coordinates),
            None => region,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSeed {
    pub name: String,
    pub specialization: Specialization,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSeed {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_severity_weight() -> f64 {
    10.0
}

fn default_aerial_threshold() -> u8 {
    8
}

fn default_ground_threshold() -> u8 {
    6
}

fn default_hours_per_distance_unit() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        assert_eq!(default_severity_weight(), 10.0);
        assert_eq!(default_aerial_threshold(), 8);
        assert_eq!(default_ground_threshold(), 6);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn test_embedded_defaults_parse() {
        let config = Config::from_toml_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.seed.regions.len(), 5);
        assert_eq!(config.seed.teams.len(), 3);
        assert_eq!(config.seed.connections.len(), 7);
        assert_eq!(config.seed.teams[1].specialization, Specialization::Aerial);
        assert!(config.seed.regions[0].coordinates.is_some());
        assert!(!config.observability.json_logs);
    }

    #[test]
    fn test_policy_from_dispatch_config() {
        let policy = DispatchConfig::default().policy();
        assert_eq!(policy, DispatchPolicy::default());
    }
}
