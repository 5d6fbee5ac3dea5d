use thiserror::Error;

/// Dispatch engine error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// Unknown incident id
    #[error("Incident {0} not found")]
    IncidentNotFound(u64),

    /// Unknown team id
    #[error("Team {0} not found")]
    TeamNotFound(u64),

    /// Unknown region name
    #[error("Region '{0}' not found")]
    RegionNotFound(String),

    /// Severity outside 1-10
    #[error("Invalid severity {0}: expected a value between 1 and 10")]
    InvalidSeverity(i64),

    /// Status string not one of PENDING, IN_PROGRESS, RESOLVED
    #[error("Invalid status '{0}': use PENDING, IN_PROGRESS or RESOLVED")]
    InvalidStatus(String),

    /// Graph is disconnected between the requested endpoints
    #[error("No route available from '{from}' to '{to}'")]
    NoRouteAvailable { from: String, to: String },

    /// Dispatch attempted while every team is busy
    #[error("No team available")]
    NoTeamAvailable,

    /// Pop or undo on an empty collection
    #[error("Nothing to {0}")]
    Empty(&'static str),

    /// Planning requested with no active incidents outside the base
    #[error("No active incidents to plan a response for")]
    NoActiveIncidents,

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DispatchError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            DispatchError::IncidentNotFound(_)
            | DispatchError::TeamNotFound(_)
            | DispatchError::RegionNotFound(_) => "NOT_FOUND",
            DispatchError::InvalidSeverity(_) => "INVALID_SEVERITY",
            DispatchError::InvalidStatus(_) => "INVALID_STATUS",
            DispatchError::NoRouteAvailable { .. } => "NO_ROUTE_AVAILABLE",
            DispatchError::NoTeamAvailable => "NO_TEAM_AVAILABLE",
            DispatchError::Empty(_) => "EMPTY",
            DispatchError::NoActiveIncidents => "NO_ACTIVE_INCIDENTS",
            DispatchError::Validation(_) => "VALIDATION_ERROR",
            DispatchError::Configuration(_) => "CONFIGURATION_ERROR",
            DispatchError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// True for lookups that missed an incident, team or region
    pub fn is_not_found(&self) -> bool {
        self.error_code() == "NOT_FOUND"
    }

    /// Normal negative results that callers report and continue past
    pub fn is_negative_outcome(&self) -> bool {
        matches!(
            self,
            DispatchError::Empty(_) | DispatchError::NoTeamAvailable
        )
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for DispatchError {
    fn from(err: serde_json::Error) -> Self {
        DispatchError::Serialization(err.to_string())
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for DispatchError {
    fn from(err: validator::ValidationErrors) -> Self {
        DispatchError::Validation(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for DispatchError {
    fn from(err: config::ConfigError) -> Self {
        DispatchError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DispatchError::IncidentNotFound(3).error_code(), "NOT_FOUND");
        assert_eq!(
            DispatchError::RegionNotFound("Pantanal".to_string()).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(DispatchError::InvalidSeverity(11).error_code(), "INVALID_SEVERITY");
        assert_eq!(DispatchError::NoTeamAvailable.error_code(), "NO_TEAM_AVAILABLE");
        assert_eq!(DispatchError::Empty("undo").error_code(), "EMPTY");
    }

    #[test]
    fn test_negative_outcomes() {
        assert!(DispatchError::Empty("dispatch").is_negative_outcome());
        assert!(DispatchError::NoTeamAvailable.is_negative_outcome());
        assert!(!DispatchError::IncidentNotFound(1).is_negative_outcome());
        assert!(DispatchError::TeamNotFound(9).is_not_found());
        assert!(!DispatchError::NoActiveIncidents.is_not_found());
    }

    #[test]
    fn test_error_messages_carry_identifier() {
        let err = DispatchError::NoRouteAvailable {
            from: "Caatinga".to_string(),
            to: "Island".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No route available from 'Caatinga' to 'Island'"
        );
        assert_eq!(DispatchError::IncidentNotFound(42).to_string(), "Incident 42 not found");
    }
}
