use crate::models::incident::{IncidentId, IncidentStatus};
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Entry in the dispatcher's undo log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchRecord {
    /// A new incident was registered
    IncidentCreated { incident_id: IncidentId },

    /// A team was assigned to an incident
    Assigned {
        incident_id: IncidentId,
        team_id: TeamId,
    },

    /// An incident's status changed; the only reversible record
    StatusChange {
        incident_id: IncidentId,
        previous_status: IncidentStatus,
    },
}

impl DispatchRecord {
    pub fn incident_id(&self) -> IncidentId {
        match self {
            DispatchRecord::IncidentCreated { incident_id }
            | DispatchRecord::Assigned { incident_id, .. }
            | DispatchRecord::StatusChange { incident_id, .. } => *incident_id,
        }
    }

    pub fn is_reversible(&self) -> bool {
        matches!(self, DispatchRecord::StatusChange { .. })
    }
}
