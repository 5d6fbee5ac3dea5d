use crate::dispatch::coordinator::{Dispatch, DispatchCoordinator};
use crate::error::Result;
use crate::models::{
    IncidentId, IncidentStatus, NewIncident, RegionPlan, Route, SystemStatus, TeamAction, TeamId,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Thread-safe handle to a single coordinator.
///
/// Every call holds one lock for its whole duration, so the dispatch
/// sequence (pop, match, assign, log) is never interleaved with another
/// caller's.
#[derive(Clone)]
pub struct SharedCoordinator {
    inner: Arc<Mutex<DispatchCoordinator>>,
}

impl SharedCoordinator {
    pub fn new(coordinator: DispatchCoordinator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(coordinator)),
        }
    }

    /// Run several operations as one unit
    pub fn transaction<T>(&self, f: impl FnOnce(&mut DispatchCoordinator) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn create_incident(&self, request: NewIncident) -> Result<IncidentId> {
        self.inner.lock().create_incident(request)
    }

    pub fn dispatch_next(&self) -> Result<Dispatch> {
        self.inner.lock().dispatch_next()
    }

    pub fn record_actions(&self, incident_id: IncidentId, actions: Vec<String>) -> Result<()> {
        self.inner.lock().record_actions(incident_id, actions)
    }

    pub fn finalize_incident(&self, incident_id: IncidentId) -> Result<()> {
        self.inner.lock().finalize_incident(incident_id).map(|_| ())
    }

    pub fn update_status(&self, incident_id: IncidentId, status: IncidentStatus) -> Result<IncidentStatus> {
        self.inner.lock().update_status(incident_id, status)
    }

    pub fn undo_last(&self) -> Result<bool> {
        self.inner.lock().undo_last()
    }

    pub fn shortest_path(&self, origin: &str, destination: &str) -> Result<Route> {
        self.inner.lock().shortest_path(origin, destination)
    }

    pub fn plan_response(&self, base: &str) -> Result<Vec<RegionPlan>> {
        self.inner.lock().plan_response(base)
    }

    pub fn team_history(&self, team_id: TeamId) -> Result<Vec<TeamAction>> {
        self.inner.lock().team_history(team_id).map(<[TeamAction]>::to_vec)
    }

    pub fn status(&self) -> SystemStatus {
        self.inner.lock().status()
    }
}
