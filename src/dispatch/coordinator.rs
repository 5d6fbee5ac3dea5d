use crate::dispatch::action_log::ActionLog;
use crate::dispatch::queue::DispatchQueue;
use crate::dispatch::teams::{MatchPolicy, TeamRegistry};
use crate::error::{DispatchError, Result};
use crate::models::{
    DispatchRecord, Incident, IncidentId, IncidentStatus, NewIncident, Region, RegionPlan,
    RegionReport, RegionSummary, Route, Severity, Specialization, SystemStatus, TeamAction,
    TeamId,
};
use crate::routing::{RegionGraph, RegionRiskIndex, RiskEntry, DEFAULT_HOURS_PER_DISTANCE_UNIT};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use validator::Validate;

/// Tunable dispatch and planning constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchPolicy {
    /// Weight of one severity point against one distance unit in plan scores
    pub severity_weight: f64,

    /// Travel time per distance unit, in hours
    pub hours_per_distance_unit: f64,

    pub matching: MatchPolicy,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            severity_weight: 10.0,
            hours_per_distance_unit: DEFAULT_HOURS_PER_DISTANCE_UNIT,
            matching: MatchPolicy::default(),
        }
    }
}

/// Result of a successful dispatch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dispatch {
    pub incident_id: IncidentId,
    pub team_id: TeamId,
    pub team_name: String,
    pub region: String,
    pub severity: Severity,
}

/// Owns every dispatch structure and runs the operations that span them.
///
/// Incidents live in `incidents` from creation until finalized; the queue
/// only holds ids of incidents still waiting for a team.
#[derive(Debug)]
pub struct DispatchCoordinator {
    graph: RegionGraph,
    risk_index: RegionRiskIndex,
    risk_levels: HashMap<String, u8>,
    queue: DispatchQueue,
    incidents: BTreeMap<IncidentId, Incident>,
    teams: TeamRegistry,
    log: ActionLog,
    next_incident_id: IncidentId,
    policy: DispatchPolicy,
}

impl DispatchCoordinator {
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            graph: RegionGraph::new().with_hours_per_distance_unit(policy.hours_per_distance_unit),
            risk_index: RegionRiskIndex::new(),
            risk_levels: HashMap::new(),
            queue: DispatchQueue::new(),
            incidents: BTreeMap::new(),
            teams: TeamRegistry::new(policy.matching),
            log: ActionLog::new(),
            next_incident_id: 1,
            policy,
        }
    }

    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    pub fn graph(&self) -> &RegionGraph {
        &self.graph
    }

    pub fn teams(&self) -> &TeamRegistry {
        &self.teams
    }

    // ---- Setup ----

    /// Register a region in the graph and the risk index. Re-registering a
    /// known region changes nothing.
    pub fn register_region(&mut self, region: Region) {
        self.graph.add_region(&region.name, region.coordinates);
        if !self.risk_levels.contains_key(&region.name) {
            self.risk_index.insert(region.name.clone(), region.risk_priority);
            self.risk_levels.insert(region.name, region.risk_priority);
        }
    }

    pub fn connect_regions(&mut self, a: &str, b: &str, distance: f64) -> Result<()> {
        self.graph.add_edge(a, b, distance)
    }

    pub fn add_team(&mut self, name: impl Into<String>, specialization: Specialization) -> TeamId {
        self.teams.add_team(name, specialization)
    }

    // ---- Incident lifecycle ----

    /// Register a new incident and queue it for dispatch
    pub fn create_incident(&mut self, request: NewIncident) -> Result<IncidentId> {
        let severity = Severity::new(request.severity)?;
        request.validate()?;

        if !self.graph.contains(&request.region) {
            tracing::warn!(region = %request.region, "Incident reported in a region outside the map");
        }

        let id = self.next_incident_id;
        self.next_incident_id += 1;

        let incident = Incident::new(
            id,
            request.region,
            severity,
            request.coordinates,
            request.description,
        );

        tracing::info!(
            incident_id = id,
            region = %incident.region,
            severity = %incident.severity,
            "Incident registered"
        );

        self.queue.push(&incident);
        self.incidents.insert(id, incident);
        self.log.push(DispatchRecord::IncidentCreated { incident_id: id });
        Ok(id)
    }

    /// Serve the most severe pending incident with the best matching team.
    ///
    /// If no team is free the incident goes back to the queue untouched.
    /// Entries whose incident was forced out of PENDING while queued are
    /// dropped on the way; reverting that status queues them again.
    pub fn dispatch_next(&mut self) -> Result<Dispatch> {
        let entry = loop {
            let entry = self
                .queue
                .pop_highest()
                .ok_or(DispatchError::Empty("dispatch"))?;

            match self.incidents.get(&entry.incident_id) {
                Some(incident) if incident.is_pending() => break entry,
                Some(incident) => tracing::info!(
                    incident_id = incident.id,
                    status = %incident.status,
                    "Queued incident is no longer pending, skipped"
                ),
                None => tracing::debug!(
                    incident_id = entry.incident_id,
                    "Queued incident no longer active, skipped"
                ),
            }
        };

        let team_id = match self.teams.find_match(entry.severity) {
            Ok(team_id) => team_id,
            Err(err) => {
                tracing::warn!(
                    incident_id = entry.incident_id,
                    severity = %entry.severity,
                    "No team available, incident returned to queue"
                );
                self.queue.requeue(entry);
                return Err(err);
            }
        };

        let incident = self
            .incidents
            .get_mut(&entry.incident_id)
            .ok_or(DispatchError::IncidentNotFound(entry.incident_id))?;

        self.teams.claim(
            team_id,
            format!(
                "Started response to incident {} in {}",
                incident.id, incident.region
            ),
        )?;

        let previous_status = incident.status;
        incident.assign(team_id);

        self.log.push(DispatchRecord::Assigned {
            incident_id: incident.id,
            team_id,
        });
        self.log.push(DispatchRecord::StatusChange {
            incident_id: incident.id,
            previous_status,
        });

        let team_name = self.teams.get(team_id)?.name.clone();

        tracing::info!(
            incident_id = incident.id,
            team_id,
            team_name = %team_name,
            "Incident dispatched"
        );

        Ok(Dispatch {
            incident_id: incident.id,
            team_id,
            team_name,
            region: incident.region.clone(),
            severity: incident.severity,
        })
    }

    /// Append on-site actions to an incident and its team's history
    pub fn record_actions<I, S>(&mut self, incident_id: IncidentId, actions: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let incident = self
            .incidents
            .get_mut(&incident_id)
            .ok_or(DispatchError::IncidentNotFound(incident_id))?;

        let start = incident.actions.len();
        incident.actions.extend(actions.into_iter().map(Into::into));

        if let Some(team_id) = incident.assigned_team {
            let team = self.teams.get_mut(team_id)?;
            for action in &incident.actions[start..] {
                team.record_action(format!("Incident {}: {}", incident_id, action));
            }
        }

        tracing::info!(
            incident_id,
            recorded = incident.actions.len() - start,
            "Actions recorded"
        );
        Ok(())
    }

    /// Resolve an incident: free its team and drop it from the core
    pub fn finalize_incident(&mut self, incident_id: IncidentId) -> Result<Incident> {
        let mut incident = self
            .incidents
            .remove(&incident_id)
            .ok_or(DispatchError::IncidentNotFound(incident_id))?;

        if self.queue.remove(incident_id) {
            tracing::debug!(incident_id, "Finalized incident removed from queue");
        }

        incident.status = IncidentStatus::Resolved;

        if let Some(team_id) = incident.assigned_team {
            self.teams
                .release(team_id, format!("Closed incident {}", incident_id))?;
        }

        tracing::info!(incident_id, "Incident finalized");
        Ok(incident)
    }

    /// Force an incident's status, recording the prior value for undo.
    /// Returns the previous status.
    pub fn update_status(
        &mut self,
        incident_id: IncidentId,
        status: IncidentStatus,
    ) -> Result<IncidentStatus> {
        let incident = self
            .incidents
            .get_mut(&incident_id)
            .ok_or(DispatchError::IncidentNotFound(incident_id))?;

        let previous_status = incident.status;
        incident.status = status;
        self.log.push(DispatchRecord::StatusChange {
            incident_id,
            previous_status,
        });

        tracing::info!(
            incident_id,
            from = %previous_status,
            to = %status,
            "Incident status updated"
        );
        Ok(previous_status)
    }

    /// `update_status` from a raw status name
    pub fn update_status_str(
        &mut self,
        incident_id: IncidentId,
        status: &str,
    ) -> Result<IncidentStatus> {
        if !self.incidents.contains_key(&incident_id) {
            return Err(DispatchError::IncidentNotFound(incident_id));
        }
        let status = IncidentStatus::parse(status)?;
        self.update_status(incident_id, status)
    }

    /// Pop the latest log record and reverse it if it is a status change on
    /// an incident that is still active. Returns whether state changed.
    ///
    /// Restoring PENDING hands the incident back to the queue: a team
    /// assigned by the reverted dispatch is released.
    pub fn undo_last(&mut self) -> Result<bool> {
        let record = self.log.pop()?;

        let DispatchRecord::StatusChange {
            incident_id,
            previous_status,
        } = record
        else {
            tracing::info!(
                incident_id = record.incident_id(),
                record = ?record,
                "Undo consumed a record with no reverse action"
            );
            return Ok(false);
        };

        let Some(incident) = self.incidents.get_mut(&incident_id) else {
            tracing::info!(incident_id, "Undo skipped: incident no longer active");
            return Ok(false);
        };

        incident.status = previous_status;

        if previous_status == IncidentStatus::Pending {
            if let Some(team_id) = incident.assigned_team.take() {
                self.teams.release(
                    team_id,
                    format!("Dispatch to incident {} reverted", incident_id),
                )?;
            }
            if !self.queue.contains(incident_id) {
                self.queue.push(incident);
            }
        }

        tracing::info!(
            incident_id,
            status = %previous_status,
            "Incident status reverted"
        );
        Ok(true)
    }

    // ---- Queries ----

    pub fn incident(&self, incident_id: IncidentId) -> Result<&Incident> {
        self.incidents
            .get(&incident_id)
            .ok_or(DispatchError::IncidentNotFound(incident_id))
    }

    /// Active incidents in creation order
    pub fn active_incidents(&self) -> impl Iterator<Item = &Incident> {
        self.incidents.values()
    }

    pub fn incidents_in_region(&self, region: &str) -> Vec<&Incident> {
        let found: Vec<&Incident> = self
            .incidents
            .values()
            .filter(|incident| incident.region == region)
            .collect();
        tracing::debug!(region = %region, found = found.len(), "Incidents by region");
        found
    }

    pub fn team_history(&self, team_id: TeamId) -> Result<&[TeamAction]> {
        self.teams.history(team_id)
    }

    pub fn shortest_path(&self, origin: &str, destination: &str) -> Result<Route> {
        self.graph.shortest_path(origin, destination)
    }

    /// Regions ordered by ascending risk priority
    pub fn regions_by_priority(&self) -> Vec<RiskEntry> {
        self.risk_index.in_order().into_iter().cloned().collect()
    }

    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            active_incidents: self.incidents.len(),
            queued_incidents: self.queue.len(),
            available_teams: self.teams.available_count(),
            total_teams: self.teams.len(),
            undo_depth: self.log.len(),
        }
    }

    /// Severities of active incidents grouped by region, regions in the
    /// order their first active incident was created
    fn severities_by_region(&self) -> Vec<(&str, Vec<Severity>)> {
        let mut groups: Vec<(&str, Vec<Severity>)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for incident in self.incidents.values() {
            let region = incident.region.as_str();
            let pos = *positions.entry(region).or_insert_with(|| {
                groups.push((region, Vec::new()));
                groups.len() - 1
            });
            groups[pos].1.push(incident.severity);
        }
        groups
    }

    /// Active-incident breakdown per region, optionally for a single region
    pub fn region_report(&self, region: Option<&str>) -> RegionReport {
        let regions: Vec<RegionSummary> = self
            .severities_by_region()
            .into_iter()
            .filter(|(name, _)| region.map_or(true, |wanted| wanted == *name))
            .map(|(name, severities)| RegionSummary {
                region: name.to_string(),
                active_incidents: severities.len(),
                severity_avg: mean(&severities),
                risk_level: self.risk_levels.get(name).copied().unwrap_or(0),
            })
            .collect();

        RegionReport {
            total_active: regions.iter().map(|r| r.active_incidents).sum(),
            regions,
            teams: self.teams.statuses(),
        }
    }

    /// Rank regions with active incidents for a response leaving `base`.
    ///
    /// Each reachable region scores `severity_avg * severity_weight -
    /// distance`; the result is sorted by score, highest first, with ties
    /// kept in the order the regions first reported an incident. Regions
    /// with no route from `base` are left out.
    pub fn plan_response(&self, base: &str) -> Result<Vec<RegionPlan>> {
        if !self.graph.contains(base) {
            return Err(DispatchError::RegionNotFound(base.to_string()));
        }

        let targets: Vec<(&str, Vec<Severity>)> = self
            .severities_by_region()
            .into_iter()
            .filter(|(region, _)| *region != base)
            .collect();

        if targets.is_empty() {
            return Err(DispatchError::NoActiveIncidents);
        }

        let mut plans = Vec::with_capacity(targets.len());
        for (region, severities) in targets {
            let route = match self.graph.shortest_path(base, region) {
                Ok(route) => route,
                Err(err) => {
                    tracing::warn!(
                        base = %base,
                        region = %region,
                        error = %err,
                        "Region left out of response plan"
                    );
                    continue;
                }
            };

            let severity_avg = mean(&severities);
            plans.push(RegionPlan {
                region: region.to_string(),
                score: severity_avg * self.policy.severity_weight - route.distance,
                path: route.path,
                distance: route.distance,
                estimated_hours: route.estimated_hours,
                incident_count: severities.len(),
                severity_avg,
            });
        }

        // Stable sort keeps first-reported order among equal scores
        plans.sort_by(|a, b| b.score.total_cmp(&a.score));

        if plans.is_empty() {
            tracing::warn!(base = %base, "No region with active incidents is reachable");
        } else {
            tracing::info!(base = %base, stops = plans.len(), "Response plan built");
        }
        Ok(plans)
    }
}

impl Default for DispatchCoordinator {
    fn default() -> Self {
        Self::new(DispatchPolicy::default())
    }
}

fn mean(severities: &[Severity]) -> f64 {
    if severities.is_empty() {
        return 0.0;
    }
    let total: u32 = severities.iter().map(|s| u32::from(s.value())).sum();
    f64::from(total) / severities.len() as f64
}
