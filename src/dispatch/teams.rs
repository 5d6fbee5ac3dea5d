use crate::error::{DispatchError, Result};
use crate::models::{Severity, Specialization, Team, TeamAction, TeamId, TeamStatus};
use std::collections::BTreeMap;

/// Severity thresholds for preferring a specialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    /// At or above this severity an aerial team is preferred
    pub aerial_threshold: u8,

    /// At or above this severity (and below aerial) a ground team is preferred
    pub ground_threshold: u8,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            aerial_threshold: 8,
            ground_threshold: 6,
        }
    }
}

impl MatchPolicy {
    pub fn preferred_specialization(&self, severity: Severity) -> Option<Specialization> {
        let value = severity.value();
        if value >= self.aerial_threshold {
            Some(Specialization::Aerial)
        } else if value >= self.ground_threshold {
            Some(Specialization::Ground)
        } else {
            None
        }
    }
}

/// All response teams, iterated in registration order
#[derive(Debug)]
pub struct TeamRegistry {
    teams: BTreeMap<TeamId, Team>,
    next_id: TeamId,
    policy: MatchPolicy,
}

impl TeamRegistry {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            teams: BTreeMap::new(),
            next_id: 1,
            policy,
        }
    }

    /// Register a team; ids are assigned in registration order
    pub fn add_team(&mut self, name: impl Into<String>, specialization: Specialization) -> TeamId {
        let id = self.next_id;
        self.next_id += 1;
        let team = Team::new(id, name.into(), specialization);

        tracing::info!(
            team_id = id,
            team_name = %team.name,
            specialization = %team.specialization,
            "Registered team"
        );

        self.teams.insert(id, team);
        id
    }

    pub fn get(&self, id: TeamId) -> Result<&Team> {
        self.teams.get(&id).ok_or(DispatchError::TeamNotFound(id))
    }

    pub fn get_mut(&mut self, id: TeamId) -> Result<&mut Team> {
        self.teams.get_mut(&id).ok_or(DispatchError::TeamNotFound(id))
    }

    /// Available teams in registration order
    pub fn available(&self) -> impl Iterator<Item = &Team> {
        self.teams.values().filter(|team| team.available)
    }

    /// Greedy first-match: the first available team with the preferred
    /// specialization for this severity, else the first available team.
    pub fn find_match(&self, severity: Severity) -> Result<TeamId> {
        let preferred = self.policy.preferred_specialization(severity);

        let matched = preferred
            .and_then(|wanted| self.available().find(|team| team.specialization == wanted))
            .or_else(|| self.available().next());

        matched
            .map(|team| team.id)
            .ok_or(DispatchError::NoTeamAvailable)
    }

    /// Mark a team busy and log the assignment in its history
    pub fn claim(&mut self, id: TeamId, action: impl Into<String>) -> Result<()> {
        let team = self.get_mut(id)?;
        team.available = false;
        team.record_action(action);
        Ok(())
    }

    /// Make a team available again and log why
    pub fn release(&mut self, id: TeamId, action: impl Into<String>) -> Result<()> {
        let team = self.get_mut(id)?;
        team.available = true;
        team.record_action(action);
        Ok(())
    }

    pub fn history(&self, id: TeamId) -> Result<&[TeamAction]> {
        self.get(id).map(|team| team.history())
    }

    pub fn statuses(&self) -> Vec<TeamStatus> {
        self.teams
            .values()
            .map(|team| TeamStatus {
                id: team.id,
                name: team.name.clone(),
                specialization: team.specialization.clone(),
                available: team.available,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn available_count(&self) -> usize {
        self.available().count()
    }
}

impl Default for TeamRegistry {
    fn default() -> Self {
        Self::new(MatchPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn severity(value: i64) -> Severity {
        Severity::new(value).unwrap()
    }

    fn seeded() -> TeamRegistry {
        let mut registry = TeamRegistry::new(MatchPolicy::default());
        registry.add_team("Alpha Forest Brigade", Specialization::Ground);
        registry.add_team("Beta Air Squadron", Specialization::Aerial);
        registry.add_team("Gamma Rescue Team", Specialization::Rescue);
        registry
    }

    #[test]
    fn test_ids_follow_registration_order() {
        let registry = seeded();
        let ids: Vec<TeamId> = registry.available().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_high_severity_prefers_aerial() {
        let registry = seeded();
        assert_eq!(registry.find_match(severity(8)).unwrap(), 2);
        assert_eq!(registry.find_match(severity(10)).unwrap(), 2);
    }

    #[test]
    fn test_medium_severity_prefers_ground() {
        let registry = seeded();
        assert_eq!(registry.find_match(severity(6)).unwrap(), 1);
        assert_eq!(registry.find_match(severity(7)).unwrap(), 1);
    }

    #[test]
    fn test_low_severity_takes_first_available() {
        let mut registry = seeded();
        registry.claim(1, "busy").unwrap();
        assert_eq!(registry.find_match(severity(3)).unwrap(), 2);
    }

    #[test]
    fn test_falls_back_when_preferred_busy() {
        let mut registry = seeded();
        registry.claim(2, "busy").unwrap();
        // No aerial team left: first available in registration order
        assert_eq!(registry.find_match(severity(9)).unwrap(), 1);

        registry.claim(1, "busy").unwrap();
        assert_eq!(registry.find_match(severity(9)).unwrap(), 3);
    }

    #[test]
    fn test_no_team_available() {
        let mut registry = seeded();
        for id in 1..=3 {
            registry.claim(id, "busy").unwrap();
        }
        assert_eq!(
            registry.find_match(severity(5)),
            Err(DispatchError::NoTeamAvailable)
        );
        assert_eq!(registry.available_count(), 0);
    }

    #[test]
    fn test_claim_and_release_record_history() {
        let mut registry = seeded();
        registry.claim(1, "Started incident 4").unwrap();
        registry.release(1, "Closed incident 4").unwrap();

        let history = registry.history(1).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].action, "Closed incident 4");
        assert!(registry.get(1).unwrap().available);
        assert_eq!(registry.history(99).unwrap_err(), DispatchError::TeamNotFound(99));
    }
}
