use crate::config::Config;
use crate::dispatch::DispatchCoordinator;
use crate::error::Result;
use crate::models::Region;

/// Build a coordinator from configuration, loading the seed regions, teams
/// and connections
pub fn create_coordinator(config: &Config) -> Result<DispatchCoordinator> {
    let mut coordinator = DispatchCoordinator::new(config.dispatch.policy());

    for region in &config.seed.regions {
        coordinator.register_region(Region::from(region));
    }

    for team in &config.seed.teams {
        coordinator.add_team(team.name.clone(), team.specialization.clone());
    }

    for connection in &config.seed.connections {
        coordinator.connect_regions(&connection.from, &connection.to, connection.distance)?;
    }

    let stats = coordinator.graph().stats();
    tracing::info!(
        regions = stats.regions,
        connections = stats.connections,
        teams = coordinator.teams().len(),
        "Dispatch coordinator initialized"
    );

    Ok(coordinator)
}
