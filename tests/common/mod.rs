//! Common fixtures for the integration tests

#![allow(dead_code)]

use wildfire_dispatch::models::{Coordinates, NewIncident, Region, Specialization};
use wildfire_dispatch::DispatchCoordinator;

/// Coordinator over an A-B-C line: A-B 5, B-C 3, A-C 10
pub fn line_coordinator() -> DispatchCoordinator {
    let mut coordinator = DispatchCoordinator::default();
    coordinator.register_region(Region::new("A", 1));
    coordinator.register_region(Region::new("B", 2));
    coordinator.register_region(Region::new("C", 3));
    coordinator.connect_regions("A", "B", 5.0).unwrap();
    coordinator.connect_regions("B", "C", 3.0).unwrap();
    coordinator.connect_regions("A", "C", 10.0).unwrap();
    coordinator
}

/// Coordinator with one team of each built-in specialization, registered
/// ground, aerial, rescue
pub fn staffed_coordinator() -> DispatchCoordinator {
    let mut coordinator = line_coordinator();
    coordinator.add_team("Ground One", Specialization::Ground);
    coordinator.add_team("Air One", Specialization::Aerial);
    coordinator.add_team("Rescue One", Specialization::Rescue);
    coordinator
}

pub fn report(region: &str, severity: i64) -> NewIncident {
    NewIncident::new(region, severity, Coordinates::new(0.0, 0.0))
}

/// Small deterministic generator so property-style tests stay reproducible
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}
