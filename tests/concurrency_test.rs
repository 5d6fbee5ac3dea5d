//! Concurrent access through the shared coordinator handle

mod common;

use common::{report, staffed_coordinator};
use std::collections::HashSet;
use std::thread;
use wildfire_dispatch::{DispatchError, SharedCoordinator};

#[test]
fn test_concurrent_dispatch_never_double_assigns() {
    let shared = SharedCoordinator::new(staffed_coordinator());

    let reporters: Vec<_> = (0..4)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                (0..10)
                    .map(|i| {
                        let severity = ((worker * 10 + i) % 10 + 1) as i64;
                        shared.create_incident(report("B", severity)).unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut created = HashSet::new();
    for handle in reporters {
        created.extend(handle.join().unwrap());
    }
    assert_eq!(created.len(), 40);

    let dispatchers: Vec<_> = (0..6)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut won = Vec::new();
                for _ in 0..5 {
                    match shared.dispatch_next() {
                        Ok(dispatch) => won.push(dispatch),
                        Err(err) => assert!(err.is_negative_outcome()),
                    }
                }
                won
            })
        })
        .collect();

    let mut dispatches = Vec::new();
    for handle in dispatchers {
        dispatches.extend(handle.join().unwrap());
    }

    // Three teams, none released: exactly three dispatches succeed
    assert_eq!(dispatches.len(), 3);
    let teams: HashSet<u64> = dispatches.iter().map(|d| d.team_id).collect();
    assert_eq!(teams.len(), 3);

    // Each winner is among the most severe incidents
    assert!(dispatches.iter().all(|d| d.severity.value() == 10));

    let status = shared.status();
    assert_eq!(status.active_incidents, 40);
    assert_eq!(status.queued_incidents, 37);
    assert_eq!(status.available_teams, 0);
}

#[test]
fn test_concurrent_finalize_releases_each_team_once() {
    let shared = SharedCoordinator::new(staffed_coordinator());

    let ids: Vec<u64> = (0..3)
        .map(|_| shared.create_incident(report("C", 7)).unwrap())
        .collect();
    for _ in 0..3 {
        shared.dispatch_next().unwrap();
    }

    // Two threads race to close every incident; each close succeeds once
    let closers: Vec<_> = (0..2)
        .map(|_| {
            let shared = shared.clone();
            let ids = ids.clone();
            thread::spawn(move || {
                ids.iter()
                    .filter(|&&id| match shared.finalize_incident(id) {
                        Ok(()) => true,
                        Err(DispatchError::IncidentNotFound(_)) => false,
                        Err(other) => panic!("unexpected error: {other}"),
                    })
                    .count()
            })
        })
        .collect();

    let closed: usize = closers.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(closed, 3);

    let status = shared.status();
    assert_eq!(status.active_incidents, 0);
    assert_eq!(status.available_teams, 3);

    for team_id in 1..=3 {
        let history = shared.team_history(team_id).unwrap();
        assert_eq!(history.len(), 2);
    }
}

#[test]
fn test_transaction_groups_operations() {
    let shared = SharedCoordinator::new(staffed_coordinator());

    let (id, dispatched) = shared.transaction(|coordinator| {
        let id = coordinator.create_incident(report("A", 9)).unwrap();
        let dispatch = coordinator.dispatch_next().unwrap();
        (id, dispatch.incident_id)
    });

    assert_eq!(id, dispatched);
    assert_eq!(shared.status().queued_incidents, 0);
}
