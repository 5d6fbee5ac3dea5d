//! Wildfire incident dispatch and routing engine.
//!
//! Ranks incidents by severity, matches them to response teams, routes
//! between operational regions and ranks multi-region response plans.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod routing;

pub use dispatch::{create_coordinator, DispatchCoordinator, SharedCoordinator};
pub use error::{DispatchError, Result};
