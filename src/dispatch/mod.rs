pub mod action_log;
pub mod coordinator;
pub mod factory;
pub mod queue;
pub mod shared;
pub mod teams;

pub use action_log::ActionLog;
pub use coordinator::{Dispatch, DispatchCoordinator, DispatchPolicy};
pub use factory::create_coordinator;
pub use queue::{DispatchQueue, QueueEntry};
pub use shared::SharedCoordinator;
pub use teams::{MatchPolicy, TeamRegistry};
