pub mod incident;
pub mod plan;
pub mod record;
pub mod region;
pub mod report;
pub mod team;

pub use incident::*;
pub use plan::*;
pub use record::*;
pub use region::*;
pub use report::*;
pub use team::*;
