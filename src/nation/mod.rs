//! Nation simulation
//!
//! Regions, the leader, and the rules that move them: policies the player
//! enacts, random events, and the passage of time.

pub mod data;
pub mod events;
pub mod history;
pub mod leader;
pub mod policy;
pub mod region;
pub mod simulation;
pub mod snapshot;
pub mod statistics;

pub use events::{EventCategory, EventEngine, RandomEvent};
pub use history::{ApprovalHistory, EventLog, Trend};
pub use leader::{Leader, PolicySkills, RivalFaction};
pub use policy::{PolicyEngine, PolicyKind, PolicyOutcome};
pub use region::Region;
pub use simulation::Simulation;
pub use snapshot::{NationalSummary, RegionRow, RegionSnapshot};
pub use statistics::CountryStatistics;
