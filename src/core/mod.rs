pub mod calendar;
pub mod config;
pub mod error;

pub use calendar::{SimDate, SimulationClock};
pub use config::{SimulationConfig, SkillMode};
pub use error::{Result, SimError};
