//! Simulation configuration
//!
//! Tunables that change pacing or interpretation of the model. Loaded from
//! TOML (`data/simulation.toml`) with every field optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Whether the leader's policy-skill multipliers feed into policy outcomes
///
/// Every leader carries four skills; by default they are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMode {
    /// Skills are displayed but never consulted
    #[default]
    Ignore,
    /// Approval deltas and the national effect of the four baseline
    /// policies are multiplied by the matching skill
    Scale,
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// RNG seed. `None` draws a fresh seed from entropy.
    pub seed: Option<u64>,

    /// Calendar year the game opens on (day 1, month 1)
    pub start_year: i32,

    /// Probability that a day passes without any random event
    ///
    /// At the default (0.2) four days in five see an event. 0.8 gives a
    /// much calmer game.
    pub quiet_day_chance: f64,

    /// How leader skills interact with policies
    pub skill_mode: SkillMode,

    /// Directory holding the numbered save slots
    pub save_dir: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_year: 2025,
            quiet_day_chance: 0.2,
            skill_mode: SkillMode::Ignore,
            save_dir: PathBuf::from("."),
        }
    }
}

impl SimulationConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(contents)
            .map_err(|e| SimError::Config(format!("Failed to parse config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that values are in usable ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.quiet_day_chance) {
            return Err(SimError::Config(format!(
                "quiet_day_chance ({}) must be within [0, 1]",
                self.quiet_day_chance
            )));
        }
        if self.start_year < 1 {
            return Err(SimError::Config(format!(
                "start_year ({}) must be positive",
                self.start_year
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.start_year, 2025);
        assert_eq!(config.skill_mode, SkillMode::Ignore);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = SimulationConfig::from_toml("seed = 7\nskill_mode = \"scale\"\n").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.skill_mode, SkillMode::Scale);
        assert_eq!(config.quiet_day_chance, 0.2);
    }

    #[test]
    fn test_rejects_out_of_range_chance() {
        let err = SimulationConfig::from_toml("quiet_day_chance = 1.5").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_load_shipped_config() {
        let config = SimulationConfig::load(Path::new("data/simulation.toml"))
            .expect("Should load shipped config");
        assert!(config.validate().is_ok());
    }
}
