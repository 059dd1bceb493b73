//! Simulation configuration.
//!
//! Loaded from YAML; every field has a default so an empty document yields
//! the classic 30³ region with 2/3 thresholds.

use std::path::Path;

use serde::Deserialize;

use crate::automaton::dispatch::DispatchConfig;
use crate::automaton::grid::Extents;
use crate::automaton::seed::SeedConfig;
use crate::automaton::stepping::Rules;
use crate::error::{ConfigError, EngineError};

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Size of the simulated region.
    pub extents: Extents,

    /// Survival band and birth count.
    pub rules: Rules,

    /// Random seeding of the first and every reseeded generation.
    pub seed: SeedConfig,

    /// Worker pool.
    pub dispatch: DispatchConfig,

    /// Delay between driver ticks in the headless runner.
    pub tick_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            extents: Extents::default(),
            rules: Rules::default(),
            seed: SeedConfig::default(),
            dispatch: DispatchConfig::default(),
            tick_interval_ms: 16,
        }
    }
}

impl SimulationConfig {
    /// Load and validate configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.extents.validate()?;
        self.rules.validate()?;
        if !(0.0..=1.0).contains(&self.seed.probability) {
            return Err(EngineError::invariant(format!(
                "seed probability {} outside [0, 1]",
                self.seed.probability
            )));
        }
        Ok(())
    }
}
