//! Trauma economy configuration with documented constants
//!
//! Tunable numbers and injected tables are collected here with notes on
//! how they interact. Everything is validated once, at engine construction.

use crate::core::error::{Result, TraumaError};
use crate::trauma::constants::{
    APOTHEOSIS_STRESS_COST, MAX_ENVIRONMENTAL_STRESS, TRACK_MAX, TRACK_MIN,
};
use crate::trauma::cps::CpsEffectTable;
use crate::trauma::panic::PanicTable;
use crate::trauma::resource::{PoolConfig, ResourceKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for turn integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraumaConfig {
    // === APOTHEOSIS ===
    /// Stress paid at every turn start while Apotheosis is active
    ///
    /// At 10, a character entering Apotheosis calm (0) can hold it for
    /// ten turns before the stress ceiling forces an exit.
    pub apotheosis_stress_cost: i32,

    // === TURN END ===
    /// Upper bound on environmental stress applied per turn end
    ///
    /// Larger inputs are clamped down to this. Negative inputs become 0.
    pub max_environmental_stress: i32,

    /// Roll-indexed panic effects used at Ruin Madness
    pub panic_table: PanicTable,

    /// Passive distortion effects listed per CPS stage
    pub cps_effects: CpsEffectTable,

    // === SPECIALIZATION POOLS ===
    pub rage: PoolConfig,
    pub momentum: PoolConfig,
    pub coherence: PoolConfig,

    // === RESETS ===
    /// Corruption after a mutation check resolves (never below the floor)
    pub mutation_reset_corruption: i32,

    /// Stress after a trauma check resolves
    ///
    /// Lower than the ceiling so the character is not immediately
    /// re-triggered on the next turn end.
    pub trauma_check_reset_stress: i32,

    // === PARALLELIZATION ===
    /// Minimum batch size before turn phases run on the rayon pool
    ///
    /// Each character's pipeline is tiny; below this count thread
    /// handoff costs more than the work.
    pub parallel_threshold: usize,
}

impl Default for TraumaConfig {
    fn default() -> Self {
        Self {
            apotheosis_stress_cost: APOTHEOSIS_STRESS_COST,
            max_environmental_stress: MAX_ENVIRONMENTAL_STRESS,
            panic_table: PanicTable::default(),
            cps_effects: CpsEffectTable::default(),
            rage: PoolConfig::rage(),
            momentum: PoolConfig::momentum(),
            coherence: PoolConfig::coherence(),
            mutation_reset_corruption: 60,
            trauma_check_reset_stress: 50,
            parallel_threshold: 256,
        }
    }
}

impl TraumaConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TraumaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Pool config for a resource kind
    pub fn pool_config(&self, kind: ResourceKind) -> PoolConfig {
        match kind {
            ResourceKind::Rage => self.rage,
            ResourceKind::Momentum => self.momentum,
            ResourceKind::Coherence => self.coherence,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.apotheosis_stress_cost < 0 {
            return Err(TraumaError::NegativeRate {
                field: "apotheosis stress",
                value: self.apotheosis_stress_cost,
            });
        }

        if !(0..=TRACK_MAX).contains(&self.max_environmental_stress) {
            return Err(TraumaError::InvalidConfig(format!(
                "max_environmental_stress ({}) must be within 0..={}",
                self.max_environmental_stress, TRACK_MAX
            )));
        }

        for (name, value) in [
            ("mutation_reset_corruption", self.mutation_reset_corruption),
            ("trauma_check_reset_stress", self.trauma_check_reset_stress),
        ] {
            if !(TRACK_MIN..TRACK_MAX).contains(&value) {
                return Err(TraumaError::InvalidConfig(format!(
                    "{} ({}) must be below the ceiling and not negative",
                    name, value
                )));
            }
        }

        self.panic_table.validate()?;
        self.rage.validate()?;
        self.momentum.validate()?;
        self.coherence.validate()?;

        Ok(())
    }
}
