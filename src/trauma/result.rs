//! Record of one turn phase

use crate::core::types::CharacterId;
use crate::trauma::cps::{CpsPassiveEffect, CpsStage};
use crate::trauma::panic::PanicEffect;
use crate::trauma::resource::ResourceAdvance;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Start,
    End,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnPhase::Start => f.write_str("turn start"),
            TurnPhase::End => f.write_str("turn end"),
        }
    }
}

/// Everything that changed during one turn-phase call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnIntegrationResult {
    pub character_id: CharacterId,
    pub phase: TurnPhase,
    pub stress_before: i32,
    pub stress_after: i32,

    // Turn start
    pub resource_advance: ResourceAdvance,
    pub apotheosis_stress_applied: i32,
    pub auto_exited_apotheosis: bool,
    pub auto_exit_reason: Option<String>,

    // Turn end
    pub environmental_stress_applied: i32,
    pub cps_stage: Option<CpsStage>,
    pub panic_check_performed: bool,
    pub panic_roll: Option<u8>,
    pub panic_effect: Option<PanicEffect>,
    pub panic_stress_applied: i32,
    pub passive_effects: Vec<CpsPassiveEffect>,
    pub trauma_check_triggered: bool,
}

impl TurnIntegrationResult {
    /// A result recording that nothing happened
    pub fn empty(character_id: CharacterId, phase: TurnPhase) -> Self {
        Self {
            character_id,
            phase,
            stress_before: 0,
            stress_after: 0,
            resource_advance: ResourceAdvance::none(),
            apotheosis_stress_applied: 0,
            auto_exited_apotheosis: false,
            auto_exit_reason: None,
            environmental_stress_applied: 0,
            cps_stage: None,
            panic_check_performed: false,
            panic_roll: None,
            panic_effect: None,
            panic_stress_applied: 0,
            passive_effects: Vec::new(),
            trauma_check_triggered: false,
        }
    }

    pub fn has_effects(&self) -> bool {
        self.resource_advance.changed()
            || self.apotheosis_stress_applied != 0
            || self.auto_exited_apotheosis
            || self.environmental_stress_applied != 0
            || self.panic_effect.is_some()
            || !self.passive_effects.is_empty()
            || self.trauma_check_triggered
    }

    pub fn stress_delta(&self) -> i32 {
        self.stress_after - self.stress_before
    }
}

impl fmt::Display for TurnIntegrationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.character_id, self.phase)?;
        if !self.has_effects() {
            return f.write_str(": no effects");
        }
        write!(f, ": stress {} -> {}", self.stress_before, self.stress_after)?;
        if self.resource_advance.changed() {
            if let Some(kind) = self.resource_advance.kind {
                write!(f, ", {:?} {:+}", kind, self.resource_advance.delta())?;
            }
        }
        if self.apotheosis_stress_applied != 0 {
            write!(f, ", apotheosis cost +{}", self.apotheosis_stress_applied)?;
        }
        if let Some(reason) = &self.auto_exit_reason {
            write!(f, ", {}", reason)?;
        }
        if self.environmental_stress_applied != 0 {
            write!(f, ", +{} environmental stress", self.environmental_stress_applied)?;
        }
        if let Some(effect) = self.panic_effect {
            write!(f, ", panic {:?}", effect)?;
        }
        if !self.passive_effects.is_empty() {
            write!(f, ", {} passive distortion(s)", self.passive_effects.len())?;
        }
        if self.trauma_check_triggered {
            f.write_str(", TRAUMA CHECK")?;
        }
        Ok(())
    }
}
