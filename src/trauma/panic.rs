//! Panic table: what a character does when Ruin Madness takes hold
//!
//! The table is injected (config-driven). For a dN die it lists one effect
//! for each roll 1..N-1; the top face N is always "no effect".

use crate::core::error::{Result, TraumaError};
use crate::trauma::constants::PANIC_DIE_SIDES;
use crate::trauma::cps::CpsStage;
use serde::{Deserialize, Serialize};

/// Mechanical penalty rolled on the panic table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanicEffect {
    /// Loses the next action
    Frozen,
    /// Moves away from the nearest threat
    Flee,
    /// Attacks the nearest creature, friend or foe
    Lashout,
    /// Cannot cast or speak coherently
    Babble,
    /// Drops whatever is held
    DropWeapon,
    /// Targets chosen at random
    Hallucinate,
    /// Allies in earshot gain stress
    Scream,
    /// Defensive stance, no attacks
    Cower,
    /// Takes a wound from own hand
    SelfHarm,
}

impl PanicEffect {
    pub fn all() -> &'static [PanicEffect] {
        &[
            PanicEffect::Frozen,
            PanicEffect::Flee,
            PanicEffect::Lashout,
            PanicEffect::Babble,
            PanicEffect::DropWeapon,
            PanicEffect::Hallucinate,
            PanicEffect::Scream,
            PanicEffect::Cower,
            PanicEffect::SelfHarm,
        ]
    }

    /// Stress the panicking character takes when the effect fires (ADDITIVE)
    pub fn stress_penalty(&self) -> i32 {
        match self {
            PanicEffect::Frozen => 2,
            PanicEffect::Flee => 3,
            PanicEffect::Lashout => 5,
            PanicEffect::Babble => 2,
            PanicEffect::DropWeapon => 3,
            PanicEffect::Hallucinate => 4,
            PanicEffect::Scream => 1,
            PanicEffect::Cower => 2,
            PanicEffect::SelfHarm => 6,
        }
    }
}

/// Roll-indexed panic effects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanicTable {
    die_sides: u8,
    /// `effects[i]` fires on roll `i + 1`
    effects: Vec<PanicEffect>,
}

impl Default for PanicTable {
    fn default() -> Self {
        Self {
            die_sides: PANIC_DIE_SIDES,
            effects: PanicEffect::all().to_vec(),
        }
    }
}

impl PanicTable {
    /// Build a table, rejecting one that does not cover every face but the top
    pub fn new(die_sides: u8, effects: Vec<PanicEffect>) -> Result<Self> {
        let table = Self { die_sides, effects };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<()> {
        if self.die_sides < 2 {
            return Err(TraumaError::InvalidPanicTable(format!(
                "die must have at least 2 sides, got {}",
                self.die_sides
            )));
        }
        let expected = usize::from(self.die_sides) - 1;
        if self.effects.len() != expected {
            return Err(TraumaError::InvalidPanicTable(format!(
                "d{} table needs {} effects (top face is no effect), got {}",
                self.die_sides,
                expected,
                self.effects.len()
            )));
        }
        Ok(())
    }

    pub fn die_sides(&self) -> u8 {
        self.die_sides
    }

    /// Effect for a roll. Rolls outside 1..=N are clamped onto the die.
    pub fn lookup(&self, roll: u8) -> Option<PanicEffect> {
        let roll = roll.clamp(1, self.die_sides.max(1));
        self.effects.get(usize::from(roll) - 1).copied()
    }
}

/// Stateless lookup gated on the most severe CPS stage
#[derive(Debug, Clone, Default)]
pub struct PanicTableResolver {
    table: PanicTable,
}

impl PanicTableResolver {
    pub fn new(table: PanicTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PanicTable {
        &self.table
    }

    /// Whether a character at `stage` has to roll on the table
    pub fn applies_to(stage: CpsStage) -> bool {
        stage.is_most_severe()
    }

    pub fn resolve(&self, stage: CpsStage, roll: u8) -> Option<PanicEffect> {
        if !Self::applies_to(stage) {
            return None;
        }
        self.table.lookup(roll)
    }
}
