//! Live trauma economy of one character
//!
//! Mutated by the turn engine and by explicit gameplay events (damage,
//! casting, resting). Tracks are private and every write goes through a
//! method that clamps, so any sequence of calls leaves the state within
//! range and Corruption at or above the lineage floor.

use crate::core::config::TraumaConfig;
use crate::core::error::{Result, TraumaError};
use crate::core::types::{CharacterId, TraumaId};
use crate::trauma::apotheosis::{ApotheosisState, ApotheosisTick};
use crate::trauma::corruption::CorruptionTrack;
use crate::trauma::cps::CpsTrack;
use crate::trauma::lineage::{CharacterProfile, Lineage};
use crate::trauma::resource::{ResourceAdvance, SpecializationResource};
use crate::trauma::stress::StressTrack;
use crate::trauma::track::DegradationTrack;
use serde::{Deserialize, Serialize};

/// Aggregate trauma state for exactly one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StateRecord")]
pub struct TraumaEconomyState {
    character_id: CharacterId,
    lineage: Lineage,
    stress: StressTrack,
    corruption: CorruptionTrack,
    cps: CpsTrack,
    resource: SpecializationResource,
    apotheosis: ApotheosisState,
    trauma_ids: Vec<TraumaId>,
}

/// Persisted form, re-checked against the lineage before use
#[derive(Deserialize)]
struct StateRecord {
    character_id: CharacterId,
    lineage: Lineage,
    stress: StressTrack,
    corruption: CorruptionTrack,
    cps: CpsTrack,
    resource: SpecializationResource,
    apotheosis: ApotheosisState,
    trauma_ids: Vec<TraumaId>,
}

impl TryFrom<StateRecord> for TraumaEconomyState {
    type Error = TraumaError;

    fn try_from(record: StateRecord) -> Result<Self> {
        let floor = record
            .corruption
            .permanent_floor()
            .max(record.lineage.baseline().corruption_floor);
        let corruption = CorruptionTrack::with_floor(record.corruption.value(), floor)?;

        let mut trauma_ids: Vec<TraumaId> = Vec::with_capacity(record.trauma_ids.len());
        for id in record.trauma_ids {
            if !trauma_ids.contains(&id) {
                trauma_ids.push(id);
            }
        }

        Ok(Self {
            character_id: record.character_id,
            lineage: record.lineage,
            stress: record.stress,
            corruption,
            cps: record.cps,
            resource: record.resource,
            apotheosis: record.apotheosis,
            trauma_ids,
        })
    }
}

impl TraumaEconomyState {
    /// Build the starting state from lineage and archetype baselines
    pub fn new(
        character_id: CharacterId,
        profile: CharacterProfile,
        config: &TraumaConfig,
    ) -> Result<Self> {
        let baseline = profile.lineage.baseline();
        let corruption =
            CorruptionTrack::with_floor(baseline.starting_corruption, baseline.corruption_floor)?;
        let kind = profile.archetype.resource_kind();
        let resource = match kind {
            Some(kind) => SpecializationResource::for_kind(Some(kind), config.pool_config(kind))?,
            None => SpecializationResource::None,
        };

        Ok(Self {
            character_id,
            lineage: profile.lineage,
            stress: StressTrack::default(),
            corruption,
            cps: CpsTrack::new(baseline.starting_cps),
            resource,
            apotheosis: ApotheosisState::default(),
            trauma_ids: Vec::new(),
        })
    }

    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    pub fn lineage(&self) -> Lineage {
        self.lineage
    }

    pub fn stress(&self) -> StressTrack {
        self.stress
    }

    pub fn corruption(&self) -> CorruptionTrack {
        self.corruption
    }

    pub fn cps(&self) -> CpsTrack {
        self.cps
    }

    pub fn resource(&self) -> &SpecializationResource {
        &self.resource
    }

    pub fn apotheosis(&self) -> ApotheosisState {
        self.apotheosis
    }

    pub fn trauma_ids(&self) -> &[TraumaId] {
        &self.trauma_ids
    }

    pub fn trauma_count(&self) -> usize {
        self.trauma_ids.len()
    }

    /// Overwrite Stress (scripted scenes, loading a save). Clamped.
    pub fn set_stress(&mut self, raw: i32) {
        self.stress = StressTrack::new(raw);
    }

    /// Overwrite Corruption. Clamped, and never below the lineage floor.
    pub fn set_corruption(&mut self, raw: i32) {
        self.corruption = self.corruption.reset_to(raw);
    }

    /// Overwrite CPS. Clamped.
    pub fn set_cps(&mut self, raw: i32) {
        self.cps = CpsTrack::new(raw);
    }

    /// External stress event (damage, horror). Lineage resistance soaks
    /// part of each positive event. Returns the change actually applied.
    pub fn apply_stress(&mut self, amount: i32) -> i32 {
        let amount = if amount > 0 {
            (amount - self.lineage.baseline().stress_resistance).max(0)
        } else {
            amount
        };
        self.add_raw_stress(amount)
    }

    /// Returns the change actually applied
    pub fn apply_corruption(&mut self, amount: i32) -> i32 {
        let before = self.corruption.value();
        self.corruption = self.corruption.apply_delta(amount);
        self.corruption.value() - before
    }

    /// Returns the change actually applied
    pub fn apply_cps(&mut self, amount: i32) -> i32 {
        let before = self.cps.value();
        self.cps = self.cps.apply_delta(amount);
        self.cps.value() - before
    }

    /// Stress from the turn pipeline itself (environment, panic, Apotheosis).
    /// Lineage resistance does not apply.
    pub(crate) fn add_raw_stress(&mut self, amount: i32) -> i32 {
        let before = self.stress.value();
        self.stress = self.stress.apply_delta(amount);
        self.stress.value() - before
    }

    pub(crate) fn advance_resource(&mut self, in_combat: bool, is_idle: bool) -> ResourceAdvance {
        let (next, advance) = self.resource.advance(in_combat, is_idle);
        self.resource = next;
        advance
    }

    pub(crate) fn tick_apotheosis(&mut self, stress_cost: i32) -> ApotheosisTick {
        let tick = self.apotheosis.tick(self.stress, stress_cost);
        self.apotheosis = tick.state;
        self.stress = tick.stress;
        tick
    }

    /// Attach a trauma marker. Duplicate markers are ignored.
    pub fn add_trauma(&mut self, id: TraumaId) -> bool {
        if self.trauma_ids.contains(&id) {
            return false;
        }
        self.trauma_ids.push(id);
        true
    }

    pub fn activate_apotheosis(&mut self) {
        self.apotheosis = self.apotheosis.activate();
    }

    pub fn deactivate_apotheosis(&mut self) {
        self.apotheosis = self.apotheosis.deactivate();
    }

    pub fn gain_resource(&mut self, amount: i32) {
        self.resource = self.resource.gain(amount);
    }

    /// One regeneration tick for the pool (meditation, a short breather)
    pub fn regenerate_resource(&mut self) -> ResourceAdvance {
        let (next, advance) = self.resource.regenerate();
        self.resource = next;
        advance
    }

    /// Spend from the pool; `false` (and no change) if it cannot cover `amount`
    pub fn spend_resource(&mut self, amount: i32) -> bool {
        match self.resource.try_spend(amount) {
            Some(next) => {
                self.resource = next;
                true
            }
            None => false,
        }
    }

    /// Apply the outcome of an externally resolved trauma check
    ///
    /// Records the acquired trauma (if any) and pulls Stress back down.
    pub fn resolve_trauma_check(&mut self, acquired: Option<TraumaId>, config: &TraumaConfig) {
        if let Some(id) = acquired {
            self.add_trauma(id);
        }
        self.stress = StressTrack::new(config.trauma_check_reset_stress);
    }

    /// Apply the outcome of an externally resolved mutation check
    ///
    /// Only meaningful at the Corruption ceiling; otherwise a no-op that
    /// returns `false`.
    pub fn resolve_mutation_check(&mut self, mutation: TraumaId, config: &TraumaConfig) -> bool {
        if !self.corruption.requires_mutation_check() {
            return false;
        }
        self.add_trauma(mutation);
        self.corruption = self.corruption.reset_to(config.mutation_reset_corruption);
        true
    }

    /// Full rest: Stress clears, Apotheosis ends, the pool returns to its
    /// starting value. Corruption and CPS do not recover from rest alone.
    pub fn full_rest(&mut self) {
        self.stress = StressTrack::default();
        self.apotheosis = self.apotheosis.deactivate();
        self.resource = self.resource.reset();
    }

    /// Relieve stress across a whole party
    ///
    /// Takes the party as one exclusive slice so the write cannot interleave
    /// with per-member turn processing.
    pub fn relieve_party_stress(party: &mut [TraumaEconomyState], amount: i32) {
        let amount = amount.max(0);
        for member in party.iter_mut() {
            member.stress = member.stress.apply_delta(-amount);
        }
    }
}
