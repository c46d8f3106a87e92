//! Frozen capture of a character's trauma economy
//!
//! Snapshots are plain values: cheap to clone, comparable, safe to hand to
//! other threads. They never write back into the live state. Deltas between
//! two snapshots are left to the caller.

use crate::core::error::Result;
use crate::core::types::{CharacterId, TraumaId};
use crate::trauma::constants::{TRACK_MAX, TRACK_MIN};
use crate::trauma::corruption::CorruptionStage;
use crate::trauma::cps::CpsStage;
use crate::trauma::lineage::Lineage;
use crate::trauma::resource::ResourceReading;
use crate::trauma::state::TraumaEconomyState;
use crate::trauma::stress::StressThreshold;
use crate::trauma::track::DegradationTrack;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Overall alarm level, the worst across all tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WarningLevel {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

impl WarningLevel {
    fn for_track(value: i32) -> Self {
        match value {
            v if v >= TRACK_MAX => WarningLevel::Critical,
            v if v >= 80 => WarningLevel::High,
            v if v >= 60 => WarningLevel::Moderate,
            v if v >= 40 => WarningLevel::Low,
            _ => WarningLevel::None,
        }
    }

    fn for_cps(stage: CpsStage) -> Self {
        match stage {
            CpsStage::Lucid => WarningLevel::None,
            CpsStage::WeightOfKnowing => WarningLevel::Low,
            CpsStage::GlimmerMadness => WarningLevel::Moderate,
            CpsStage::RuinMadness => WarningLevel::High,
        }
    }

    fn derive(stress: i32, corruption: i32, cps_stage: CpsStage) -> Self {
        Self::for_track(stress)
            .max(Self::for_track(corruption))
            .max(Self::for_cps(cps_stage))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraumaEconomySnapshot {
    pub character_id: CharacterId,
    pub lineage: Lineage,
    pub captured_at: SystemTime,

    pub stress: i32,
    pub stress_threshold: StressThreshold,
    pub corruption: i32,
    pub corruption_stage: CorruptionStage,
    pub corruption_floor: i32,
    pub cps: i32,
    pub cps_stage: CpsStage,
    pub resource: Option<ResourceReading>,
    pub apotheosis_active: bool,
    pub trauma_ids: Vec<TraumaId>,
    pub trauma_count: usize,

    pub warning_level: WarningLevel,
    /// Any track at High warning or worse
    pub is_critical: bool,
    /// Stress or Corruption at the ceiling
    pub is_terminal: bool,
}

impl TraumaEconomySnapshot {
    /// Capture the live state. `captured_at` defaults to now.
    pub fn capture(state: &TraumaEconomyState, captured_at: Option<SystemTime>) -> Self {
        let stress = state.stress().value();
        let corruption = state.corruption().value();
        let cps_stage = state.cps().stage();
        let warning_level = WarningLevel::derive(stress, corruption, cps_stage);

        Self {
            character_id: state.character_id(),
            lineage: state.lineage(),
            captured_at: captured_at.unwrap_or_else(SystemTime::now),
            stress,
            stress_threshold: state.stress().threshold(),
            corruption,
            corruption_stage: state.corruption().stage(),
            corruption_floor: state.corruption().permanent_floor(),
            cps: state.cps().value(),
            cps_stage,
            resource: state.resource().reading(),
            apotheosis_active: state.apotheosis().is_active(),
            trauma_ids: state.trauma_ids().to_vec(),
            trauma_count: state.trauma_count(),
            warning_level,
            is_critical: warning_level >= WarningLevel::High,
            is_terminal: stress >= TRACK_MAX || corruption >= TRACK_MAX,
        }
    }

    /// Check range invariants and that every derived field agrees with the
    /// values it was derived from
    pub fn is_valid(&self) -> bool {
        let range = TRACK_MIN..=TRACK_MAX;
        if !range.contains(&self.stress)
            || !range.contains(&self.corruption)
            || !range.contains(&self.cps)
            || !range.contains(&self.corruption_floor)
        {
            return false;
        }
        if self.corruption < self.corruption_floor
            || self.corruption_floor < self.lineage.baseline().corruption_floor
        {
            return false;
        }
        if self.stress_threshold != StressThreshold::from_value(self.stress)
            || self.corruption_stage != CorruptionStage::from_value(self.corruption)
            || self.cps_stage != CpsStage::from_value(self.cps)
        {
            return false;
        }
        if let Some(reading) = &self.resource {
            if reading.min > reading.max || !(reading.min..=reading.max).contains(&reading.value)
            {
                return false;
            }
        }
        let warning = WarningLevel::derive(self.stress, self.corruption, self.cps_stage);
        self.trauma_count == self.trauma_ids.len()
            && self.warning_level == warning
            && self.is_critical == (warning >= WarningLevel::High)
            && self.is_terminal == (self.stress >= TRACK_MAX || self.corruption >= TRACK_MAX)
    }

    /// JSON form for the logging collaborator
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for TraumaEconomySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] stress {} ({:?}), corruption {} ({:?}), cps {} ({:?})",
            self.character_id,
            self.stress,
            self.stress_threshold,
            self.corruption,
            self.corruption_stage,
            self.cps,
            self.cps_stage
        )?;
        if let Some(reading) = &self.resource {
            write!(f, ", {:?} {} ({:?})", reading.kind, reading.value, reading.threshold)?;
        }
        if self.apotheosis_active {
            f.write_str(", APOTHEOSIS")?;
        }
        write!(f, ", traumas {}, warning {:?}", self.trauma_count, self.warning_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TraumaConfig;
    use crate::trauma::lineage::{Archetype, CharacterProfile, Lineage};
    use crate::trauma::resource::{RageThreshold, ResourceKind, ResourceThreshold};

    fn state() -> TraumaEconomyState {
        TraumaEconomyState::new(
            CharacterId::new(),
            CharacterProfile { lineage: Lineage::Blightborn, archetype: Archetype::Berserker },
            &TraumaConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_capture_is_valid() {
        let mut s = state();
        s.add_trauma(TraumaId::new("paranoia"));
        let snap = TraumaEconomySnapshot::capture(&s, None);
        assert!(snap.is_valid());
        assert_eq!(snap.trauma_count, snap.trauma_ids.len());
        assert_eq!(snap.corruption_floor, 10);
    }

    #[test]
    fn test_resource_reading_extracted() {
        let mut s = state();
        s.gain_resource(55);
        let snap = TraumaEconomySnapshot::capture(&s, None);
        let reading = snap.resource.unwrap();
        assert_eq!(reading.kind, ResourceKind::Rage);
        assert_eq!(reading.value, 55);
        assert_eq!(reading.threshold, ResourceThreshold::Rage(RageThreshold::Enraged));
    }

    #[test]
    fn test_same_state_same_time_equal() {
        let s = state();
        let at = SystemTime::UNIX_EPOCH;
        assert_eq!(
            TraumaEconomySnapshot::capture(&s, Some(at)),
            TraumaEconomySnapshot::capture(&s, Some(at))
        );
    }

    #[test]
    fn test_snapshot_independent_of_live_state() {
        let mut s = state();
        let before = TraumaEconomySnapshot::capture(&s, Some(SystemTime::UNIX_EPOCH));
        s.apply_stress(15);
        let after = TraumaEconomySnapshot::capture(&s, Some(SystemTime::UNIX_EPOCH));
        assert_eq!(before.stress, 0);
        assert_eq!(after.stress - before.stress, 15);
        assert_ne!(before, after);
    }

    #[test]
    fn test_warning_flags() {
        let mut s = state();
        s.set_stress(100);
        let snap = TraumaEconomySnapshot::capture(&s, None);
        assert_eq!(snap.warning_level, WarningLevel::Critical);
        assert!(snap.is_critical);
        assert!(snap.is_terminal);

        let mut s = state();
        s.set_cps(80);
        let snap = TraumaEconomySnapshot::capture(&s, None);
        assert_eq!(snap.warning_level, WarningLevel::High);
        assert!(snap.is_critical);
        assert!(!snap.is_terminal);
    }

    #[test]
    fn test_tampered_snapshot_invalid() {
        let snap = TraumaEconomySnapshot::capture(&state(), None);

        let mut bad = snap.clone();
        bad.trauma_count = 3;
        assert!(!bad.is_valid());

        let mut bad = snap.clone();
        bad.stress = 140;
        assert!(!bad.is_valid());

        let mut bad = snap.clone();
        bad.corruption = 5;
        bad.corruption_stage = CorruptionStage::Uncorrupted;
        assert!(!bad.is_valid());

        let mut bad = snap.clone();
        bad.corruption_floor = 0;
        bad.corruption = 5;
        bad.corruption_stage = CorruptionStage::Uncorrupted;
        assert!(!bad.is_valid());

        let mut bad = snap;
        bad.cps_stage = CpsStage::RuinMadness;
        assert!(!bad.is_valid());
    }

    #[test]
    fn test_json_and_display() {
        let snap = TraumaEconomySnapshot::capture(&state(), None);
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"corruption\":15"));
        assert!(snap.to_string().contains("corruption 15"));
    }
}
