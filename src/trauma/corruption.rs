//! Corruption track
//!
//! Corruption is near-permanent. Some lineages carry a floor it can never
//! be cleansed below. Reaching the ceiling forces a mutation check.

use crate::core::error::{Result, TraumaError};
use crate::trauma::constants::{MUTATION_RISK_THRESHOLD, TRACK_MAX, TRACK_MIN};
use crate::trauma::track::{clamp_track, step_lookup, DegradationTrack};
use serde::{Deserialize, Serialize};

/// Corruption stage derived from the corruption value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CorruptionStage {
    /// 0-19
    Uncorrupted,
    /// 20-39
    Tainted,
    /// 40-59
    Infected,
    /// 60-79
    Blighted,
    /// 80-99
    Corrupted,
    /// 100
    Consumed,
}

const CORRUPTION_STEPS: [(i32, CorruptionStage); 6] = [
    (0, CorruptionStage::Uncorrupted),
    (20, CorruptionStage::Tainted),
    (40, CorruptionStage::Infected),
    (60, CorruptionStage::Blighted),
    (80, CorruptionStage::Corrupted),
    (100, CorruptionStage::Consumed),
];

impl CorruptionStage {
    pub fn from_value(value: i32) -> Self {
        step_lookup(clamp_track(value), &CORRUPTION_STEPS)
    }
}

/// Clamped corruption value with a permanent floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "CorruptionRecord")]
pub struct CorruptionTrack {
    value: i32,
    floor: i32,
}

#[derive(Deserialize)]
struct CorruptionRecord {
    value: i32,
    floor: i32,
}

impl TryFrom<CorruptionRecord> for CorruptionTrack {
    type Error = TraumaError;

    fn try_from(record: CorruptionRecord) -> Result<Self> {
        Self::with_floor(record.value, record.floor)
    }
}

impl CorruptionTrack {
    /// Create a track with no floor, clamping `raw` into range
    pub fn new(raw: i32) -> Self {
        Self { value: clamp_track(raw), floor: TRACK_MIN }
    }

    /// Create a track with a lineage floor
    ///
    /// A floor outside the track range is a data-authoring defect and is
    /// rejected. The value itself is clamped into `[floor, 100]`.
    pub fn with_floor(raw: i32, floor: i32) -> Result<Self> {
        if !(TRACK_MIN..=TRACK_MAX).contains(&floor) {
            return Err(TraumaError::FloorOutOfRange { floor, ceiling: TRACK_MAX });
        }
        Ok(Self { value: raw.clamp(floor, TRACK_MAX), floor })
    }

    pub fn permanent_floor(&self) -> i32 {
        self.floor
    }

    /// Mutation check is mandatory at the ceiling
    pub fn requires_mutation_check(&self) -> bool {
        self.value >= TRACK_MAX
    }

    /// Close enough to the ceiling that a mutation is a live threat
    pub fn has_mutation_risk(&self) -> bool {
        self.value >= MUTATION_RISK_THRESHOLD
    }

    /// Reset the value (mutation resolution, cleansing). Never goes below the floor.
    pub fn reset_to(self, value: i32) -> Self {
        Self { value: value.clamp(self.floor, TRACK_MAX), floor: self.floor }
    }
}

impl DegradationTrack for CorruptionTrack {
    type Stage = CorruptionStage;

    fn value(&self) -> i32 {
        self.value
    }

    fn stage(&self) -> CorruptionStage {
        CorruptionStage::from_value(self.value)
    }

    fn apply_delta(self, amount: i32) -> Self {
        self.reset_to(self.value.saturating_add(amount))
    }

    fn floor(&self) -> i32 {
        self.floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infected_at_45() {
        let track = CorruptionTrack::new(45);
        assert_eq!(track.stage(), CorruptionStage::Infected);
        assert!((track.percentage_to_ceiling() - 0.45).abs() < f64::EPSILON);
        assert!(!track.has_mutation_risk());
    }

    #[test]
    fn test_corrupted_at_85() {
        let track = CorruptionTrack::new(85);
        assert_eq!(track.stage(), CorruptionStage::Corrupted);
        assert!(track.has_mutation_risk());
        assert!(!track.requires_mutation_check());
    }

    #[test]
    fn test_consumed_at_100() {
        let track = CorruptionTrack::new(100);
        assert_eq!(track.stage(), CorruptionStage::Consumed);
        assert!(track.requires_mutation_check());
    }

    #[test]
    fn test_floor_blocks_cleansing() {
        let track = CorruptionTrack::with_floor(30, 15).unwrap();
        let cleansed = track.apply_delta(-50);
        assert_eq!(cleansed.value(), 15);
        assert_eq!(cleansed.permanent_floor(), 15);
    }

    #[test]
    fn test_raw_value_below_floor_is_raised() {
        let track = CorruptionTrack::with_floor(5, 10).unwrap();
        assert_eq!(track.value(), 10);
    }

    #[test]
    fn test_floor_above_ceiling_rejected() {
        let err = CorruptionTrack::with_floor(50, 120).unwrap_err();
        assert!(matches!(err, TraumaError::FloorOutOfRange { floor: 120, .. }));
    }

    #[test]
    fn test_negative_floor_rejected() {
        assert!(CorruptionTrack::with_floor(50, -1).is_err());
    }

    #[test]
    fn test_deserialize_enforces_floor() {
        let track: CorruptionTrack = serde_json::from_str(r#"{"value":3,"floor":90}"#).unwrap();
        assert_eq!(track.value(), 90);
        assert!(serde_json::from_str::<CorruptionTrack>(r#"{"value":3,"floor":140}"#).is_err());
    }

    #[test]
    fn test_reset_respects_floor() {
        let track = CorruptionTrack::with_floor(100, 25).unwrap();
        assert_eq!(track.reset_to(0).value(), 25);
        assert_eq!(track.reset_to(60).value(), 60);
    }
}
