//! Stress track
//!
//! Stress accumulates turn by turn. It pays for Apotheosis and, at its
//! ceiling, triggers a trauma check.

use crate::trauma::constants::STRESS_CEILING;
use crate::trauma::track::{clamp_track, step_lookup, DegradationTrack, TrackRecord};
use serde::{Deserialize, Serialize};

/// Stress tier derived from the stress value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressThreshold {
    /// 0-19
    Calm,
    /// 20-39
    Uneasy,
    /// 40-59
    Strained,
    /// 60-79
    Distressed,
    /// 80-99
    Breaking,
    /// 100
    Shattered,
}

const STRESS_STEPS: [(i32, StressThreshold); 6] = [
    (0, StressThreshold::Calm),
    (20, StressThreshold::Uneasy),
    (40, StressThreshold::Strained),
    (60, StressThreshold::Distressed),
    (80, StressThreshold::Breaking),
    (STRESS_CEILING, StressThreshold::Shattered),
];

impl StressThreshold {
    pub fn from_value(value: i32) -> Self {
        step_lookup(clamp_track(value), &STRESS_STEPS)
    }
}

/// Clamped stress value (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "TrackRecord")]
pub struct StressTrack {
    value: i32,
}

impl From<TrackRecord> for StressTrack {
    fn from(record: TrackRecord) -> Self {
        Self::new(record.value)
    }
}

impl StressTrack {
    /// Create a track, clamping `raw` into range
    pub fn new(raw: i32) -> Self {
        Self { value: clamp_track(raw) }
    }

    pub fn threshold(&self) -> StressThreshold {
        StressThreshold::from_value(self.value)
    }
}

impl DegradationTrack for StressTrack {
    type Stage = StressThreshold;

    fn value(&self) -> i32 {
        self.value
    }

    fn stage(&self) -> StressThreshold {
        self.threshold()
    }

    fn apply_delta(self, amount: i32) -> Self {
        Self::new(self.value.saturating_add(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(StressTrack::new(150).value(), 100);
        assert_eq!(StressTrack::new(-10).value(), 0);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(StressTrack::new(19).threshold(), StressThreshold::Calm);
        assert_eq!(StressTrack::new(20).threshold(), StressThreshold::Uneasy);
        assert_eq!(StressTrack::new(79).threshold(), StressThreshold::Distressed);
        assert_eq!(StressTrack::new(80).threshold(), StressThreshold::Breaking);
        assert_eq!(StressTrack::new(99).threshold(), StressThreshold::Breaking);
        assert_eq!(StressTrack::new(100).threshold(), StressThreshold::Shattered);
    }

    #[test]
    fn test_apply_delta_clamps_at_ceiling() {
        let stress = StressTrack::new(95).apply_delta(10);
        assert_eq!(stress.value(), 100);
        assert!(stress.is_at_ceiling());
    }

    #[test]
    fn test_deserialize_clamps() {
        let stress: StressTrack = serde_json::from_str(r#"{"value":150}"#).unwrap();
        assert_eq!(stress.value(), 100);
        let stress: StressTrack = serde_json::from_str(r#"{"value":-4}"#).unwrap();
        assert_eq!(stress.value(), 0);
    }

    #[test]
    fn test_apply_delta_does_not_overflow() {
        let stress = StressTrack::new(50).apply_delta(i32::MAX);
        assert_eq!(stress.value(), 100);
        let stress = StressTrack::new(50).apply_delta(i32::MIN);
        assert_eq!(stress.value(), 0);
    }
}
