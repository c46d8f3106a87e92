//! Cumulative perception-distortion (CPS) track
//!
//! CPS drives two things at turn end: the panic table (only at the most
//! severe stage) and a set of passive distortion effects per stage.

use crate::trauma::track::{clamp_track, step_lookup, DegradationTrack, TrackRecord};
use serde::{Deserialize, Serialize};

/// CPS stage derived from the CPS value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CpsStage {
    /// 0-24
    Lucid,
    /// 25-49
    WeightOfKnowing,
    /// 50-74
    GlimmerMadness,
    /// 75-100, panic checks every turn end
    RuinMadness,
}

const CPS_STEPS: [(i32, CpsStage); 4] = [
    (0, CpsStage::Lucid),
    (25, CpsStage::WeightOfKnowing),
    (50, CpsStage::GlimmerMadness),
    (75, CpsStage::RuinMadness),
];

impl CpsStage {
    pub fn from_value(value: i32) -> Self {
        step_lookup(clamp_track(value), &CPS_STEPS)
    }

    pub fn all() -> &'static [CpsStage] {
        &[
            CpsStage::Lucid,
            CpsStage::WeightOfKnowing,
            CpsStage::GlimmerMadness,
            CpsStage::RuinMadness,
        ]
    }

    pub fn is_most_severe(&self) -> bool {
        matches!(self, CpsStage::RuinMadness)
    }
}

/// Clamped CPS value (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "TrackRecord")]
pub struct CpsTrack {
    value: i32,
}

impl From<TrackRecord> for CpsTrack {
    fn from(record: TrackRecord) -> Self {
        Self::new(record.value)
    }
}

impl CpsTrack {
    pub fn new(raw: i32) -> Self {
        Self { value: clamp_track(raw) }
    }
}

impl DegradationTrack for CpsTrack {
    type Stage = CpsStage;

    fn value(&self) -> i32 {
        self.value
    }

    fn stage(&self) -> CpsStage {
        CpsStage::from_value(self.value)
    }

    fn apply_delta(self, amount: i32) -> Self {
        Self::new(self.value.saturating_add(amount))
    }
}

/// Passive perception distortion active at a CPS stage
///
/// These are descriptors for the presentation layer; they carry no numeric
/// payload that feeds back into the tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CpsPassiveEffect {
    /// Faint voices in ambient text
    Whispers,
    /// Movement at the edge of vision
    PeripheralShadows,
    /// Displayed numbers occasionally wrong
    FalseReadings,
    /// Interface elements flicker or shift
    InterfaceDistortion,
    /// Allies briefly shown as enemies
    HostileFaces,
    /// Log entries reordered or repeated
    TimeSlips,
}

/// Passive effects granted by each CPS stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpsEffectTable {
    #[serde(default)]
    pub lucid: Vec<CpsPassiveEffect>,
    #[serde(default)]
    pub weight_of_knowing: Vec<CpsPassiveEffect>,
    #[serde(default)]
    pub glimmer_madness: Vec<CpsPassiveEffect>,
    #[serde(default)]
    pub ruin_madness: Vec<CpsPassiveEffect>,
}

impl Default for CpsEffectTable {
    fn default() -> Self {
        use CpsPassiveEffect::*;
        Self {
            lucid: Vec::new(),
            weight_of_knowing: vec![Whispers],
            glimmer_madness: vec![Whispers, PeripheralShadows, FalseReadings],
            ruin_madness: vec![
                Whispers,
                PeripheralShadows,
                FalseReadings,
                InterfaceDistortion,
                HostileFaces,
                TimeSlips,
            ],
        }
    }
}

impl CpsEffectTable {
    pub fn effects_for(&self, stage: CpsStage) -> &[CpsPassiveEffect] {
        match stage {
            CpsStage::Lucid => &self.lucid,
            CpsStage::WeightOfKnowing => &self.weight_of_knowing,
            CpsStage::GlimmerMadness => &self.glimmer_madness,
            CpsStage::RuinMadness => &self.ruin_madness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_clamps() {
        let cps: CpsTrack = serde_json::from_str(r#"{"value":400}"#).unwrap();
        assert_eq!(cps.value(), 100);
        assert_eq!(cps.stage(), CpsStage::RuinMadness);
    }

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(CpsTrack::new(0).stage(), CpsStage::Lucid);
        assert_eq!(CpsTrack::new(24).stage(), CpsStage::Lucid);
        assert_eq!(CpsTrack::new(25).stage(), CpsStage::WeightOfKnowing);
        assert_eq!(CpsTrack::new(50).stage(), CpsStage::GlimmerMadness);
        assert_eq!(CpsTrack::new(74).stage(), CpsStage::GlimmerMadness);
        assert_eq!(CpsTrack::new(75).stage(), CpsStage::RuinMadness);
        assert_eq!(CpsTrack::new(100).stage(), CpsStage::RuinMadness);
    }

    #[test]
    fn test_only_ruin_madness_is_most_severe() {
        for stage in CpsStage::all() {
            assert_eq!(stage.is_most_severe(), *stage == CpsStage::RuinMadness);
        }
    }

    #[test]
    fn test_default_effects_grow_with_stage() {
        let table = CpsEffectTable::default();
        assert!(table.effects_for(CpsStage::Lucid).is_empty());
        let mut previous = 0;
        for stage in CpsStage::all() {
            let count = table.effects_for(*stage).len();
            assert!(count >= previous);
            previous = count;
        }
    }

    #[test]
    fn test_stages_are_ordered() {
        assert!(CpsStage::Lucid < CpsStage::WeightOfKnowing);
        assert!(CpsStage::GlimmerMadness < CpsStage::RuinMadness);
    }
}
