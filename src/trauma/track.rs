//! Shared behaviour of the three degradation tracks
//!
//! A track is a clamped integer. Its stage is always derived from the value,
//! never stored, so two tracks with the same value always agree on stage.

use crate::trauma::constants::{TRACK_MAX, TRACK_MIN};
use serde::Deserialize;

/// Clamp a raw value into the shared track range
pub fn clamp_track(raw: i32) -> i32 {
    raw.clamp(TRACK_MIN, TRACK_MAX)
}

/// Common surface of Stress, Corruption and CPS
pub trait DegradationTrack: Copy {
    /// Discrete stage, monotonic in the value
    type Stage: Copy + Ord;

    /// Current clamped value
    fn value(&self) -> i32;

    /// Stage derived from the current value
    fn stage(&self) -> Self::Stage;

    /// Return a new track with `amount` added (clamped)
    fn apply_delta(self, amount: i32) -> Self;

    /// Upper bound of the track
    fn ceiling(&self) -> i32 {
        TRACK_MAX
    }

    /// Lowest value this track may reach
    fn floor(&self) -> i32 {
        TRACK_MIN
    }

    fn is_at_ceiling(&self) -> bool {
        self.value() >= self.ceiling()
    }

    /// Fraction of the way from zero to the ceiling (0.0 to 1.0)
    fn percentage_to_ceiling(&self) -> f64 {
        self.value() as f64 / self.ceiling() as f64
    }
}

/// Stored form of a floorless track. Loading goes through the track's
/// clamping constructor.
#[derive(Deserialize)]
pub(crate) struct TrackRecord {
    pub value: i32,
}

/// Find the highest step whose lower bound is `<= value`.
///
/// `steps` must be sorted by lower bound, first bound at or below `TRACK_MIN`.
pub(crate) fn step_lookup<S: Copy>(value: i32, steps: &[(i32, S)]) -> S {
    let mut stage = steps[0].1;
    for &(lower, s) in steps {
        if value >= lower {
            stage = s;
        } else {
            break;
        }
    }
    stage
}
