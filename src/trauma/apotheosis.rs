//! Apotheosis: an empowered state paid for in Stress
//!
//! Two states, Inactive and Active. Activation comes from outside (an
//! ability) and is always accepted. Each turn start while active costs
//! Stress; the moment Stress hits its ceiling the state collapses. The
//! per-turn cost belongs to the engine's config, not to the state.

use crate::trauma::stress::StressTrack;
use crate::trauma::track::DegradationTrack;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Apotheosis on/off flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ApotheosisState {
    active: bool,
}

/// Why Apotheosis ended without the player asking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApotheosisExit {
    StressCeiling { stress: i32 },
}

impl fmt::Display for ApotheosisExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApotheosisExit::StressCeiling { stress } => write!(
                f,
                "Apotheosis collapsed: stress reached {} and the mind could hold no more",
                stress
            ),
        }
    }
}

/// Outcome of one turn-start tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApotheosisTick {
    pub state: ApotheosisState,
    pub stress: StressTrack,
    /// Stress actually added (after clamping)
    pub stress_applied: i32,
    pub exit: Option<ApotheosisExit>,
}

impl ApotheosisState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(self) -> Self {
        Self { active: true }
    }

    pub fn deactivate(self) -> Self {
        Self { active: false }
    }

    /// Pay `stress_cost`, then exit if Stress is at its ceiling
    ///
    /// The exit check reads the post-cost Stress. A negative cost counts as
    /// zero. When inactive this is a no-op.
    pub fn tick(self, stress: StressTrack, stress_cost: i32) -> ApotheosisTick {
        if !self.active {
            return ApotheosisTick { state: self, stress, stress_applied: 0, exit: None };
        }

        let after = stress.apply_delta(stress_cost.max(0));
        let stress_applied = after.value() - stress.value();

        if after.is_at_ceiling() {
            ApotheosisTick {
                state: self.deactivate(),
                stress: after,
                stress_applied,
                exit: Some(ApotheosisExit::StressCeiling { stress: after.value() }),
            }
        } else {
            ApotheosisTick { state: self, stress: after, stress_applied, exit: None }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_tick_is_noop() {
        let tick = ApotheosisState::default().tick(StressTrack::new(40), 10);
        assert_eq!(tick.stress.value(), 40);
        assert_eq!(tick.stress_applied, 0);
        assert!(tick.exit.is_none());
        assert!(!tick.state.is_active());
    }

    #[test]
    fn test_active_tick_costs_stress() {
        let tick = ApotheosisState::default().activate().tick(StressTrack::new(40), 10);
        assert_eq!(tick.stress.value(), 50);
        assert_eq!(tick.stress_applied, 10);
        assert!(tick.state.is_active());
    }

    #[test]
    fn test_auto_exit_at_ceiling() {
        let tick = ApotheosisState::default().activate().tick(StressTrack::new(95), 10);
        assert_eq!(tick.stress.value(), 100);
        assert_eq!(tick.stress_applied, 5);
        assert!(!tick.state.is_active());
        assert_eq!(tick.exit, Some(ApotheosisExit::StressCeiling { stress: 100 }));
    }

    #[test]
    fn test_exact_ceiling_exits() {
        let tick = ApotheosisState::default().activate().tick(StressTrack::new(90), 10);
        assert_eq!(tick.stress.value(), 100);
        assert!(!tick.state.is_active());
    }

    #[test]
    fn test_cost_comes_from_caller() {
        let state = ApotheosisState::default().activate();
        assert_eq!(state.tick(StressTrack::new(40), 25).stress.value(), 65);
        let tick = state.tick(StressTrack::new(40), -5);
        assert_eq!(tick.stress_applied, 0);
        assert!(tick.state.is_active());
    }

    #[test]
    fn test_activation_is_unconditional() {
        let state = ApotheosisState::default().activate().activate();
        assert!(state.is_active());
        assert!(!state.deactivate().deactivate().is_active());
    }

    #[test]
    fn test_exit_reason_is_readable() {
        let reason = ApotheosisExit::StressCeiling { stress: 100 }.to_string();
        assert!(reason.contains("100"));
    }
}
