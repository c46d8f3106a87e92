//! Trauma economy constants - all fixed values in one place
//!
//! Tunable values (pool rates, tables, reset points) live in `TraumaConfig`.
//! These are the structural constants every track shares.

// Track range (shared by Stress, Corruption and CPS)
pub const TRACK_MIN: i32 = 0;
pub const TRACK_MAX: i32 = 100;

// Stress
pub const STRESS_CEILING: i32 = TRACK_MAX;

// Corruption
pub const MUTATION_RISK_THRESHOLD: i32 = 80;

// Apotheosis
pub const APOTHEOSIS_STRESS_COST: i32 = 10;

// Turn end
pub const MAX_ENVIRONMENTAL_STRESS: i32 = 5;

// Panic table
pub const PANIC_DIE_SIDES: u8 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_range_reasonable() {
        assert!(TRACK_MIN < TRACK_MAX);
        assert_eq!(STRESS_CEILING, TRACK_MAX);
    }

    #[test]
    fn test_mutation_risk_inside_range() {
        assert!(MUTATION_RISK_THRESHOLD > TRACK_MIN && MUTATION_RISK_THRESHOLD < TRACK_MAX);
    }

    #[test]
    fn test_panic_die_has_a_safe_face() {
        assert!(PANIC_DIE_SIDES >= 2);
    }
}
