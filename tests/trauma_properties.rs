//! Property tests for track clamping, stage derivation and turn invariants

use proptest::prelude::*;
use trauma_economy::core::config::TraumaConfig;
use trauma_economy::core::types::CharacterId;
use trauma_economy::trauma::{
    Archetype, CharacterProfile, CorruptionStage, CorruptionTrack, CpsTrack, DegradationTrack,
    Lineage, SeededRoller, StressTrack, TraumaEconomySnapshot, TraumaEconomyState,
    TurnIntegrationEngine,
};

fn lineage_strategy() -> impl Strategy<Value = Lineage> {
    prop_oneof![
        Just(Lineage::Clanborn),
        Just(Lineage::Runeblooded),
        Just(Lineage::Ironbound),
        Just(Lineage::Blightborn),
    ]
}

fn archetype_strategy() -> impl Strategy<Value = Archetype> {
    prop_oneof![
        Just(Archetype::Berserker),
        Just(Archetype::Skirmisher),
        Just(Archetype::Mystic),
        Just(Archetype::Warden),
        Just(Archetype::Scholar),
    ]
}

proptest! {
    #[test]
    fn stage_never_inverts(a in -500i32..500, b in -500i32..500) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(StressTrack::new(lo).stage() <= StressTrack::new(hi).stage());
        prop_assert!(CorruptionTrack::new(lo).stage() <= CorruptionTrack::new(hi).stage());
        prop_assert!(CpsTrack::new(lo).stage() <= CpsTrack::new(hi).stage());
    }

    #[test]
    fn create_is_idempotent(v in any::<i32>()) {
        let stress = StressTrack::new(v);
        prop_assert_eq!(StressTrack::new(stress.value()), stress);
        let corruption = CorruptionTrack::new(v);
        prop_assert_eq!(CorruptionTrack::new(corruption.value()), corruption);
        let cps = CpsTrack::new(v);
        prop_assert_eq!(CpsTrack::new(cps.value()), cps);
    }

    #[test]
    fn values_always_in_range(v in any::<i32>(), delta in any::<i32>()) {
        let stress = StressTrack::new(v).apply_delta(delta);
        prop_assert!((0..=100).contains(&stress.value()));
        let cps = CpsTrack::new(v).apply_delta(delta);
        prop_assert!((0..=100).contains(&cps.value()));
    }

    #[test]
    fn corruption_respects_floor(v in -50i32..150, floor in 0i32..=100, delta in -200i32..200) {
        let track = CorruptionTrack::with_floor(v, floor).unwrap().apply_delta(delta);
        prop_assert!(track.value() >= floor);
        prop_assert!(track.value() <= 100);
        prop_assert_eq!(track.stage(), CorruptionStage::from_value(track.value()));
    }

    #[test]
    fn corruption_writes_keep_lineage_floor(lineage in lineage_strategy(), raw in any::<i32>()) {
        let mut state = TraumaEconomyState::new(
            CharacterId::new(),
            CharacterProfile { lineage, archetype: Archetype::Warden },
            &TraumaConfig::default(),
        ).unwrap();
        state.set_corruption(raw);
        prop_assert!(state.corruption().value() >= lineage.baseline().corruption_floor);
        state.apply_corruption(raw);
        prop_assert!(state.corruption().value() >= lineage.baseline().corruption_floor);
        prop_assert!(TraumaEconomySnapshot::capture(&state, None).is_valid());
    }

    #[test]
    fn turns_keep_snapshot_valid(
        lineage in lineage_strategy(),
        archetype in archetype_strategy(),
        seed in any::<u64>(),
        apotheosis in any::<bool>(),
        events in prop::collection::vec((any::<bool>(), -10i32..20, -5i32..10, -5i32..10, -2i32..8), 1..40),
    ) {
        let mut engine = TurnIntegrationEngine::new(TraumaConfig::default(), SeededRoller::new(seed)).unwrap();
        let mut state = TraumaEconomyState::new(
            CharacterId::new(),
            CharacterProfile { lineage, archetype },
            engine.config(),
        ).unwrap();
        if apotheosis {
            state.activate_apotheosis();
        }
        let floor = state.corruption().permanent_floor();

        for (in_combat, stress, corruption, cps, environmental) in events {
            let start = engine.process_turn_start(&mut state, in_combat, !in_combat);
            if state.stress().is_at_ceiling() {
                prop_assert!(!state.apotheosis().is_active());
            }
            if start.auto_exited_apotheosis {
                prop_assert_eq!(start.stress_after, 100);
            }

            state.apply_stress(stress);
            state.apply_corruption(corruption);
            state.apply_cps(cps);
            if in_combat {
                state.gain_resource(10);
            }

            let end = engine.process_turn_end(&mut state, environmental);
            prop_assert!(end.environmental_stress_applied >= 0);
            prop_assert!(end.environmental_stress_applied <= 5);
            if end.stress_after >= 100 {
                prop_assert!(end.trauma_check_triggered);
            }

            let snap = TraumaEconomySnapshot::capture(&state, None);
            prop_assert!(snap.is_valid());
            prop_assert!(snap.corruption >= floor);
        }
    }
}
