//! Turn integration: advances a character's trauma economy once per phase
//!
//! Both phases are fixed, ordered pipelines. Each step reads the state as
//! left by the step before it. The pipeline runs on a working copy that is
//! committed in one assignment, so callers never observe a half-processed
//! turn.
//!
//! Turn start:
//! 1. Advance the specialization pool (decay rules per variant)
//! 2. Pay the Apotheosis stress cost
//! 3. Force Apotheosis off if Stress is at its ceiling after the cost
//!
//! Turn end:
//! 1. Apply environmental stress (clamped)
//! 2. Roll on the panic table at Ruin Madness
//! 3. List passive CPS effects for the current stage
//! 4. Flag a trauma check if Stress touched its ceiling during the call

use crate::core::config::TraumaConfig;
use crate::core::error::Result;
use crate::core::types::CharacterId;
use crate::trauma::dice::DiceRoller;
use crate::trauma::panic::PanicTableResolver;
use crate::trauma::repository::TraumaRepository;
use crate::trauma::result::{TurnIntegrationResult, TurnPhase};
use crate::trauma::state::TraumaEconomyState;
use crate::trauma::track::DegradationTrack;
use rayon::prelude::*;

/// Run the turn-start pipeline on one character
///
/// Needs no randomness, so it is a free function that batch processing can
/// call from any worker thread. `apotheosis_stress_cost` is the engine's
/// configured cost.
pub fn run_turn_start(
    state: &mut TraumaEconomyState,
    in_combat: bool,
    is_idle: bool,
    apotheosis_stress_cost: i32,
) -> TurnIntegrationResult {
    let mut next = state.clone();
    let mut result = TurnIntegrationResult::empty(next.character_id(), TurnPhase::Start);
    result.stress_before = next.stress().value();

    // 1. Resource pool
    result.resource_advance = next.advance_resource(in_combat, is_idle);

    // 2-3. Apotheosis cost, then exit check against post-cost stress
    let tick = next.tick_apotheosis(apotheosis_stress_cost);
    result.apotheosis_stress_applied = tick.stress_applied;
    if let Some(exit) = tick.exit {
        result.auto_exited_apotheosis = true;
        result.auto_exit_reason = Some(exit.to_string());
    }

    result.stress_after = next.stress().value();
    *state = next;
    result
}

/// Per-character turn processing
pub struct TurnIntegrationEngine<R: DiceRoller> {
    config: TraumaConfig,
    resolver: PanicTableResolver,
    roller: R,
}

impl<R: DiceRoller> TurnIntegrationEngine<R> {
    /// Build an engine. An inconsistent config is rejected here, before any
    /// state is touched.
    pub fn new(config: TraumaConfig, roller: R) -> Result<Self> {
        config.validate()?;
        let resolver = PanicTableResolver::new(config.panic_table.clone());
        Ok(Self { config, resolver, roller })
    }

    pub fn config(&self) -> &TraumaConfig {
        &self.config
    }

    pub fn roller(&self) -> &R {
        &self.roller
    }

    /// Create a character's starting state from its repository profile
    pub fn create_state<Repo>(&self, repo: &Repo, id: CharacterId) -> Result<TraumaEconomyState>
    where
        Repo: TraumaRepository + ?Sized,
    {
        let profile = repo.profile(id)?;
        TraumaEconomyState::new(id, profile, &self.config)
    }

    fn load_or_create<Repo>(&self, repo: &Repo, id: CharacterId) -> Result<TraumaEconomyState>
    where
        Repo: TraumaRepository + ?Sized,
    {
        match repo.load(id)? {
            Some(state) => Ok(state),
            None => self.create_state(repo, id),
        }
    }

    pub fn process_turn_start(
        &self,
        state: &mut TraumaEconomyState,
        in_combat: bool,
        is_idle: bool,
    ) -> TurnIntegrationResult {
        let result =
            run_turn_start(state, in_combat, is_idle, self.config.apotheosis_stress_cost);
        log_result(&result);
        result
    }

    /// Turn start for a character held in a repository
    pub fn process_turn_start_for<Repo>(
        &self,
        repo: &mut Repo,
        id: CharacterId,
        in_combat: bool,
        is_idle: bool,
    ) -> Result<TurnIntegrationResult>
    where
        Repo: TraumaRepository + ?Sized,
    {
        let mut state = self.load_or_create(repo, id)?;
        let result = self.process_turn_start(&mut state, in_combat, is_idle);
        repo.save(state)?;
        Ok(result)
    }

    /// Turn start for many independent characters
    ///
    /// Runs on the rayon pool once the batch reaches `parallel_threshold`.
    /// Results come back in input order.
    pub fn process_turn_start_batch(
        &self,
        states: &mut [TraumaEconomyState],
        in_combat: bool,
        is_idle: bool,
    ) -> Vec<TurnIntegrationResult> {
        let cost = self.config.apotheosis_stress_cost;
        let results: Vec<TurnIntegrationResult> = if states.len() >= self.config.parallel_threshold
        {
            // PARALLEL: characters' states are independent
            states
                .par_iter_mut()
                .map(|state| run_turn_start(state, in_combat, is_idle, cost))
                .collect()
        } else {
            states
                .iter_mut()
                .map(|state| run_turn_start(state, in_combat, is_idle, cost))
                .collect()
        };

        for result in &results {
            log_result(result);
        }
        results
    }

    pub fn process_turn_end(
        &mut self,
        state: &mut TraumaEconomyState,
        environmental_stress: i32,
    ) -> TurnIntegrationResult {
        let mut next = state.clone();
        let mut result = TurnIntegrationResult::empty(next.character_id(), TurnPhase::End);
        result.stress_before = next.stress().value();
        let mut touched_ceiling = next.stress().is_at_ceiling();

        // 1. Environmental stress
        let environmental = environmental_stress.clamp(0, self.config.max_environmental_stress);
        result.environmental_stress_applied = next.add_raw_stress(environmental);
        touched_ceiling |= next.stress().is_at_ceiling();

        // 2. Panic check, gated on the CPS stage as it stands now
        let stage = next.cps().stage();
        result.cps_stage = Some(stage);
        if PanicTableResolver::applies_to(stage) {
            let roll = self.roller.roll(self.resolver.table().die_sides());
            result.panic_check_performed = true;
            result.panic_roll = Some(roll);

            if let Some(effect) = self.resolver.resolve(stage, roll) {
                result.panic_effect = Some(effect);
                result.panic_stress_applied = next.add_raw_stress(effect.stress_penalty());
                touched_ceiling |= next.stress().is_at_ceiling();
                tracing::info!(
                    "Character {} panics ({:?}) on roll {}",
                    next.character_id(),
                    effect,
                    roll
                );
            }
        }

        // 3. Passive distortion for the current stage
        result.passive_effects = self.config.cps_effects.effects_for(stage).to_vec();

        // 4. Trauma check trigger
        result.trauma_check_triggered = touched_ceiling;

        result.stress_after = next.stress().value();
        *state = next;
        log_result(&result);
        result
    }

    /// Turn end for a character held in a repository
    pub fn process_turn_end_for<Repo>(
        &mut self,
        repo: &mut Repo,
        id: CharacterId,
        environmental_stress: i32,
    ) -> Result<TurnIntegrationResult>
    where
        Repo: TraumaRepository + ?Sized,
    {
        let mut state = self.load_or_create(repo, id)?;
        let result = self.process_turn_end(&mut state, environmental_stress);
        repo.save(state)?;
        Ok(result)
    }
}

fn log_result(result: &TurnIntegrationResult) {
    tracing::debug!("{}", result);
    if let Some(reason) = &result.auto_exit_reason {
        tracing::info!("Character {}: {}", result.character_id, reason);
    }
    if result.trauma_check_triggered {
        tracing::warn!(
            "Character {} reached the stress ceiling, trauma check required",
            result.character_id
        );
    }
}
