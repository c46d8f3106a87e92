//! Headless Turn Runner
//!
//! Plays one character through a scripted run of turns and prints the
//! per-turn results and snapshots. Useful for tuning pool rates and tables.

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use trauma_economy::core::config::TraumaConfig;
use trauma_economy::core::error::{Result, TraumaError};
use trauma_economy::core::types::TraumaId;
use trauma_economy::trauma::{
    Archetype, CharacterProfile, InMemoryTraumaRepository, Lineage, SeededRoller,
    TraumaEconomySnapshot, TraumaRepository, TurnIntegrationEngine, TurnIntegrationResult,
};

/// Headless Turn Runner - trauma economy over a run of turns
#[derive(Parser, Debug)]
#[command(name = "turn_runner")]
#[command(about = "Run one character through N turns and report trauma economy changes")]
struct Args {
    /// Lineage: clanborn, runeblooded, ironbound, blightborn
    #[arg(long, default_value = "clanborn")]
    lineage: String,

    /// Archetype: berserker, skirmisher, mystic, warden, scholar
    #[arg(long, default_value = "berserker")]
    archetype: String,

    /// Number of turns to play
    #[arg(long, default_value_t = 20)]
    turns: u32,

    /// Every Nth turn is fought in combat
    #[arg(long, default_value_t = 2)]
    combat_every: u32,

    /// Enter Apotheosis on the first turn
    #[arg(long)]
    apotheosis: bool,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config (defaults built in when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct TurnReport {
    turn: u32,
    start: TurnIntegrationResult,
    end: TurnIntegrationResult,
    snapshot: TraumaEconomySnapshot,
}

fn parse_lineage(name: &str) -> Option<Lineage> {
    match name.to_ascii_lowercase().as_str() {
        "clanborn" => Some(Lineage::Clanborn),
        "runeblooded" => Some(Lineage::Runeblooded),
        "ironbound" => Some(Lineage::Ironbound),
        "blightborn" => Some(Lineage::Blightborn),
        _ => None,
    }
}

fn parse_archetype(name: &str) -> Option<Archetype> {
    match name.to_ascii_lowercase().as_str() {
        "berserker" => Some(Archetype::Berserker),
        "skirmisher" => Some(Archetype::Skirmisher),
        "mystic" => Some(Archetype::Mystic),
        "warden" => Some(Archetype::Warden),
        "scholar" => Some(Archetype::Scholar),
        _ => None,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trauma_economy=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let Some(lineage) = parse_lineage(&args.lineage) else {
        eprintln!("Unknown lineage: {}", args.lineage);
        std::process::exit(2);
    };
    let Some(archetype) = parse_archetype(&args.archetype) else {
        eprintln!("Unknown archetype: {}", args.archetype);
        std::process::exit(2);
    };

    let config = match &args.config {
        Some(path) => TraumaConfig::load(path)?,
        None => TraumaConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Turn runner starting (seed {})", seed);
    let mut events = ChaCha8Rng::seed_from_u64(seed);
    let mut engine = TurnIntegrationEngine::new(config, SeededRoller::new(seed))?;

    let mut repo = InMemoryTraumaRepository::new();
    let id = repo.register(CharacterProfile { lineage, archetype });
    let mut state = engine.create_state(&repo, id)?;
    if args.apotheosis {
        state.activate_apotheosis();
    }
    repo.save(state)?;

    let combat_every = args.combat_every.max(1);
    let mut reports = Vec::new();

    for turn in 1..=args.turns {
        let in_combat = turn % combat_every == 0;
        let start = engine.process_turn_start_for(&mut repo, id, in_combat, !in_combat)?;

        // Gameplay between the two phases: hits taken build stress and rage,
        // exposure to the blight builds corruption and CPS.
        let mut state = repo.load(id)?.ok_or(TraumaError::CharacterNotFound(id))?;
        if in_combat {
            state.apply_stress(events.gen_range(0..=8));
            state.gain_resource(events.gen_range(5..=20));
        } else {
            state.regenerate_resource();
        }
        state.apply_corruption(events.gen_range(0..=4));
        state.apply_cps(events.gen_range(0..=6));
        repo.save(state)?;

        let end = engine.process_turn_end_for(&mut repo, id, events.gen_range(0..=5))?;

        // Resolve the checks the core only flags
        let mut state = repo.load(id)?.ok_or(TraumaError::CharacterNotFound(id))?;
        if end.trauma_check_triggered {
            let trauma = TraumaId::new(format!("trauma_turn_{}", turn));
            state.resolve_trauma_check(Some(trauma), engine.config());
        }
        if state.corruption().requires_mutation_check() {
            let mutation = TraumaId::new(format!("mutation_turn_{}", turn));
            state.resolve_mutation_check(mutation, engine.config());
            tracing::warn!("Mutation check resolved on turn {}", turn);
        }
        let snapshot = TraumaEconomySnapshot::capture(&state, None);
        repo.save(state)?;

        if args.format == "json" {
            reports.push(TurnReport { turn, start, end, snapshot });
        } else {
            println!("--- Turn {} ({}) ---", turn, if in_combat { "combat" } else { "quiet" });
            println!("  {}", start);
            println!("  {}", end);
            println!("  {}", snapshot);
        }
    }

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
