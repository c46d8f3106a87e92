pub mod apotheosis;
pub mod constants;
pub mod corruption;
pub mod cps;
pub mod dice;
pub mod lineage;
pub mod panic;
pub mod repository;
pub mod resource;
pub mod result;
pub mod snapshot;
pub mod state;
pub mod stress;
pub mod track;
pub mod turn;

pub use apotheosis::{ApotheosisExit, ApotheosisState};
pub use corruption::{CorruptionStage, CorruptionTrack};
pub use cps::{CpsEffectTable, CpsPassiveEffect, CpsStage, CpsTrack};
pub use dice::{DiceRoller, SeededRoller};
pub use lineage::{Archetype, CharacterProfile, Lineage, LineageBaseline};
pub use panic::{PanicEffect, PanicTable, PanicTableResolver};
pub use repository::{InMemoryTraumaRepository, TraumaRepository};
pub use resource::{
    PoolConfig, ResourceAdvance, ResourceKind, ResourcePool, ResourceReading, ResourceThreshold,
    SpecializationResource,
};
pub use result::{TurnIntegrationResult, TurnPhase};
pub use snapshot::{TraumaEconomySnapshot, WarningLevel};
pub use state::TraumaEconomyState;
pub use stress::{StressThreshold, StressTrack};
pub use track::DegradationTrack;
pub use turn::TurnIntegrationEngine;
