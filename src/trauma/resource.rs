//! Specialization resource pools
//!
//! Each archetype carries at most one pool: Rage, Momentum or Coherence.
//! Pools build up through play and bleed off between fights. Reading a
//! pool always goes through an exhaustive match on the variant.

use crate::core::error::{Result, TraumaError};
use serde::{Deserialize, Serialize};

/// Bounds and rates of one pool variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolConfig {
    pub min: i32,
    pub max: i32,
    pub starts_at: i32,
    /// Gained per regeneration tick (rest, meditation)
    pub regen_per_turn: i32,
    /// Lost per out-of-combat turn
    pub decay_per_turn: i32,
}

impl PoolConfig {
    pub const fn rage() -> Self {
        Self { min: 0, max: 100, starts_at: 0, regen_per_turn: 0, decay_per_turn: 10 }
    }

    pub const fn momentum() -> Self {
        Self { min: 0, max: 100, starts_at: 0, regen_per_turn: 0, decay_per_turn: 15 }
    }

    pub const fn coherence() -> Self {
        Self { min: 0, max: 100, starts_at: 50, regen_per_turn: 5, decay_per_turn: 2 }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(TraumaError::InvalidBounds { min: self.min, max: self.max });
        }
        if !(self.min..=self.max).contains(&self.starts_at) {
            return Err(TraumaError::PoolStartOutOfRange {
                starts_at: self.starts_at,
                min: self.min,
                max: self.max,
            });
        }
        if self.regen_per_turn < 0 {
            return Err(TraumaError::NegativeRate { field: "regen", value: self.regen_per_turn });
        }
        if self.decay_per_turn < 0 {
            return Err(TraumaError::NegativeRate { field: "decay", value: self.decay_per_turn });
        }
        Ok(())
    }
}

/// A pool's current value together with its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PoolRecord")]
pub struct ResourcePool {
    current: i32,
    config: PoolConfig,
}

/// Stored pool, validated and clamped on load
#[derive(Deserialize)]
struct PoolRecord {
    current: i32,
    config: PoolConfig,
}

impl TryFrom<PoolRecord> for ResourcePool {
    type Error = TraumaError;

    fn try_from(record: PoolRecord) -> Result<Self> {
        Self::with_value(record.config, record.current)
    }
}

impl ResourcePool {
    /// New pool at its starting value. Fails on an inconsistent config.
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { current: config.starts_at, config })
    }

    /// New pool at an arbitrary value (clamped into bounds)
    pub fn with_value(config: PoolConfig, value: i32) -> Result<Self> {
        config.validate()?;
        Ok(Self { current: value.clamp(config.min, config.max), config })
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Fill level as an integer percentage of the pool's span
    pub fn fill_percent(&self) -> i32 {
        let span = i64::from(self.config.max) - i64::from(self.config.min);
        if span == 0 {
            return 100;
        }
        let filled = i64::from(self.current) - i64::from(self.config.min);
        // 0..=100 once current is within bounds
        (filled * 100 / span) as i32
    }

    fn set(self, value: i32) -> Self {
        Self {
            current: value.clamp(self.config.min, self.config.max),
            config: self.config,
        }
    }
}

/// Which pool variant a character uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Rage,
    Momentum,
    Coherence,
}

/// Rage tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RageThreshold {
    Calm,
    Heated,
    Enraged,
    Berserk,
}

/// Momentum tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MomentumThreshold {
    Still,
    Building,
    Flowing,
    Unstoppable,
}

/// Coherence tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CoherenceThreshold {
    Fractured,
    Unstable,
    Stable,
    Harmonized,
}

/// Threshold of whichever pool is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceThreshold {
    Rage(RageThreshold),
    Momentum(MomentumThreshold),
    Coherence(CoherenceThreshold),
}

impl RageThreshold {
    fn from_fill(percent: i32) -> Self {
        match percent {
            p if p >= 80 => RageThreshold::Berserk,
            p if p >= 50 => RageThreshold::Enraged,
            p if p >= 20 => RageThreshold::Heated,
            _ => RageThreshold::Calm,
        }
    }
}

impl MomentumThreshold {
    fn from_fill(percent: i32) -> Self {
        match percent {
            p if p >= 75 => MomentumThreshold::Unstoppable,
            p if p >= 40 => MomentumThreshold::Flowing,
            p if p >= 10 => MomentumThreshold::Building,
            _ => MomentumThreshold::Still,
        }
    }
}

impl CoherenceThreshold {
    fn from_fill(percent: i32) -> Self {
        match percent {
            p if p >= 75 => CoherenceThreshold::Harmonized,
            p if p >= 50 => CoherenceThreshold::Stable,
            p if p >= 25 => CoherenceThreshold::Unstable,
            _ => CoherenceThreshold::Fractured,
        }
    }
}

/// Value and threshold extracted from the active pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceReading {
    pub kind: ResourceKind,
    pub value: i32,
    pub min: i32,
    pub max: i32,
    pub threshold: ResourceThreshold,
}

/// What one advance (or regeneration) did to the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAdvance {
    /// `None` for characters without a specialization resource
    pub kind: Option<ResourceKind>,
    pub previous: i32,
    pub current: i32,
}

impl ResourceAdvance {
    pub fn none() -> Self {
        Self { kind: None, previous: 0, current: 0 }
    }

    pub fn delta(&self) -> i32 {
        self.current.saturating_sub(self.previous)
    }

    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// The archetype-specific pool a character carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpecializationResource {
    Rage(ResourcePool),
    Momentum(ResourcePool),
    Coherence(ResourcePool),
    #[default]
    None,
}

impl SpecializationResource {
    /// Build the pool for a kind from its config
    pub fn for_kind(kind: Option<ResourceKind>, config: PoolConfig) -> Result<Self> {
        Ok(match kind {
            Some(ResourceKind::Rage) => SpecializationResource::Rage(ResourcePool::new(config)?),
            Some(ResourceKind::Momentum) => {
                SpecializationResource::Momentum(ResourcePool::new(config)?)
            }
            Some(ResourceKind::Coherence) => {
                SpecializationResource::Coherence(ResourcePool::new(config)?)
            }
            None => SpecializationResource::None,
        })
    }

    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            SpecializationResource::Rage(_) => Some(ResourceKind::Rage),
            SpecializationResource::Momentum(_) => Some(ResourceKind::Momentum),
            SpecializationResource::Coherence(_) => Some(ResourceKind::Coherence),
            SpecializationResource::None => None,
        }
    }

    pub fn pool(&self) -> Option<&ResourcePool> {
        match self {
            SpecializationResource::Rage(pool)
            | SpecializationResource::Momentum(pool)
            | SpecializationResource::Coherence(pool) => Some(pool),
            SpecializationResource::None => None,
        }
    }

    /// Extract value and threshold from the active variant
    pub fn reading(&self) -> Option<ResourceReading> {
        match self {
            SpecializationResource::Rage(pool) => Some(ResourceReading {
                kind: ResourceKind::Rage,
                value: pool.current,
                min: pool.config.min,
                max: pool.config.max,
                threshold: ResourceThreshold::Rage(RageThreshold::from_fill(pool.fill_percent())),
            }),
            SpecializationResource::Momentum(pool) => Some(ResourceReading {
                kind: ResourceKind::Momentum,
                value: pool.current,
                min: pool.config.min,
                max: pool.config.max,
                threshold: ResourceThreshold::Momentum(MomentumThreshold::from_fill(
                    pool.fill_percent(),
                )),
            }),
            SpecializationResource::Coherence(pool) => Some(ResourceReading {
                kind: ResourceKind::Coherence,
                value: pool.current,
                min: pool.config.min,
                max: pool.config.max,
                threshold: ResourceThreshold::Coherence(CoherenceThreshold::from_fill(
                    pool.fill_percent(),
                )),
            }),
            SpecializationResource::None => None,
        }
    }

    fn map_pool(self, f: impl FnOnce(ResourcePool) -> ResourcePool) -> Self {
        match self {
            SpecializationResource::Rage(pool) => SpecializationResource::Rage(f(pool)),
            SpecializationResource::Momentum(pool) => SpecializationResource::Momentum(f(pool)),
            SpecializationResource::Coherence(pool) => SpecializationResource::Coherence(f(pool)),
            SpecializationResource::None => SpecializationResource::None,
        }
    }

    fn describe(&self, next: &Self) -> ResourceAdvance {
        match (self.pool(), next.pool()) {
            (Some(before), Some(after)) => ResourceAdvance {
                kind: self.kind(),
                previous: before.current,
                current: after.current,
            },
            _ => ResourceAdvance::none(),
        }
    }

    /// Advance the pool by one turn
    ///
    /// Out of combat the pool decays toward its minimum. Momentum only
    /// decays when the character is also idle.
    pub fn advance(&self, in_combat: bool, is_idle: bool) -> (Self, ResourceAdvance) {
        let decays = match self {
            SpecializationResource::Rage(_) | SpecializationResource::Coherence(_) => !in_combat,
            SpecializationResource::Momentum(_) => !in_combat && is_idle,
            SpecializationResource::None => false,
        };

        let next = if decays {
            self.map_pool(|pool| {
                pool.set(pool.current.saturating_sub(pool.config.decay_per_turn))
            })
        } else {
            *self
        };
        let advance = self.describe(&next);
        (next, advance)
    }

    /// Apply one regeneration tick (rest, meditation)
    pub fn regenerate(&self) -> (Self, ResourceAdvance) {
        let next = self.map_pool(|pool| {
            pool.set(pool.current.saturating_add(pool.config.regen_per_turn))
        });
        let advance = self.describe(&next);
        (next, advance)
    }

    /// Build resource from gameplay (damage taken, hits landed)
    pub fn gain(&self, amount: i32) -> Self {
        self.map_pool(|pool| pool.set(pool.current.saturating_add(amount.max(0))))
    }

    /// Spend resource on an ability. `None` if the pool cannot cover it.
    pub fn try_spend(&self, amount: i32) -> Option<Self> {
        let pool = self.pool()?;
        if amount < 0 {
            return None;
        }
        let remaining = pool.current.checked_sub(amount)?;
        if remaining < pool.config.min {
            return None;
        }
        Some(self.map_pool(|pool| pool.set(remaining)))
    }

    /// Return the pool to its starting value
    pub fn reset(&self) -> Self {
        self.map_pool(|pool| pool.set(pool.config.starts_at))
    }
}
