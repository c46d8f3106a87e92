//! Lineage and archetype baselines
//!
//! Lineage decides where Corruption starts and how far it can ever be
//! cleansed. Archetype decides which specialization pool a character uses.

use crate::trauma::resource::ResourceKind;
use serde::{Deserialize, Serialize};

/// Bloodline of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lineage {
    /// Ordinary settlement folk
    Clanborn,
    /// Descended from rune-carvers, steadier minds
    Runeblooded,
    /// Hardened by the forges, resist strain
    Ironbound,
    /// Born in the blight, never fully clean
    Blightborn,
}

/// Starting values and resistances granted by a lineage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageBaseline {
    pub starting_corruption: i32,
    /// Corruption can never be reduced below this
    pub corruption_floor: i32,
    pub starting_cps: i32,
    /// Subtracted from each positive external stress event (ADDITIVE)
    pub stress_resistance: i32,
}

impl Lineage {
    pub fn all() -> &'static [Lineage] {
        &[
            Lineage::Clanborn,
            Lineage::Runeblooded,
            Lineage::Ironbound,
            Lineage::Blightborn,
        ]
    }

    pub fn baseline(&self) -> LineageBaseline {
        match self {
            Lineage::Clanborn => LineageBaseline {
                starting_corruption: 0,
                corruption_floor: 0,
                starting_cps: 0,
                stress_resistance: 0,
            },
            Lineage::Runeblooded => LineageBaseline {
                starting_corruption: 5,
                corruption_floor: 0,
                starting_cps: 10,
                stress_resistance: 1,
            },
            Lineage::Ironbound => LineageBaseline {
                starting_corruption: 0,
                corruption_floor: 0,
                starting_cps: 0,
                stress_resistance: 2,
            },
            Lineage::Blightborn => LineageBaseline {
                starting_corruption: 15,
                corruption_floor: 10,
                starting_cps: 5,
                stress_resistance: 0,
            },
        }
    }
}

/// Class of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Berserker,
    Skirmisher,
    Mystic,
    Warden,
    Scholar,
}

impl Archetype {
    /// Specialization pool used by this archetype, if any
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        match self {
            Archetype::Berserker => Some(ResourceKind::Rage),
            Archetype::Skirmisher => Some(ResourceKind::Momentum),
            Archetype::Mystic => Some(ResourceKind::Coherence),
            Archetype::Warden | Archetype::Scholar => None,
        }
    }
}

/// What the repository knows about a character before any trauma state exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub lineage: Lineage,
    pub archetype: Archetype,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baselines_respect_floor() {
        for lineage in Lineage::all() {
            let base = lineage.baseline();
            assert!(base.starting_corruption >= base.corruption_floor, "{:?}", lineage);
            assert!(base.stress_resistance >= 0);
        }
    }

    #[test]
    fn test_blightborn_has_floor() {
        assert!(Lineage::Blightborn.baseline().corruption_floor > 0);
        assert_eq!(Lineage::Clanborn.baseline().corruption_floor, 0);
    }

    #[test]
    fn test_archetype_resources() {
        assert_eq!(Archetype::Berserker.resource_kind(), Some(ResourceKind::Rage));
        assert_eq!(Archetype::Skirmisher.resource_kind(), Some(ResourceKind::Momentum));
        assert_eq!(Archetype::Mystic.resource_kind(), Some(ResourceKind::Coherence));
        assert_eq!(Archetype::Warden.resource_kind(), None);
    }
}
