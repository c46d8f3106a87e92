//! Character/trauma repository seam
//!
//! The repository supplies a character's lineage and archetype and stores
//! updated trauma state. Storage backends live outside this crate; the
//! in-memory version backs tests and the headless runner.

use crate::core::error::{Result, TraumaError};
use crate::core::types::CharacterId;
use crate::trauma::lineage::CharacterProfile;
use crate::trauma::state::TraumaEconomyState;
use ahash::AHashMap;

pub trait TraumaRepository {
    /// Lineage and archetype of a known character
    fn profile(&self, id: CharacterId) -> Result<CharacterProfile>;

    /// Stored trauma state, `None` if never created
    fn load(&self, id: CharacterId) -> Result<Option<TraumaEconomyState>>;

    /// Persist a character's trauma state
    fn save(&mut self, state: TraumaEconomyState) -> Result<()>;
}

/// Hash-map backed repository
#[derive(Debug, Default)]
pub struct InMemoryTraumaRepository {
    profiles: AHashMap<CharacterId, CharacterProfile>,
    states: AHashMap<CharacterId, TraumaEconomyState>,
}

impl InMemoryTraumaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new character and return its id
    pub fn register(&mut self, profile: CharacterProfile) -> CharacterId {
        let id = CharacterId::new();
        self.profiles.insert(id, profile);
        id
    }

    pub fn state(&self, id: CharacterId) -> Option<&TraumaEconomyState> {
        self.states.get(&id)
    }
}

impl TraumaRepository for InMemoryTraumaRepository {
    fn profile(&self, id: CharacterId) -> Result<CharacterProfile> {
        self.profiles
            .get(&id)
            .copied()
            .ok_or(TraumaError::CharacterNotFound(id))
    }

    fn load(&self, id: CharacterId) -> Result<Option<TraumaEconomyState>> {
        if !self.profiles.contains_key(&id) {
            return Err(TraumaError::CharacterNotFound(id));
        }
        Ok(self.states.get(&id).cloned())
    }

    fn save(&mut self, state: TraumaEconomyState) -> Result<()> {
        let id = state.character_id();
        if !self.profiles.contains_key(&id) {
            return Err(TraumaError::CharacterNotFound(id));
        }
        self.states.insert(id, state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TraumaConfig;
    use crate::trauma::lineage::{Archetype, Lineage};

    fn profile() -> CharacterProfile {
        CharacterProfile { lineage: Lineage::Clanborn, archetype: Archetype::Warden }
    }

    #[test]
    fn test_unknown_character() {
        let repo = InMemoryTraumaRepository::new();
        let id = CharacterId::new();
        assert!(matches!(repo.profile(id), Err(TraumaError::CharacterNotFound(_))));
        assert!(repo.load(id).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let mut repo = InMemoryTraumaRepository::new();
        let id = repo.register(profile());
        assert!(repo.load(id).unwrap().is_none());

        let state = TraumaEconomyState::new(id, profile(), &TraumaConfig::default()).unwrap();
        repo.save(state.clone()).unwrap();
        assert_eq!(repo.load(id).unwrap(), Some(state));
    }

    #[test]
    fn test_save_unregistered_rejected() {
        let mut repo = InMemoryTraumaRepository::new();
        let state =
            TraumaEconomyState::new(CharacterId::new(), profile(), &TraumaConfig::default())
                .unwrap();
        assert!(repo.save(state).is_err());
    }
}
