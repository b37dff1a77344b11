//! In-memory profile store

use std::cell::{Cell, RefCell};

use super::{ProfileStore, decode, encode};
use crate::Result;
use crate::progression::PlayerProfile;

/// Keeps the encoded profile in memory and counts saves
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: RefCell<Option<Vec<u8>>>,
    saves: Cell<u32>,
}

impl MemoryStore {
    /// Store pre-seeded with raw bytes (possibly corrupt)
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: RefCell::new(Some(bytes)),
            saves: Cell::new(0),
        }
    }

    /// Number of successful `save` calls
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<PlayerProfile>> {
        self.bytes.borrow().as_deref().map(decode).transpose()
    }

    fn save(&self, profile: &PlayerProfile) -> Result<()> {
        *self.bytes.borrow_mut() = Some(encode(profile)?);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_nothing() {
        let store = MemoryStore::default();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::default();
        let profile = PlayerProfile {
            high_score: 3,
            ..Default::default()
        };
        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap(), Some(profile));
        assert_eq!(store.save_count(), 1);
    }
}
