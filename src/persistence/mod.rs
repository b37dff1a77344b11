//! Profile persistence
//!
//! The profile is stored as an opaque bincode record of its fields, in order.
//! Backends:
//! - `file`: platform data directory, written via temp file + rename
//! - `memory`: in-process bytes (tests, headless runs)

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::Result;
use crate::progression::PlayerProfile;

/// Storage collaborator for the player profile
pub trait ProfileStore {
    /// Read the stored profile; `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<PlayerProfile>>;

    /// Replace the stored profile
    fn save(&self, profile: &PlayerProfile) -> Result<()>;
}

/// Serialize a profile to its persisted bytes
pub fn encode(profile: &PlayerProfile) -> Result<Vec<u8>> {
    Ok(bincode::serialize(profile)?)
}

/// Parse persisted bytes back into a profile
pub fn decode(bytes: &[u8]) -> Result<PlayerProfile> {
    Ok(bincode::deserialize(bytes)?)
}
