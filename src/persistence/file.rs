//! File-backed profile store

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::{ProfileStore, decode, encode};
use crate::progression::PlayerProfile;
use crate::{Error, Result};

/// Profile file name inside the data directory
pub const PROFILE_FILE: &str = "profile.bin";

/// Platform directories for game data (profile, log) and config (settings)
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "skylight").ok_or(Error::NoHomeDir)
}

/// Stores the profile at a fixed path
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `profile.bin` in the platform data directory
    pub fn default_location() -> Result<Self> {
        let dirs = project_dirs()?;
        Ok(Self::new(dirs.data_local_dir().join(PROFILE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for FileStore {
    fn load(&self) -> Result<Option<PlayerProfile>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&bytes).map(Some)
    }

    fn save(&self, profile: &PlayerProfile) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("bin.tmp");
        fs::write(&tmp, encode(profile)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
