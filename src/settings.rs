//! Game settings and preferences
//!
//! Persisted as JSON in the platform config directory, separately from the
//! profile. Missing fields fall back to their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::consts::TICK_RATE;
use crate::persistence::file::project_dirs;
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical ticks per second
    pub tick_rate: u32,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
    /// Silence sound requests
    pub mute: bool,
    /// Profile location override
    pub profile_path: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset
    pub log_filter: String,
    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            seed: None,
            mute: false,
            profile_path: None,
            log_filter: "info".to_string(),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Settings file name inside the config directory
    pub const FILE_NAME: &'static str = "settings.json";

    /// `settings.json` in the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(Self::FILE_NAME))
    }

    /// Parse settings from JSON text, unchecked
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from `path`; `Ok(None)` when the file does not exist
    ///
    /// Nothing is logged or repaired here, so this can run before the logger
    /// is installed. Call [`Settings::sanitized`] once logging is up.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings to `path` (temp file + rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Repair out-of-range values, warning about each
    pub fn sanitized(mut self) -> Self {
        if self.tick_rate == 0 {
            log::warn!("tick_rate 0 is invalid, using {}", TICK_RATE);
            self.tick_rate = TICK_RATE;
        }
        self.tuning = self.tuning.sanitized();
        self
    }
}
