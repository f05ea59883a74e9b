//! File-backed persistence for the preset list
//!
//! The on-disk format is a bare JSON array of second counts, for example
//! `[30, 45, 120]`. Reads never fail outward: anything wrong with the file
//! degrades to the default list. Writes go through a temp file in the same
//! directory and a rename, and are best-effort; a failed write is logged
//! and the in-memory list stays authoritative.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::presets::PresetList;
use crate::state::duration::DurationSecs;

/// Name of the preset file inside the data directory
const PRESETS_FILE: &str = "presets.json";

/// Handle to the preset file
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    /// Create a store rooted in the given data directory
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PRESETS_FILE),
        }
    }

    /// Get the path the list is persisted at
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted list. Falls back to the defaults when the file
    /// is missing, unreadable, malformed, holds out-of-range values, or
    /// is empty.
    pub fn load(&self) -> PresetList {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preset file at {}, using defaults", self.path.display());
                return PresetList::default_pair();
            }
            Err(err) => {
                warn!(
                    "Failed to read presets from {}: {}, using defaults",
                    self.path.display(),
                    err
                );
                return PresetList::default_pair();
            }
        };

        match serde_json::from_str::<Vec<DurationSecs>>(&raw) {
            Ok(values) => {
                let list = PresetList::from_entries(values);
                debug!("Loaded {} presets from {}", list.len(), self.path.display());
                list
            }
            Err(err) => {
                warn!(
                    "Preset file {} is not a valid duration array: {}, using defaults",
                    self.path.display(),
                    err
                );
                PresetList::default_pair()
            }
        }
    }

    /// Persist the list. Best-effort: failures are logged and swallowed so
    /// a read-only disk can never break the timer.
    pub fn save(&self, list: &PresetList) {
        if let Err(err) = self.try_save(list) {
            warn!("Failed to persist presets to {}: {}", self.path.display(), err);
        }
    }

    fn try_save(&self, list: &PresetList) -> anyhow::Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let seconds: Vec<u32> = list.entries().iter().map(|d| d.get()).collect();
        let payload = serde_json::to_string(&seconds)?;

        // Write to a sibling temp file and rename into place, so a crash
        // mid-write can never leave a truncated preset file behind.
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(payload.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)?;

        debug!("Saved {} presets to {}", list.len(), self.path.display());
        Ok(())
    }
}
