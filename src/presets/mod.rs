//! Preset list management and persistence

pub mod store;

pub use store::PresetStore;

use crate::state::duration::DurationSecs;

/// Durations offered on a fresh install, in display order. The 45-second
/// interval comes first so it is the active duration out of the box.
pub const DEFAULT_PRESETS: [u32; 2] = [45, 30];

/// Why a preset mutation was rejected. All of these surface as silent
/// no-ops at the UI edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PresetError {
    #[error("duration is already a preset")]
    Duplicate,
    #[error("the last remaining preset cannot be deleted")]
    LastEntry,
    #[error("no preset at that position")]
    BadIndex,
}

/// Ordered list of preset durations. Entries are unique and the list is
/// never empty; mutations keep it sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetList {
    entries: Vec<DurationSecs>,
}

impl PresetList {
    /// Create the stock default pair
    pub fn default_pair() -> Self {
        let entries = DEFAULT_PRESETS
            .iter()
            .filter_map(|&secs| DurationSecs::new(secs))
            .collect();
        Self { entries }
    }

    /// Build a list from loaded values. Duplicates collapse to their first
    /// occurrence and an empty result falls back to the defaults. Order is
    /// preserved as given: persisted lists were written sorted, and the
    /// default pair keeps 45 first.
    pub fn from_entries(values: Vec<DurationSecs>) -> Self {
        let mut entries: Vec<DurationSecs> = Vec::with_capacity(values.len());
        for value in values {
            if !entries.contains(&value) {
                entries.push(value);
            }
        }
        if entries.is_empty() {
            return Self::default_pair();
        }
        Self { entries }
    }

    /// Get the entries in display order
    pub fn entries(&self) -> &[DurationSecs] {
        &self.entries
    }

    /// Get the number of presets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A preset list holds at least one entry by construction
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the preset at a position
    pub fn get(&self, index: usize) -> Option<DurationSecs> {
        self.entries.get(index).copied()
    }

    /// Get the first preset, the fallback active duration
    pub fn first(&self) -> DurationSecs {
        // The list is never empty, every constructor and mutation keeps
        // at least one entry.
        self.entries[0]
    }

    /// Check whether a duration is already in the list
    pub fn contains(&self, value: DurationSecs) -> bool {
        self.entries.contains(&value)
    }

    /// Insert a new duration, keeping the list sorted ascending
    pub fn add(&mut self, value: DurationSecs) -> Result<(), PresetError> {
        if self.contains(value) {
            return Err(PresetError::Duplicate);
        }
        self.entries.push(value);
        self.entries.sort_unstable();
        Ok(())
    }

    /// Replace the entry at `index`, keeping the list sorted ascending.
    /// Returns the replaced value. Pointing an entry at a value some other
    /// entry already holds is a duplicate; re-submitting its own value is
    /// an allowed no-op.
    pub fn edit(&mut self, index: usize, value: DurationSecs) -> Result<DurationSecs, PresetError> {
        let old = self.get(index).ok_or(PresetError::BadIndex)?;
        let taken_elsewhere = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, entry)| i != index && *entry == value);
        if taken_elsewhere {
            return Err(PresetError::Duplicate);
        }
        self.entries[index] = value;
        self.entries.sort_unstable();
        Ok(old)
    }

    /// Remove the entry at `index` and return it. The final entry is
    /// protected so the list never becomes empty.
    pub fn remove(&mut self, index: usize) -> Result<DurationSecs, PresetError> {
        if self.entries.len() == 1 {
            return Err(PresetError::LastEntry);
        }
        if index >= self.entries.len() {
            return Err(PresetError::BadIndex);
        }
        Ok(self.entries.remove(index))
    }
}

impl Default for PresetList {
    fn default() -> Self {
        Self::default_pair()
    }
}
