//! Save/load repositories.
//!
//! The engine never persists anything on its own; a session hands
//! [`GameState`] snapshots to whichever [`SaveRepository`] it was built with.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{SessionError, SessionResult};
use crate::state::{GameState, SaveSummary};

/// Storage for game states keyed by slot name.
pub trait SaveRepository {
    /// Load a slot. `Ok(None)` when the slot is empty.
    fn load(&self, slot: &str) -> SessionResult<Option<GameState>>;

    /// Write a state to a slot, replacing what was there.
    fn save(&mut self, slot: &str, state: &GameState) -> SessionResult<()>;

    /// Remove a slot. Removing an empty slot is not an error.
    fn delete(&mut self, slot: &str) -> SessionResult<()>;

    /// Summaries of every stored slot, ordered by slot name.
    fn list_save_summaries(&self) -> SessionResult<Vec<SaveSummary>>;
}

/// Reject slot names that are empty or not safe as file stems.
pub fn validate_slot(slot: &str) -> SessionResult<()> {
    let valid = !slot.is_empty()
        && slot.len() <= 64
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SessionError::InvalidSlot(slot.to_string()))
    }
}

/// Keeps saves in memory. Used by tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    slots: BTreeMap<String, GameState>,
}

impl MemoryRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot holds a save.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SaveRepository for MemoryRepository {
    fn load(&self, slot: &str) -> SessionResult<Option<GameState>> {
        validate_slot(slot)?;
        Ok(self.slots.get(slot).cloned())
    }

    fn save(&mut self, slot: &str, state: &GameState) -> SessionResult<()> {
        validate_slot(slot)?;
        self.slots.insert(slot.to_string(), state.clone());
        Ok(())
    }

    fn delete(&mut self, slot: &str) -> SessionResult<()> {
        validate_slot(slot)?;
        self.slots.remove(slot);
        Ok(())
    }

    fn list_save_summaries(&self) -> SessionResult<Vec<SaveSummary>> {
        Ok(self
            .slots
            .iter()
            .map(|(slot, state)| {
                let mut summary = state.summary();
                summary.slot_name.clone_from(slot);
                summary
            })
            .collect())
    }
}

/// Stores each slot as pretty-printed JSON at `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// A repository rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the save files live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a slot.
    pub fn path_for(&self, slot: &str) -> SessionResult<PathBuf> {
        validate_slot(slot)?;
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

impl SaveRepository for JsonFileRepository {
    fn load(&self, slot: &str) -> SessionResult<Option<GameState>> {
        let path = self.path_for(slot)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state = serde_json::from_str(&json)?;
        tracing::debug!(slot, path = %path.display(), "save loaded");
        Ok(Some(state))
    }

    fn save(&mut self, slot: &str, state: &GameState) -> SessionResult<()> {
        let path = self.path_for(slot)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(state)?;
        // Write a sibling file, then rename over the target.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(slot, tick = state.tick, path = %path.display(), "game saved");
        Ok(())
    }

    fn delete(&mut self, slot: &str) -> SessionResult<()> {
        let path = self.path_for(slot)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list_save_summaries(&self) -> SessionResult<Vec<SaveSummary>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(slot) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_slot(slot).is_err() {
                continue;
            }
            match self.load(slot) {
                Ok(Some(state)) => {
                    let mut summary = state.summary();
                    summary.slot_name = slot.to_string();
                    summaries.push(summary);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable save");
                }
            }
        }
        summaries.sort_by(|a, b| a.slot_name.cmp(&b.slot_name));
        Ok(summaries)
    }
}
