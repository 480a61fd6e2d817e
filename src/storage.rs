//! Persistence backends for the favorites document
//!
//! The store talks to storage through the `SettingsStorage` trait so hosts
//! can supply their own backend. Two implementations ship with the crate:
//! `JsonFileStorage` (a JSON file written atomically) and `MemoryStorage`
//! (for hosts without durable storage, and for tests).

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{FavmarkError, FavmarkResult};
use crate::models::PersistedState;

/// Abstract settings storage interface
///
/// `load_data` returning `Ok(None)` means "nothing persisted yet" and is not
/// an error. Malformed content surfaces as `StorageRead` so the caller can
/// fall back to defaults; write failures surface as `StorageWrite`.
pub trait SettingsStorage {
    /// Read the persisted document, if any
    fn load_data(&self) -> FavmarkResult<Option<PersistedState>>;

    /// Overwrite the persisted document (last writer wins)
    fn save_data(&self, state: &PersistedState) -> FavmarkResult<()>;
}

/// JSON file storage with atomic writes
///
/// Uses the tempfile + rename pattern so a crashed write never leaves a
/// truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, content: &[u8]) -> std::io::Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(content)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SettingsStorage for JsonFileStorage {
    fn load_data(&self) -> FavmarkResult<Option<PersistedState>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FavmarkError::StorageRead {
                    message: e.to_string(),
                })
            }
        };

        let state =
            serde_json::from_str(&content).map_err(|e| FavmarkError::StorageRead {
                message: format!("{}: {}", self.path.display(), e),
            })?;

        Ok(Some(state))
    }

    fn save_data(&self, state: &PersistedState) -> FavmarkResult<()> {
        let json = serde_json::to_string_pretty(state).map_err(|e| {
            FavmarkError::StorageWrite {
                path: self.path.clone(),
                source: std::io::Error::other(e.to_string()),
            }
        })?;

        self.write_atomic(json.as_bytes())
            .map_err(|e| FavmarkError::StorageWrite {
                path: self.path.clone(),
                source: e,
            })
    }
}

/// In-memory storage
///
/// Clones share the same backing document, which lets tests hand one copy to
/// the store and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<Option<PersistedState>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the last saved document
    pub fn snapshot(&self) -> Option<PersistedState> {
        self.state.lock().unwrap().clone()
    }
}

impl SettingsStorage for MemoryStorage {
    fn load_data(&self) -> FavmarkResult<Option<PersistedState>> {
        Ok(self.state.lock().unwrap().clone())
    }

    fn save_data(&self, state: &PersistedState) -> FavmarkResult<()> {
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StyleConfig;
    use tempfile::tempdir;

    #[test]
    fn json_storage_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("favorites.json"));
        assert!(storage.load_data().unwrap().is_none());
    }

    #[test]
    fn json_storage_round_trip() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("favorites.json"));

        let state = PersistedState {
            style: StyleConfig {
                icon: "heart".to_string(),
                filled: true,
            },
            favorites: vec!["a.md".to_string(), "b.md".to_string()],
            extra: Default::default(),
        };
        storage.save_data(&state).unwrap();

        let loaded = storage.load_data().unwrap().unwrap();
        assert_eq!(loaded.style, state.style);
        assert_eq!(loaded.favorites, state.favorites);
    }

    #[test]
    fn json_storage_malformed_content_is_storage_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = JsonFileStorage::new(path.clone());
        let err = storage.load_data().unwrap_err();
        assert!(matches!(err, FavmarkError::StorageRead { .. }));
    }

    #[test]
    fn json_storage_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/dir/favorites.json"));
        storage.save_data(&PersistedState::default()).unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn memory_storage_shares_state_across_clones() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        let mut state = PersistedState::default();
        state.favorites.push("x.md".to_string());
        storage.save_data(&state).unwrap();

        assert_eq!(handle.snapshot().unwrap().favorites, vec!["x.md"]);
    }
}
