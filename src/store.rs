//! Favorite set state and write-through persistence
//!
//! `FavoriteStore` owns the set of favorited path identifiers plus the
//! marker style, and flushes both to storage after every mutation. Storage
//! failures are logged and never propagate into callers: the in-memory set
//! stays authoritative for the rest of the session.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::{PersistedState, StyleConfig};
use crate::storage::SettingsStorage;

/// Owner of the favorite set and style config.
///
/// Bound to the engine's activate/deactivate lifecycle; never a
/// free-standing global.
pub struct FavoriteStore {
    favorites: HashSet<String>,
    style: StyleConfig,
    // Unknown fields from the persisted document, re-merged on every save.
    extra: Map<String, Value>,
    storage: Box<dyn SettingsStorage>,
}

impl FavoriteStore {
    /// Load state from storage, falling back to defaults.
    ///
    /// Missing storage yields an empty set; malformed storage is logged and
    /// also yields an empty set. This constructor never fails.
    pub fn load(storage: Box<dyn SettingsStorage>) -> Self {
        let state = match storage.load_data() {
            Ok(Some(state)) => state,
            Ok(None) => PersistedState::default(),
            Err(e) => {
                warn!("falling back to default favorites: {e}");
                PersistedState::default()
            }
        };

        let favorites: HashSet<String> = state.favorites.into_iter().collect();
        debug!(count = favorites.len(), "loaded favorites");

        Self {
            favorites,
            style: state.style,
            extra: state.extra,
            storage,
        }
    }

    /// O(1) membership test
    pub fn is_favorite(&self, path: &str) -> bool {
        self.favorites.contains(path)
    }

    /// Flip membership for `path` and persist; returns the new status.
    ///
    /// Calling twice restores both the in-memory and the persisted state.
    pub fn toggle(&mut self, path: &str) -> bool {
        let now_favorite = if self.favorites.remove(path) {
            false
        } else {
            self.favorites.insert(path.to_string());
            true
        };

        self.save();
        now_favorite
    }

    /// Remove `path` if present.
    ///
    /// A miss performs no persistence write, so unrelated deletions stay
    /// cheap.
    pub fn remove(&mut self, path: &str) {
        if self.favorites.remove(path) {
            self.save();
        }
    }

    /// Re-key a favorited path after the underlying item was renamed.
    ///
    /// No-op (and no write) when `from` was not a favorite.
    pub fn rename(&mut self, from: &str, to: &str) {
        if self.favorites.remove(from) {
            self.favorites.insert(to.to_string());
            self.save();
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replace the marker style and persist
    pub fn set_style(&mut self, style: StyleConfig) {
        self.style = style;
        self.save();
    }

    /// Favorited paths in sorted order (for display and stable output)
    pub fn favorites_sorted(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.favorites.iter().cloned().collect();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Write-through save of the whole document.
    ///
    /// Failures are logged, not returned: decoration and toggle paths must
    /// keep working against the in-memory set.
    pub fn save(&self) {
        let state = PersistedState {
            style: self.style.clone(),
            favorites: self.favorites_sorted(),
            extra: self.extra.clone(),
        };

        if let Err(e) = self.storage.save_data(&state) {
            warn!("favorites not persisted: {e}");
        }
    }
}
