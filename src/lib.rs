//! Favmark - favorites tracking and tree-decoration synchronization
//!
//! Favmark keeps a user-selected set of favorited paths in sync with visual
//! markers on a host-owned, lazily-rendered explorer tree. The host keeps
//! full ownership of its nodes; favmark only reads structure, attaches
//! markers, and reacts to expansion, clicks, and external create/delete/
//! rename events.

pub mod decoration;
pub mod engine;
pub mod error;
pub mod events;
pub mod host;
pub mod models;
pub mod platform;
pub mod storage;
pub mod store;
pub mod sync;
pub mod watcher;

// Re-exports for convenience
pub use decoration::Marker;
pub use engine::Engine;
pub use error::{FavmarkError, FavmarkResult};
pub use events::MutationEvent;
pub use host::{HostTree, MemTree, NodeId, NodeKind};
pub use models::{PersistedState, StyleConfig, DEFAULT_ICON, KNOWN_ICONS};
pub use platform::{DenseTreeStrategy, Platform, PlatformStrategy, SparseTreeStrategy};
pub use storage::{JsonFileStorage, MemoryStorage, SettingsStorage};
pub use store::FavoriteStore;
pub use sync::{TreeSynchronizer, WalkStats};
pub use watcher::{watch, WatchEvent, WatchOptions};
