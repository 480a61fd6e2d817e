//! Error types for favmark
//!
//! Uses `thiserror` for library errors. The taxonomy is deliberately small:
//! storage failures are reported but never fatal, and stale tree references
//! degrade to no-ops at the call site.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for favmark operations
pub type FavmarkResult<T> = Result<T, FavmarkError>;

/// Main error type for favmark operations
#[derive(Error, Debug)]
pub enum FavmarkError {
    /// Persisted state is missing or could not be parsed.
    ///
    /// Callers fall back to defaults; this never crashes the host.
    #[error("failed to read persisted favorites: {message}")]
    StorageRead { message: String },

    /// Persisted state could not be written.
    ///
    /// The in-memory set stays authoritative; callers log and continue.
    #[error("failed to write persisted favorites to {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A path referenced by a stale event no longer resolves to a live node.
    #[error("no live tree node for path '{path}'")]
    TreeNodeMissing { path: String },

    /// Icon name not present in the known icon table.
    #[error("unknown icon '{name}'")]
    InvalidIcon { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
