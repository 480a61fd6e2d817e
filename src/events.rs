//! External mutation events on tracked paths
//!
//! Hosts (or the filesystem watcher) translate their native notifications
//! into `MutationEvent`s and feed them through the active strategy. Create,
//! delete, and rename are handled uniformly by both platform variants.

/// A structural change to the host's item space
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEvent {
    /// A new item appeared at `path`
    Create(String),
    /// The item at `path` is gone
    Delete(String),
    /// The item moved from one path to another
    Rename { from: String, to: String },
}

impl MutationEvent {
    /// Short tag for log and NDJSON output
    pub fn kind(&self) -> &'static str {
        match self {
            MutationEvent::Create(_) => "create",
            MutationEvent::Delete(_) => "delete",
            MutationEvent::Rename { .. } => "rename",
        }
    }
}
