//! Tree-decoration synchronization
//!
//! Reconciles a partially-expanded, mutation-prone host tree with the
//! favorite set: every visible item row carries exactly one correctly
//! styled marker, collapsed subtrees get decorated on first expansion, and
//! teardown restores the host tree untouched.

mod engine;

pub use engine::TreeSynchronizer;

/// Retry delay for containers whose lazy population had not finished when
/// the walk reached them. One retry only.
pub const DEFERRED_RETRY_MS: u64 = 200;

/// Delay before the first synchronization pass after activation, giving the
/// host time to finish its initial layout.
pub const INITIAL_SYNC_DELAY_MS: u64 = 300;

/// Delay before decorating a freshly created node.
pub const CREATE_DECORATE_DELAY_MS: u64 = 100;

/// Delay before walking the sidebar tree after it opens.
pub const SIDEBAR_OPEN_DELAY_MS: u64 = 50;

/// Outcome of one synchronization walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Markers attached during this walk
    pub attached: usize,
    /// Containers scheduled for a deferred population re-check
    pub deferred: usize,
    /// Collapsed containers now waiting on a one-shot expand
    pub pending: usize,
}

impl WalkStats {
    pub(crate) fn absorb(&mut self, other: WalkStats) {
        self.attached += other.attached;
        self.deferred += other.deferred;
        self.pending += other.pending;
    }
}
