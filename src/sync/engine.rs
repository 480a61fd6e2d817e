//! The synchronization walk

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::decoration::Marker;
use crate::host::{HostTree, NodeId, NodeKind};
use crate::store::FavoriteStore;

use super::{WalkStats, DEFERRED_RETRY_MS};

/// A walk scheduled for later, either a lazy-population re-check or a
/// strategy-requested pass (initial layout, create event, sidebar open).
#[derive(Debug, Clone, Copy)]
struct DeferredWalk {
    container: NodeId,
    due: Instant,
}

/// Walks the host tree and keeps markers consistent with the store.
///
/// Pending one-shot expand listeners and deferred walks live in explicit
/// registries so deactivation can cancel every outstanding one
/// deterministically.
#[derive(Default)]
pub struct TreeSynchronizer {
    pending_expand: HashSet<NodeId>,
    deferred: Vec<DeferredWalk>,
    // Containers that already consumed their single lazy-population retry.
    retry_spent: HashSet<NodeId>,
}

impl TreeSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recursive walk over `container`'s subtree.
    ///
    /// Item children get a marker unless one is already present (idempotent
    /// attach). Expanded containers are walked immediately; an expanded
    /// container with no children yet is assumed to be mid-population and
    /// gets one deferred re-check. Collapsed containers are registered for a
    /// one-shot walk on their first expansion instead of being scanned.
    pub fn sync(
        &mut self,
        tree: &mut dyn HostTree,
        store: &FavoriteStore,
        container: NodeId,
    ) -> WalkStats {
        let mut stats = WalkStats::default();

        for child in tree.children(container) {
            match tree.kind(child) {
                Some(NodeKind::Item) => {
                    if tree.marker(child).is_some() {
                        // Already decorated by an earlier pass.
                        continue;
                    }
                    let Some(path) = tree.path(child) else {
                        continue;
                    };
                    let marker = Marker::render(store.is_favorite(&path), store.style());
                    tree.attach_marker(child, marker);
                    tree.set_tagged(child, true);
                    stats.attached += 1;
                }
                Some(NodeKind::Container) => {
                    if tree.is_collapsed(child) {
                        self.pending_expand.insert(child);
                        stats.pending += 1;
                    } else if tree.children(child).is_empty() {
                        if self.schedule_retry(child) {
                            stats.deferred += 1;
                        }
                    } else {
                        stats.absorb(self.sync(tree, store, child));
                    }
                }
                None => {}
            }
        }

        trace!(?stats, "walk finished");
        stats
    }

    /// One-shot expand listener.
    ///
    /// Only fires for containers registered by an earlier walk; the
    /// registration is consumed, so repeated expand/collapse cycles trigger
    /// exactly one subtree walk.
    pub fn handle_expand(
        &mut self,
        tree: &mut dyn HostTree,
        store: &FavoriteStore,
        container: NodeId,
    ) -> Option<WalkStats> {
        if !self.pending_expand.remove(&container) {
            return None;
        }
        debug!(?container, "expand listener fired");
        Some(self.sync(tree, store, container))
    }

    /// Toggle the clicked row and restyle that single marker in place.
    ///
    /// Returns the new favorite status, or `None` when the node has no
    /// resolvable path (stale click, host already dropped the node). Never
    /// triggers a full re-walk.
    pub fn handle_marker_click(
        &mut self,
        tree: &mut dyn HostTree,
        store: &mut FavoriteStore,
        node: NodeId,
    ) -> Option<bool> {
        let path = tree.path(node)?;
        let status = store.toggle(&path);
        if let Some(marker) = tree.marker_mut(node) {
            marker.update_in_place(status, store.style());
        }
        Some(status)
    }

    /// Schedule a walk of `container` after `delay`.
    ///
    /// Used by strategies for the post-layout initial pass, create events,
    /// and sidebar opening.
    pub fn schedule_walk(&mut self, container: NodeId, delay: Duration) {
        self.deferred.push(DeferredWalk {
            container,
            due: Instant::now() + delay,
        });
    }

    /// One lazy-population retry per container; a second empty sighting is a
    /// documented missed window, not an endless retry loop.
    fn schedule_retry(&mut self, container: NodeId) -> bool {
        if !self.retry_spent.insert(container) {
            return false;
        }
        debug!(?container, "empty container, scheduling deferred re-check");
        self.schedule_walk(container, Duration::from_millis(DEFERRED_RETRY_MS));
        true
    }

    /// Run every deferred walk that has come due. Each entry fires at most
    /// once; returns how many fired.
    pub fn run_deferred(
        &mut self,
        tree: &mut dyn HostTree,
        store: &FavoriteStore,
        now: Instant,
    ) -> usize {
        let due: Vec<NodeId> = self
            .deferred
            .iter()
            .filter(|d| d.due <= now)
            .map(|d| d.container)
            .collect();
        self.deferred.retain(|d| d.due > now);

        for container in &due {
            self.sync(tree, store, *container);
        }
        due.len()
    }

    /// Full teardown: strip every marker and row tag from the tree and
    /// cancel all outstanding listeners and deferred walks.
    ///
    /// Callable independent of store state, so disabling the decoration
    /// layer restores the host tree to its original appearance.
    pub fn remove_all(&mut self, tree: &mut dyn HostTree) {
        if let Some(root) = tree.root() {
            self.strip(tree, root);
        }
        self.pending_expand.clear();
        self.deferred.clear();
        self.retry_spent.clear();
    }

    fn strip(&mut self, tree: &mut dyn HostTree, container: NodeId) {
        for child in tree.children(container) {
            match tree.kind(child) {
                Some(NodeKind::Item) => {
                    tree.detach_marker(child);
                    tree.set_tagged(child, false);
                }
                Some(NodeKind::Container) => {
                    // Collapsed containers can still hold markers from a
                    // pass that ran before they were collapsed.
                    self.strip(tree, child);
                }
                None => {}
            }
        }
    }

    /// `remove_all` followed by a fresh top-level walk; the baseline
    /// response to a style change.
    pub fn resync(&mut self, tree: &mut dyn HostTree, store: &FavoriteStore) -> WalkStats {
        self.remove_all(tree);
        match tree.root() {
            Some(root) => self.sync(tree, store, root),
            None => WalkStats::default(),
        }
    }

    /// Outstanding one-shot expand registrations
    pub fn pending_expand_count(&self) -> usize {
        self.pending_expand.len()
    }

    /// Scheduled deferred walks not yet fired
    pub fn deferred_count(&self) -> usize {
        self.deferred.len()
    }
}
