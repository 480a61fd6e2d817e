//! Dense-tree variant: fully materialized host tree, inline marker per row

use std::time::{Duration, Instant};

use tracing::debug;

use crate::events::MutationEvent;
use crate::host::{HostTree, NodeId};
use crate::store::FavoriteStore;
use crate::sync::{
    TreeSynchronizer, WalkStats, CREATE_DECORATE_DELAY_MS, INITIAL_SYNC_DELAY_MS,
};

use super::{decorate_created, refresh_inline_marker, PendingCreate, PlatformStrategy};

/// Strategy for hosts that render the whole tree up front.
///
/// Collapsed subtrees exist in the host but stay unscanned until their
/// one-shot expand fires; everything else gets an inline marker on the
/// initial pass.
pub struct DenseTreeStrategy {
    sync: TreeSynchronizer,
    pending_creates: Vec<PendingCreate>,
    active: bool,
}

impl DenseTreeStrategy {
    pub fn new() -> Self {
        Self {
            sync: TreeSynchronizer::new(),
            pending_creates: Vec::new(),
            active: false,
        }
    }
}

impl Default for DenseTreeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformStrategy for DenseTreeStrategy {
    fn activate(&mut self, tree: &mut dyn HostTree, _store: &FavoriteStore) {
        self.active = true;
        if let Some(root) = tree.root() {
            // First pass runs once the host's initial layout settles.
            self.sync
                .schedule_walk(root, Duration::from_millis(INITIAL_SYNC_DELAY_MS));
        }
        debug!("dense strategy activated");
    }

    fn deactivate(&mut self, tree: &mut dyn HostTree) {
        self.active = false;
        self.pending_creates.clear();
        self.sync.remove_all(tree);
        debug!("dense strategy deactivated");
    }

    fn resync(&mut self, tree: &mut dyn HostTree, store: &FavoriteStore) -> WalkStats {
        if !self.active {
            return WalkStats::default();
        }
        self.sync.resync(tree, store)
    }

    fn handle_event(
        &mut self,
        tree: &mut dyn HostTree,
        store: &mut FavoriteStore,
        event: &MutationEvent,
    ) {
        if !self.active {
            return;
        }
        match event {
            MutationEvent::Create(path) => {
                // The host materializes the new row asynchronously; decorate
                // it after its settle delay.
                self.pending_creates.push(PendingCreate {
                    path: path.clone(),
                    due: Instant::now() + Duration::from_millis(CREATE_DECORATE_DELAY_MS),
                });
            }
            MutationEvent::Delete(path) => {
                // The host removes the node (and its marker) itself.
                store.remove(path);
            }
            MutationEvent::Rename { from, to } => {
                store.rename(from, to);
                refresh_inline_marker(tree, store, to);
            }
        }
    }

    fn handle_expand(
        &mut self,
        tree: &mut dyn HostTree,
        store: &FavoriteStore,
        container: NodeId,
    ) {
        if self.active {
            self.sync.handle_expand(tree, store, container);
        }
    }

    fn handle_marker_click(
        &mut self,
        tree: &mut dyn HostTree,
        store: &mut FavoriteStore,
        node: NodeId,
    ) -> Option<bool> {
        if !self.active {
            return None;
        }
        self.sync.handle_marker_click(tree, store, node)
    }

    fn run_deferred(
        &mut self,
        tree: &mut dyn HostTree,
        store: &FavoriteStore,
        now: Instant,
    ) -> usize {
        let mut fired = self.sync.run_deferred(tree, store, now);

        let due: Vec<PendingCreate> = self
            .pending_creates
            .iter()
            .filter(|p| p.due <= now)
            .cloned()
            .collect();
        self.pending_creates.retain(|p| p.due > now);
        for pending in due {
            decorate_created(tree, store, &pending.path);
            fired += 1;
        }

        fired
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
