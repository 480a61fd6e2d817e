//! Sparse-tree variant: virtualized host, header control for the active item
//!
//! Only the currently active branch materializes nodes, so inline markers
//! cover whatever rows happen to exist while a header-level control tracks
//! the single active item. The header control is decoupled from node
//! lifecycle: deletes and renames must refresh it explicitly.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::decoration::Marker;
use crate::events::MutationEvent;
use crate::host::{HostTree, NodeId};
use crate::store::FavoriteStore;
use crate::sync::{
    TreeSynchronizer, WalkStats, CREATE_DECORATE_DELAY_MS, INITIAL_SYNC_DELAY_MS,
    SIDEBAR_OPEN_DELAY_MS,
};

use super::{decorate_created, refresh_inline_marker, PendingCreate, PlatformStrategy};

pub struct SparseTreeStrategy {
    sync: TreeSynchronizer,
    pending_creates: Vec<PendingCreate>,
    active: bool,
    /// Path of the host's active item, as last reported
    active_path: Option<String>,
    /// Header-level control state; `None` until an active item exists
    header: Option<Marker>,
}

impl SparseTreeStrategy {
    pub fn new() -> Self {
        Self {
            sync: TreeSynchronizer::new(),
            pending_creates: Vec::new(),
            active: false,
            active_path: None,
            header: None,
        }
    }

    fn refresh_header(&mut self, store: &FavoriteStore) {
        match &self.active_path {
            Some(path) => {
                let favorited = store.is_favorite(path);
                match &mut self.header {
                    Some(marker) => marker.update_in_place(favorited, store.style()),
                    None => self.header = Some(Marker::render(favorited, store.style())),
                }
            }
            None => self.header = None,
        }
    }
}

impl Default for SparseTreeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformStrategy for SparseTreeStrategy {
    fn activate(&mut self, tree: &mut dyn HostTree, store: &FavoriteStore) {
        self.active = true;
        self.refresh_header(store);
        if let Some(root) = tree.root() {
            self.sync
                .schedule_walk(root, Duration::from_millis(INITIAL_SYNC_DELAY_MS));
        }
        debug!("sparse strategy activated");
    }

    fn deactivate(&mut self, tree: &mut dyn HostTree) {
        self.active = false;
        self.header = None;
        self.pending_creates.clear();
        self.sync.remove_all(tree);
        debug!("sparse strategy deactivated");
    }

    fn resync(&mut self, tree: &mut dyn HostTree, store: &FavoriteStore) -> WalkStats {
        if !self.active {
            return WalkStats::default();
        }
        self.refresh_header(store);
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
                self.pending_creates.push(PendingCreate {
                    path: path.clone(),
                    due: Instant::now() + Duration::from_millis(CREATE_DECORATE_DELAY_MS),
                });
            }
            MutationEvent::Delete(path) => {
                store.remove(path);
                // Header state survives the node; refresh it by hand.
                self.refresh_header(store);
            }
            MutationEvent::Rename { from, to } => {
                store.rename(from, to);
                if self.active_path.as_deref() == Some(from.as_str()) {
                    self.active_path = Some(to.clone());
                }
                self.refresh_header(store);
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
        let status = self.sync.handle_marker_click(tree, store, node);
        // The clicked row might be the active item; keep the header honest.
        self.refresh_header(store);
        status
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
            // Sparse hosts may never materialize the row; that's fine.
            decorate_created(tree, store, &pending.path);
            fired += 1;
        }

        fired
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active_item(
        &mut self,
        _tree: &mut dyn HostTree,
        store: &FavoriteStore,
        path: Option<String>,
    ) {
        if !self.active {
            return;
        }
        self.active_path = path;
        self.refresh_header(store);
    }

    fn handle_sidebar_toggle(&mut self, tree: &mut dyn HostTree, open: bool) {
        if !self.active || !open {
            return;
        }
        if let Some(root) = tree.root() {
            self.sync
                .schedule_walk(root, Duration::from_millis(SIDEBAR_OPEN_DELAY_MS));
        }
    }

    fn toggle_active(
        &mut self,
        tree: &mut dyn HostTree,
        store: &mut FavoriteStore,
    ) -> Option<bool> {
        if !self.active {
            return None;
        }
        let path = self.active_path.clone()?;
        let status = store.toggle(&path);
        self.refresh_header(store);
        refresh_inline_marker(tree, store, &path);
        Some(status)
    }

    fn header_marker(&self) -> Option<&Marker> {
        self.header.as_ref()
    }
}
