//! Platform strategy variants
//!
//! The synchronization state machine is the same on every platform
//! (Inactive → Active → Inactive); what differs is how the host exposes the
//! tree and where the toggle control lives. `DenseTreeStrategy` assumes a
//! fully materialized tree with an inline marker per row;
//! `SparseTreeStrategy` works against a virtualized tree where only the
//! active branch exists and a header-level control covers the active item.

mod dense;
mod sparse;

use std::time::Instant;

use crate::decoration::Marker;
use crate::events::MutationEvent;
use crate::host::{HostTree, NodeId, NodeKind};
use crate::store::FavoriteStore;
use crate::sync::WalkStats;

pub use dense::DenseTreeStrategy;
pub use sparse::SparseTreeStrategy;

/// Host rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Whole tree present in the host, collapsed subtrees merely hidden
    #[default]
    Dense,
    /// Only the active branch materializes nodes
    Sparse,
}

/// Uniform lifecycle for both variants.
///
/// Sparse-only hooks (`set_active_item`, `handle_sidebar_toggle`,
/// `toggle_active`, `header_marker`) default to no-ops so callers can drive
/// any variant through the same object.
pub trait PlatformStrategy {
    /// Wire listeners and schedule the first synchronization pass.
    ///
    /// The pass itself runs from the deferred queue once the host's initial
    /// layout has settled.
    fn activate(&mut self, tree: &mut dyn HostTree, store: &FavoriteStore);

    /// Tear down: cancel every outstanding listener and deferred walk,
    /// strip all markers. Best-effort and total; never fails.
    fn deactivate(&mut self, tree: &mut dyn HostTree);

    /// Full re-decoration, used after style changes
    fn resync(&mut self, tree: &mut dyn HostTree, store: &FavoriteStore) -> WalkStats;

    /// React to an external create/delete/rename
    fn handle_event(
        &mut self,
        tree: &mut dyn HostTree,
        store: &mut FavoriteStore,
        event: &MutationEvent,
    );

    /// Host notification that a container was expanded
    fn handle_expand(
        &mut self,
        tree: &mut dyn HostTree,
        store: &FavoriteStore,
        container: NodeId,
    );

    /// Click on an inline row marker
    fn handle_marker_click(
        &mut self,
        tree: &mut dyn HostTree,
        store: &mut FavoriteStore,
        node: NodeId,
    ) -> Option<bool>;

    /// Pump the deferred queue; returns how many deferred actions fired
    fn run_deferred(
        &mut self,
        tree: &mut dyn HostTree,
        store: &FavoriteStore,
        now: Instant,
    ) -> usize;

    fn is_active(&self) -> bool;

    /// The host's active item changed (sparse hosts only)
    fn set_active_item(
        &mut self,
        _tree: &mut dyn HostTree,
        _store: &FavoriteStore,
        _path: Option<String>,
    ) {
    }

    /// The sidebar holding the tree opened or closed (sparse hosts only)
    fn handle_sidebar_toggle(&mut self, _tree: &mut dyn HostTree, _open: bool) {}

    /// Click on the header-level control (sparse hosts only)
    fn toggle_active(
        &mut self,
        _tree: &mut dyn HostTree,
        _store: &mut FavoriteStore,
    ) -> Option<bool> {
        None
    }

    /// Current header control state (sparse hosts only)
    fn header_marker(&self) -> Option<&Marker> {
        None
    }
}

/// Build the strategy for a platform
pub fn strategy_for(platform: Platform) -> Box<dyn PlatformStrategy> {
    match platform {
        Platform::Dense => Box::new(DenseTreeStrategy::new()),
        Platform::Sparse => Box::new(SparseTreeStrategy::new()),
    }
}

/// A created path waiting for its deferred decoration pass
#[derive(Debug, Clone)]
pub(crate) struct PendingCreate {
    pub path: String,
    pub due: Instant,
}

/// Decorate one freshly created item, if the host has materialized it.
///
/// Returns false when the node is still absent (sparse hosts may never
/// materialize it) or already carries a marker.
pub(crate) fn decorate_created(
    tree: &mut dyn HostTree,
    store: &FavoriteStore,
    path: &str,
) -> bool {
    let Some(node) = tree.node_at(path) else {
        return false;
    };
    if tree.kind(node) != Some(NodeKind::Item) || tree.marker(node).is_some() {
        return false;
    }
    let marker = crate::decoration::Marker::render(store.is_favorite(path), store.style());
    tree.attach_marker(node, marker);
    tree.set_tagged(node, true);
    true
}

/// Restyle the inline marker for `path` in place, if one is attached
pub(crate) fn refresh_inline_marker(
    tree: &mut dyn HostTree,
    store: &FavoriteStore,
    path: &str,
) {
    if let Some(node) = tree.node_at(path) {
        let favorited = store.is_favorite(path);
        let style = store.style().clone();
        if let Some(marker) = tree.marker_mut(node) {
            marker.update_in_place(favorited, &style);
        }
    }
}
