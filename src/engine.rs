//! Engine facade
//!
//! Ties the favorite store to the platform strategy behind one lifecycle.
//! Hosts construct an `Engine` at startup, `activate` it once their layout
//! is ready, forward tree and mutation events, and `deactivate` on
//! shutdown. Store state lives inside the engine, never in a global.

use std::time::Instant;

use crate::decoration::Marker;
use crate::events::MutationEvent;
use crate::host::{HostTree, NodeId};
use crate::models::StyleConfig;
use crate::platform::{strategy_for, Platform, PlatformStrategy};
use crate::storage::SettingsStorage;
use crate::store::FavoriteStore;
use crate::sync::WalkStats;

pub struct Engine {
    store: FavoriteStore,
    strategy: Box<dyn PlatformStrategy>,
}

impl Engine {
    /// Load persisted state and select the strategy for `platform`.
    ///
    /// Never fails: malformed or missing storage falls back to defaults.
    pub fn new(platform: Platform, storage: Box<dyn SettingsStorage>) -> Self {
        Self {
            store: FavoriteStore::load(storage),
            strategy: strategy_for(platform),
        }
    }

    pub fn store(&self) -> &FavoriteStore {
        &self.store
    }

    pub fn is_active(&self) -> bool {
        self.strategy.is_active()
    }

    /// Wire up and schedule the first synchronization pass
    pub fn activate(&mut self, tree: &mut dyn HostTree) {
        self.strategy.activate(tree, &self.store);
    }

    /// Tear down every listener and marker; always total
    pub fn deactivate(&mut self, tree: &mut dyn HostTree) {
        self.strategy.deactivate(tree);
    }

    pub fn resync(&mut self, tree: &mut dyn HostTree) -> WalkStats {
        self.strategy.resync(tree, &self.store)
    }

    pub fn handle_event(&mut self, tree: &mut dyn HostTree, event: &MutationEvent) {
        self.strategy.handle_event(tree, &mut self.store, event);
    }

    pub fn handle_expand(&mut self, tree: &mut dyn HostTree, container: NodeId) {
        self.strategy.handle_expand(tree, &self.store, container);
    }

    pub fn handle_marker_click(
        &mut self,
        tree: &mut dyn HostTree,
        node: NodeId,
    ) -> Option<bool> {
        self.strategy.handle_marker_click(tree, &mut self.store, node)
    }

    /// Pump deferred walks; hosts call this from their timer/idle hook
    pub fn run_deferred(&mut self, tree: &mut dyn HostTree, now: Instant) -> usize {
        self.strategy.run_deferred(tree, &self.store, now)
    }

    pub fn set_active_item(&mut self, tree: &mut dyn HostTree, path: Option<String>) {
        self.strategy.set_active_item(tree, &self.store, path);
    }

    pub fn handle_sidebar_toggle(&mut self, tree: &mut dyn HostTree, open: bool) {
        self.strategy.handle_sidebar_toggle(tree, open);
    }

    pub fn toggle_active(&mut self, tree: &mut dyn HostTree) -> Option<bool> {
        self.strategy.toggle_active(tree, &mut self.store)
    }

    pub fn header_marker(&self) -> Option<&Marker> {
        self.strategy.header_marker()
    }

    /// Manual toggle without a tree in hand (settings UI, CLI). Visible
    /// markers catch up on the next resync.
    pub fn toggle(&mut self, path: &str) -> bool {
        self.store.toggle(path)
    }

    pub fn remove(&mut self, path: &str) {
        self.store.remove(path)
    }

    /// Persist a new style and re-decorate everything currently visible
    pub fn set_style(&mut self, tree: &mut dyn HostTree, style: StyleConfig) -> WalkStats {
        self.store.set_style(style);
        self.strategy.resync(tree, &self.store)
    }
}
