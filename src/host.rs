//! Host tree boundary
//!
//! The synchronizer never owns tree nodes; it only reads structure and
//! attaches markers through the `HostTree` trait. Hosts keep full ownership
//! of node lifecycle (creation, deletion, lazy population).
//!
//! `MemTree` is the reference host: an in-memory tree used by the CLI's
//! directory renderer and by the test suite.

use std::collections::HashMap;

use crate::decoration::Marker;

/// Opaque handle to one host tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// Kind of tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf item (a file); carries at most one marker
    Item,
    /// Container (a folder); may be collapsed and lazily populated
    Container,
}

/// Read/decorate access to a host-owned tree.
///
/// Node queries return `Option` because events can reference nodes the host
/// has already dropped; callers treat a miss as a no-op, not an error.
pub trait HostTree {
    /// Root container, if the host has materialized one
    fn root(&self) -> Option<NodeId>;

    /// Immediate children in display order; empty for unknown nodes
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn kind(&self, node: NodeId) -> Option<NodeKind>;

    /// Collapsed state; only meaningful for containers
    fn is_collapsed(&self, node: NodeId) -> bool;

    /// Stable path identifier for the node
    fn path(&self, node: NodeId) -> Option<String>;

    /// Resolve a path back to a live node
    fn node_at(&self, path: &str) -> Option<NodeId>;

    /// Attach a marker to an item node. Hosts keep at most one marker per
    /// node; callers check `marker()` first to keep attachment idempotent.
    fn attach_marker(&mut self, node: NodeId, marker: Marker);

    fn marker(&self, node: NodeId) -> Option<&Marker>;

    fn marker_mut(&mut self, node: NodeId) -> Option<&mut Marker>;

    fn detach_marker(&mut self, node: NodeId);

    /// Row-level decorated tag (the original's row CSS class)
    fn set_tagged(&mut self, node: NodeId, tagged: bool);

    fn is_tagged(&self, node: NodeId) -> bool;
}

struct MemNode {
    path: String,
    kind: NodeKind,
    collapsed: bool,
    children: Vec<NodeId>,
    marker: Option<Marker>,
    tagged: bool,
}

/// In-memory reference host tree
#[derive(Default)]
pub struct MemTree {
    nodes: HashMap<NodeId, MemNode>,
    root: Option<NodeId>,
    next_id: u64,
}

impl MemTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, node: MemNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Create the root container (expanded). Panics if called twice; a host
    /// tree has exactly one root.
    pub fn add_root(&mut self, path: impl Into<String>) -> NodeId {
        assert!(self.root.is_none(), "root already present");
        let id = self.insert(MemNode {
            path: path.into(),
            kind: NodeKind::Container,
            collapsed: false,
            children: Vec::new(),
            marker: None,
            tagged: false,
        });
        self.root = Some(id);
        id
    }

    pub fn add_container(
        &mut self,
        parent: NodeId,
        path: impl Into<String>,
        collapsed: bool,
    ) -> NodeId {
        let id = self.insert(MemNode {
            path: path.into(),
            kind: NodeKind::Container,
            collapsed,
            children: Vec::new(),
            marker: None,
            tagged: false,
        });
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        id
    }

    pub fn add_item(&mut self, parent: NodeId, path: impl Into<String>) -> NodeId {
        let id = self.insert(MemNode {
            path: path.into(),
            kind: NodeKind::Item,
            collapsed: false,
            children: Vec::new(),
            marker: None,
            tagged: false,
        });
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        id
    }

    /// Re-key a node after a host-side rename; markers stay attached
    pub fn set_path(&mut self, node: NodeId, path: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.path = path.into();
        }
    }

    /// Flip a container's collapsed flag (the host's expand/collapse click)
    pub fn set_collapsed(&mut self, node: NodeId, collapsed: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.collapsed = collapsed;
        }
    }

    /// Drop a node and its subtree, the way a host removes deleted items
    pub fn remove_node(&mut self, node: NodeId) {
        let children = self
            .nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.remove_node(child);
        }
        self.nodes.remove(&node);
        for parent in self.nodes.values_mut() {
            parent.children.retain(|c| *c != node);
        }
        if self.root == Some(node) {
            self.root = None;
        }
    }

    /// Count markers anywhere in the tree (test/diagnostic helper)
    pub fn marker_count(&self) -> usize {
        self.nodes.values().filter(|n| n.marker.is_some()).count()
    }
}

impl HostTree for MemTree {
    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(&node).map(|n| n.kind)
    }

    fn is_collapsed(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.collapsed)
    }

    fn path(&self, node: NodeId) -> Option<String> {
        self.nodes.get(&node).map(|n| n.path.clone())
    }

    fn node_at(&self, path: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.path == path)
            .map(|(id, _)| *id)
    }

    fn attach_marker(&mut self, node: NodeId, marker: Marker) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.marker = Some(marker);
        }
    }

    fn marker(&self, node: NodeId) -> Option<&Marker> {
        self.nodes.get(&node).and_then(|n| n.marker.as_ref())
    }

    fn marker_mut(&mut self, node: NodeId) -> Option<&mut Marker> {
        self.nodes.get_mut(&node).and_then(|n| n.marker.as_mut())
    }

    fn detach_marker(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.marker = None;
        }
    }

    fn set_tagged(&mut self, node: NodeId, tagged: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.tagged = tagged;
        }
    }

    fn is_tagged(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|n| n.tagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_tree_builds_structure() {
        let mut tree = MemTree::new();
        let root = tree.add_root("");
        let folder = tree.add_container(root, "notes", true);
        tree.add_item(root, "a.md");
        tree.add_item(folder, "notes/b.md");

        assert_eq!(tree.children(root).len(), 2);
        assert!(tree.is_collapsed(folder));
        assert_eq!(tree.kind(folder), Some(NodeKind::Container));
        assert_eq!(tree.node_at("notes/b.md"), Some(tree.children(folder)[0]));
    }

    #[test]
    fn remove_node_drops_subtree_and_parent_link() {
        let mut tree = MemTree::new();
        let root = tree.add_root("");
        let folder = tree.add_container(root, "notes", false);
        let item = tree.add_item(folder, "notes/a.md");

        tree.remove_node(folder);

        assert!(tree.children(root).is_empty());
        assert!(tree.path(item).is_none());
        assert!(tree.node_at("notes/a.md").is_none());
    }
}
