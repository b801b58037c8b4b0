use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::node::{NodeInfo, SearchAnnotations};
use crate::property::Property;

/// Arena-based registry hierarchy.
///
/// The arena is the sole owner of all nodes; parent links are non-owning
/// indices into it. Structural mutation is limited to [`create_node`]
/// (detached) and [`add_child`] (attach), which keeps every node's parent
/// link consistent with exactly one child list and the structure acyclic.
///
/// Not thread-safe: there is no internal synchronization, callers must
/// serialize access during mutation.
///
/// [`create_node`]: RegistryTree::create_node
/// [`add_child`]: RegistryTree::add_child
#[derive(Debug)]
pub struct RegistryTree {
    /// Arena storage for all tree nodes
    arena: Arena<NodeInfo>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for RegistryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Create a detached node from a name and its registry properties.
    ///
    /// The node starts with no parent, no children and cleared search
    /// annotations; it is not attached anywhere until [`add_child`] is
    /// called with it. The first node created becomes the tree's root.
    ///
    /// Fails with [`TreeError::EmptyNodeName`] if `name` is empty.
    ///
    /// [`add_child`]: RegistryTree::add_child
    #[instrument(level = "trace", skip(self))]
    pub fn create_node(&mut self, name: &str, properties: Vec<Property>) -> TreeResult<Index> {
        let node = NodeInfo::new(name, properties)?;
        let node_idx = self.arena.insert(node);

        if self.root.is_none() {
            self.root = Some(node_idx);
        }

        Ok(node_idx)
    }

    /// Attach `child` to `parent`, appending it to the end of the child list.
    ///
    /// Sets the child's parent back-reference and preserves the existing
    /// child order. Re-parenting is rejected: a node that already has a
    /// parent cannot be attached again (this also covers adding the same
    /// node twice to one parent). Attachments that would make a node its
    /// own ancestor are rejected as well.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: Index, child: Index) -> TreeResult<()> {
        let child_node = self
            .arena
            .get(child)
            .ok_or(TreeError::NodeNotFound(child))?;
        if let Some(existing) = child_node.parent {
            return Err(TreeError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        if !self.arena.contains(parent) {
            return Err(TreeError::NodeNotFound(parent));
        }
        if self.would_cycle(parent, child) {
            return Err(TreeError::WouldCycle { child });
        }

        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }

        Ok(())
    }

    /// True if `child` lies on the parent chain of `parent` (or is `parent`
    /// itself), i.e. attaching it would close a cycle.
    #[instrument(level = "trace", skip(self))]
    fn would_cycle(&self, parent: Index, child: Index) -> bool {
        let mut current = Some(parent);
        while let Some(idx) = current {
            if idx == child {
                return true;
            }
            current = self.arena.get(idx).and_then(|node| node.parent);
        }
        false
    }

    #[instrument(level = "trace", skip(self))]
    pub fn node(&self, idx: Index) -> Option<&NodeInfo> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Number of nodes in the arena, attached or not.
    #[instrument(level = "trace", skip(self))]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Mutable access to a node's search annotations.
    ///
    /// This is the write surface for the external search pass: it can
    /// record match state without gaining access to the structural fields.
    #[instrument(level = "trace", skip(self))]
    pub fn annotations_mut(&mut self, idx: Index) -> Option<&mut SearchAnnotations> {
        self.arena.get_mut(idx).map(|node| &mut node.search)
    }

    /// Reset the search annotations of every node in the arena.
    ///
    /// Run before a new search pass so stale counts and match lists from
    /// the previous pass cannot leak into its results.
    #[instrument(level = "debug", skip(self))]
    pub fn clear_search_annotations(&mut self) {
        for (_, node) in self.arena.iter_mut() {
            node.search.clear();
        }
    }

    /// Resolve a node's recorded matching-property positions to the
    /// properties themselves, in recorded order.
    ///
    /// Positions that do not fall inside the property list are skipped.
    #[instrument(level = "trace", skip(self))]
    pub fn matching_properties(&self, idx: Index) -> Vec<&Property> {
        match self.arena.get(idx) {
            Some(node) => node
                .search()
                .matching_properties
                .iter()
                .filter_map(|&pos| node.properties().get(pos))
                .collect(),
            None => Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.node(node_idx) {
            1 + node
                .children()
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf nodes (nodes with no children) reachable from the
    /// root, in pre-order. Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<Index> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    #[instrument(level = "trace", skip(self))]
    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<Index>) {
        if let Some(node) = self.node(node_idx) {
            if node.is_leaf() {
                leaves.push(node_idx);
            } else {
                for &child in node.children() {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

pub struct TreeIterator<'a> {
    tree: &'a RegistryTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a RegistryTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a NodeInfo);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children().iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a RegistryTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a RegistryTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a NodeInfo);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children().iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
