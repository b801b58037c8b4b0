//! Core node types for the registry tree

use std::fmt;

use generational_arena::Index;

use crate::errors::{TreeError, TreeResult};
use crate::property::Property;

/// Per-node match state written by an external search pass.
///
/// The tree itself never computes these; it only stores what the pass
/// records and clears them wholesale via
/// [`RegistryTree::clear_search_annotations`](crate::RegistryTree::clear_search_annotations).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchAnnotations {
    /// Number of matches found in this node's subtree
    pub search_count: usize,
    /// Positions into the node's own property list that matched
    pub matching_properties: Vec<usize>,
    /// Direct children whose subtree contains a match
    pub matched_children: Vec<Index>,
}

impl SearchAnnotations {
    /// Reset to the freshly-constructed state.
    pub fn clear(&mut self) {
        self.search_count = 0;
        self.matching_properties.clear();
        self.matched_children.clear();
    }

    /// True when no search pass has recorded anything on this node.
    pub fn is_empty(&self) -> bool {
        self.search_count == 0
            && self.matching_properties.is_empty()
            && self.matched_children.is_empty()
    }
}

/// A single registry entry in the tree.
///
/// Structural fields (parent link, child list) are only mutated through
/// [`RegistryTree`](crate::RegistryTree), so the parent/children invariants
/// cannot be broken from outside the crate. Readers get slices and copies.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    /// Entry name, not guaranteed unique within the tree
    name: String,
    /// Registry properties in their original order
    properties: Vec<Property>,
    /// Index of the parent node, None for a detached or root node
    pub(crate) parent: Option<Index>,
    /// Indices of child nodes in insertion order
    pub(crate) children: Vec<Index>,
    /// Transient search-annotation state
    pub(crate) search: SearchAnnotations,
}

impl NodeInfo {
    /// Create a detached node with no children and cleared annotations.
    ///
    /// Attachment is a separate step, see
    /// [`RegistryTree::add_child`](crate::RegistryTree::add_child).
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> TreeResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TreeError::EmptyNodeName);
        }
        Ok(Self {
            name,
            properties,
            parent: None,
            children: Vec::new(),
            search: SearchAnnotations::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    /// Children in insertion order, read-only.
    pub fn children(&self) -> &[Index] {
        &self.children
    }

    pub fn search(&self) -> &SearchAnnotations {
        &self.search
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
