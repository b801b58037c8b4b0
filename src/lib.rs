//! In-memory device registry tree.
//!
//! `regtree` mirrors a device/registry hierarchy for browsing: each node
//! carries a name, an ordered list of opaque key/value [`Property`] entries,
//! a non-owning parent back-reference and an insertion-ordered child list,
//! plus transient [`SearchAnnotations`] written by an external search pass.
//!
//! Nodes live in a [`RegistryTree`] arena, the single ownership path for the
//! hierarchy. They are created detached with [`RegistryTree::create_node`]
//! and wired up with [`RegistryTree::add_child`]; no other structural
//! mutation exists, which keeps parent links consistent and the structure
//! acyclic. Populating the tree from an actual registry, running a search,
//! and rendering a UI are all jobs of external collaborators.
//!
//! The tree has no internal synchronization and is not thread-safe.

pub mod arena;
pub mod errors;
pub mod node;
pub mod property;
pub mod tree_traits;
pub mod util;

pub use arena::{PostOrderIterator, RegistryTree, TreeIterator};
pub use errors::{TreeError, TreeResult};
pub use node::{NodeInfo, SearchAnnotations};
pub use property::Property;
pub use tree_traits::TreeNodeConvert;
