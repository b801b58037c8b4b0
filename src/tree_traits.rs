use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::arena::RegistryTree;

/// Conversion of registry hierarchies into `termtree` renderings for
/// terminal display and debugging.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for RegistryTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        if let Some(root_idx) = self.root() {
            let root_name = self
                .node(root_idx)
                .map(|node| node.name().to_string())
                .unwrap_or_default();
            let mut tree = Tree::new(root_name);

            fn build_tree(registry: &RegistryTree, node_idx: Index, parent_tree: &mut Tree<String>) {
                if let Some(node) = registry.node(node_idx) {
                    for &child_idx in node.children() {
                        if let Some(child) = registry.node(child_idx) {
                            let mut child_tree = Tree::new(child.name().to_string());
                            build_tree(registry, child_idx, &mut child_tree);
                            parent_tree.push(child_tree);
                        }
                    }
                }
            }

            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("Empty tree".to_string())
        }
    }
}
