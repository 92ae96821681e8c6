/*
Terminal rendering of both tree kinds via termtree.

Binary nodes with a single child also print the missing side as `#`, the same
sentinel the codec uses, so left and right stay distinguishable.
 */
use std::collections::HashMap;

use termtree::Tree as TermTree;
use tracing::{debug, instrument};

use crate::domain::binary::BinaryTree;
use crate::domain::codec::ABSENT;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::nary::Tree;
use crate::domain::NodeId;

/// Deepest tree `show` renders unless configured otherwise.
pub const DEFAULT_RENDER_DEPTH: usize = 256;

pub trait TreeRender {
    /// Terminal view of the tree, refused for trees deeper than `max_depth`.
    fn to_termtree(&self, max_depth: usize) -> DomainResult<TermTree<String>>;
}

fn check_depth(depth: usize, limit: usize) -> DomainResult<()> {
    if depth > limit {
        debug!(depth, limit, "tree too deep to render");
        return Err(DomainError::RenderDepthExceeded { depth, limit });
    }
    Ok(())
}

impl TreeRender for BinaryTree {
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self, max_depth: usize) -> DomainResult<TermTree<String>> {
        check_depth(self.max_depth(), max_depth)?;

        // children are finished before their parent, so subtrees are built bottom-up
        let mut built: HashMap<NodeId, TermTree<String>> = HashMap::new();
        for (idx, node) in self.iter_postorder() {
            let mut out = TermTree::new(node.value.to_string());
            if !node.is_leaf() {
                for child in [node.left, node.right] {
                    out.push(
                        child
                            .and_then(|c| built.remove(&c))
                            .unwrap_or_else(|| TermTree::new(ABSENT.to_string())),
                    );
                }
            }
            built.insert(idx, out);
        }

        Ok(self
            .root()
            .and_then(|root| built.remove(&root))
            .unwrap_or_else(|| TermTree::new("Empty tree".to_string())))
    }
}

impl TreeRender for Tree {
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self, max_depth: usize) -> DomainResult<TermTree<String>> {
        check_depth(self.depth(), max_depth)?;

        let mut built: HashMap<NodeId, TermTree<String>> = HashMap::new();
        for (idx, node) in self.iter_postorder() {
            let mut out = TermTree::new(node.value.to_string());
            out.extend(node.children.iter().filter_map(|child| built.remove(child)));
            built.insert(idx, out);
        }

        Ok(self
            .root()
            .and_then(|root| built.remove(&root))
            .unwrap_or_else(|| TermTree::new("Empty tree".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nary::NodeSpec;

    fn render(tree: &impl TreeRender) -> String {
        tree.to_termtree(DEFAULT_RENDER_DEPTH).unwrap().to_string()
    }

    #[test]
    fn test_binary_render_marks_missing_side() {
        let tree = BinaryTree::deserialize("1,#,2,#,#").unwrap();
        let rendered = render(&tree);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1");
        assert!(lines[1].ends_with('#'));
        assert!(lines[2].ends_with('2'));
    }

    #[test]
    fn test_nary_render_lists_children_in_order() {
        let tree = Tree::from_spec(&NodeSpec::with_children(
            1,
            vec![NodeSpec::leaf(2), NodeSpec::leaf(3)],
        ))
        .unwrap();
        let rendered = render(&tree);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "1");
        assert!(lines[1].ends_with('2'));
        assert!(lines[2].ends_with('3'));
    }

    #[test]
    fn test_empty_trees_render_placeholder() {
        assert_eq!(render(&BinaryTree::new()).trim(), "Empty tree");
        assert_eq!(render(&Tree::new()).trim(), "Empty tree");
    }

    #[test]
    fn test_binary_render_keeps_preorder_lines() {
        let tree = BinaryTree::deserialize("1,2,4,#,#,#,3,#,5,#,#").unwrap();
        let values: Vec<String> = render(&tree)
            .lines()
            .map(|line| line.trim_start_matches(|c: char| !c.is_ascii_alphanumeric() && c != '#'))
            .map(str::to_string)
            .collect();
        assert_eq!(values, vec!["1", "2", "4", "#", "3", "#", "5"]);
    }

    #[test]
    fn test_spine_at_depth_limit_renders_every_level() {
        let depth = DEFAULT_RENDER_DEPTH;
        let encoded = format!("{}#", "1,#,".repeat(depth));
        let tree = BinaryTree::deserialize(&encoded).unwrap();
        let rendered = render(&tree);
        // each node below the root adds a `#` line and a value line
        assert_eq!(rendered.lines().count(), 2 * depth - 1);
    }

    #[test]
    fn test_degenerate_tree_beyond_limit_is_refused() {
        let encoded = format!("{}#", "1,#,".repeat(200_000));
        let tree = BinaryTree::deserialize(&encoded).unwrap();
        assert_eq!(
            tree.to_termtree(DEFAULT_RENDER_DEPTH).unwrap_err(),
            DomainError::RenderDepthExceeded {
                depth: 200_000,
                limit: DEFAULT_RENDER_DEPTH
            }
        );
    }

    #[test]
    fn test_deep_nary_chain_beyond_limit_is_refused() {
        let mut tree = Tree::new();
        let mut current = tree.set_root(0).unwrap();
        for value in 1..100_000 {
            current = tree.add_child(current, value).unwrap();
        }
        assert!(matches!(
            tree.to_termtree(DEFAULT_RENDER_DEPTH),
            Err(DomainError::RenderDepthExceeded { depth: 100_000, .. })
        ));
    }
}
