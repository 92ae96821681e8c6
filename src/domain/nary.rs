//! Arena-based general (N-ary) tree with aggregate traversals.

use generational_arena::Arena;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::NodeId;

/// Tree node in the arena; children keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i64,
    pub children: Vec<NodeId>,
}

/// Nested description of a tree, as read from TOML.
///
/// ```toml
/// value = 1
/// [[children]]
/// value = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub value: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn leaf(value: i64) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    pub fn with_children(value: i64, children: Vec<NodeSpec>) -> Self {
        Self { value, children }
    }
}

/// General tree holding an optional root and the arena owning all nodes.
#[derive(Debug, Clone)]
pub struct Tree {
    arena: Arena<TreeNode>,
    root: Option<NodeId>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Builds a tree mirroring `spec`, children in listed order.
    #[instrument(level = "debug", skip(spec))]
    pub fn from_spec(spec: &NodeSpec) -> DomainResult<Self> {
        let mut tree = Self::new();
        let mut stack: Vec<(&NodeSpec, Option<NodeId>)> = vec![(spec, None)];

        while let Some((current, parent)) = stack.pop() {
            let idx = match parent {
                None => tree.set_root(current.value)?,
                Some(parent_idx) => tree.add_child(parent_idx, current.value)?,
            };
            // reversed so the first child is attached first
            for child in current.children.iter().rev() {
                stack.push((child, Some(idx)));
            }
        }
        Ok(tree)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_root(&mut self, value: i64) -> DomainResult<NodeId> {
        if self.root.is_some() {
            return Err(DomainError::RootAlreadySet);
        }
        let idx = self.arena.insert(TreeNode {
            value,
            children: Vec::new(),
        });
        self.root = Some(idx);
        Ok(idx)
    }

    /// Appends a new last child to `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, value: i64) -> DomainResult<NodeId> {
        if !self.arena.contains(parent) {
            return Err(DomainError::NodeNotFound(parent));
        }
        let idx = self.arena.insert(TreeNode {
            value,
            children: Vec::new(),
        });
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(idx);
        }
        Ok(idx)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, idx: NodeId) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn value(&self, idx: NodeId) -> Option<i64> {
        self.node(idx).map(|node| node.value)
    }

    pub fn children(&self, idx: NodeId) -> &[NodeId] {
        self.node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Arena slot lookup; a handle from another tree with the same layout matches.
    pub fn contains(&self, idx: NodeId) -> bool {
        self.arena.contains(idx)
    }

    pub fn find(&self, value: i64) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.value == value)
            .map(|(idx, _)| idx)
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Sum of all node values as `i128`, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn sum_values(&self) -> i128 {
        self.iter().map(|(_, node)| i128::from(node.value)).sum()
    }

    /// Number of nodes with an even value (zero and negative evens included).
    #[instrument(level = "debug", skip(self))]
    pub fn count_evens(&self) -> usize {
        self.iter().filter(|(_, node)| node.value % 2 == 0).count()
    }

    /// Number of nodes whose value is strictly greater than `lower_bound`.
    #[instrument(level = "debug", skip(self))]
    pub fn num_greater(&self, lower_bound: i64) -> usize {
        self.iter()
            .filter(|(_, node)| node.value > lower_bound)
            .count()
    }

    /// Node count on the longest root-to-leaf path, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self.children(idx).iter().map(|&child| (child, depth + 1)));
        }
        max_depth
    }

    /// Values of all leaf nodes in preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> Vec<i64> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.value)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            stack: tree.root.map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
