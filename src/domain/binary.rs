//! Arena-based binary tree.
//!
//! Nodes own their children through arena handles; no parent links are stored,
//! so parentage (cousins, common ancestors) is discovered by traversal.
//! Every traversal runs on an explicit stack or queue, a degenerate tree of any
//! height is safe to walk.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use generational_arena::Arena;
use tracing::{debug, instrument, trace};

use crate::domain::codec;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::NodeId;

/// Which child slot of a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Binary tree node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTreeNode {
    pub value: i64,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl BinaryTreeNode {
    fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Present children, left before right.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }
}

/// Binary tree holding an optional root and the arena owning all nodes.
#[derive(Debug, Clone)]
pub struct BinaryTree {
    arena: Arena<BinaryTreeNode>,
    root: Option<NodeId>,
}

impl Default for BinaryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_root(&mut self, value: i64) -> DomainResult<NodeId> {
        if self.root.is_some() {
            return Err(DomainError::RootAlreadySet);
        }
        let idx = self.arena.insert(BinaryTreeNode::new(value));
        self.root = Some(idx);
        Ok(idx)
    }

    pub fn insert_left(&mut self, parent: NodeId, value: i64) -> DomainResult<NodeId> {
        self.insert_child(parent, Side::Left, value)
    }

    pub fn insert_right(&mut self, parent: NodeId, value: i64) -> DomainResult<NodeId> {
        self.insert_child(parent, Side::Right, value)
    }

    /// Attaches a new node in the given empty slot of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(&mut self, parent: NodeId, side: Side, value: i64) -> DomainResult<NodeId> {
        let occupied = self
            .arena
            .get(parent)
            .ok_or(DomainError::NodeNotFound(parent))?
            .child(side)
            .is_some();
        if occupied {
            return Err(DomainError::SlotOccupied { side });
        }

        let idx = self.arena.insert(BinaryTreeNode::new(value));
        let node = self
            .arena
            .get_mut(parent)
            .ok_or(DomainError::NodeNotFound(parent))?;
        match side {
            Side::Left => node.left = Some(idx),
            Side::Right => node.right = Some(idx),
        }
        Ok(idx)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, idx: NodeId) -> Option<&BinaryTreeNode> {
        self.arena.get(idx)
    }

    pub fn value(&self, idx: NodeId) -> Option<i64> {
        self.node(idx).map(|node| node.value)
    }

    pub fn left(&self, idx: NodeId) -> Option<NodeId> {
        self.node(idx).and_then(|node| node.left)
    }

    pub fn right(&self, idx: NodeId) -> Option<NodeId> {
        self.node(idx).and_then(|node| node.right)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Nodes are never detached, so arena membership is tree membership.
    ///
    /// Handles are arena slots and are not tied to a tree: a `NodeId` taken
    /// from another tree built in the same insertion order is reported as
    /// contained, and [`are_cousins`](Self::are_cousins) and
    /// [`lowest_common_ancestor`](Self::lowest_common_ancestor) resolve it to
    /// this tree's node in that slot.
    pub fn contains(&self, idx: NodeId) -> bool {
        self.arena.contains(idx)
    }

    /// First node in preorder carrying `value`.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, value: i64) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.value == value)
            .map(|(idx, _)| idx)
    }

    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Values of all leaves, left to right.
    pub fn leaf_values(&self) -> Vec<i64> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.value)
            .collect()
    }

    /// Node count on the shortest root-to-leaf path, 0 for an empty tree.
    ///
    /// Level order: the first leaf dequeued is on the shallowest level.
    #[instrument(level = "debug", skip(self))]
    pub fn min_depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut queue = VecDeque::from([(root, 1)]);
        while let Some((idx, depth)) = queue.pop_front() {
            let Some(node) = self.node(idx) else {
                continue;
            };
            if node.is_leaf() {
                debug!(depth, "shallowest leaf found");
                return depth;
            }
            queue.extend(node.children().map(|child| (child, depth + 1)));
        }
        0
    }

    /// Node count on the longest root-to-leaf path, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn max_depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.node(idx) {
                stack.extend(node.children().map(|child| (child, depth + 1)));
            }
        }
        max_depth
    }

    /// Largest sum along any path of distinct nodes, `None` for an empty tree.
    ///
    /// A path may bend once, at its highest node. Each node hands its parent the
    /// best single-branch gain (own value plus the better non-negative child
    /// gain); the candidate bending at the node takes both non-negative gains.
    /// Sums are `i128`: no path of `i64` values can overflow it.
    #[instrument(level = "debug", skip(self))]
    pub fn max_sum(&self) -> Option<i128> {
        let mut gains: HashMap<NodeId, i128> = HashMap::new();
        let mut best: Option<i128> = None;

        for (idx, node) in self.iter_postorder() {
            let left = node.left.and_then(|c| gains.remove(&c)).unwrap_or(0).max(0);
            let right = node.right.and_then(|c| gains.remove(&c)).unwrap_or(0).max(0);
            let value = i128::from(node.value);

            let through = value + left + right;
            best = Some(best.map_or(through, |b| b.max(through)));
            gains.insert(idx, value + left.max(right));
        }

        trace!(?best, "max path sum");
        best
    }

    /// Smallest value strictly greater than `lower_bound`.
    #[instrument(level = "debug", skip(self))]
    pub fn next_larger(&self, lower_bound: i64) -> Option<i64> {
        self.iter()
            .map(|(_, node)| node.value)
            .filter(|&value| value > lower_bound)
            .min()
    }

    /// Whether `a` and `b` sit on the same level under different parents.
    ///
    /// The root has no parent and is nobody's cousin. A level holding only
    /// one of the two nodes ends the search.
    #[instrument(level = "debug", skip(self))]
    pub fn are_cousins(&self, a: NodeId, b: NodeId) -> bool {
        let Some(root) = self.root else {
            return false;
        };

        let mut queue: VecDeque<(NodeId, Option<NodeId>)> = VecDeque::from([(root, None)]);
        let mut level = 0usize;

        while !queue.is_empty() {
            let mut parent_of_a: Option<Option<NodeId>> = None;
            let mut parent_of_b: Option<Option<NodeId>> = None;

            for _ in 0..queue.len() {
                let Some((idx, parent)) = queue.pop_front() else {
                    break;
                };
                if idx == a {
                    parent_of_a = Some(parent);
                }
                if idx == b {
                    parent_of_b = Some(parent);
                }
                if let Some(node) = self.node(idx) {
                    queue.extend(node.children().map(|child| (child, Some(idx))));
                }
            }

            match (parent_of_a, parent_of_b) {
                (Some(Some(pa)), Some(Some(pb))) => {
                    debug!(level, "both nodes found on one level");
                    return pa != pb;
                }
                (None, None) => level += 1,
                _ => {
                    debug!(level, "nodes are not cousins");
                    return false;
                }
            }
        }
        false
    }

    /// Deepest node having both `a` and `b` as descendants (a node descends
    /// from itself). `None` unless both nodes belong to this tree.
    #[instrument(level = "debug", skip(self))]
    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        if !self.contains(a) || !self.contains(b) {
            debug!("target node not in tree");
            return None;
        }

        // subtree root -> node reported upward from that subtree
        let mut reported: HashMap<NodeId, NodeId> = HashMap::new();
        for (idx, node) in self.iter_postorder() {
            let left = node.left.and_then(|c| reported.remove(&c));
            let right = node.right.and_then(|c| reported.remove(&c));

            let report = if idx == a || idx == b {
                Some(idx)
            } else {
                match (left, right) {
                    (Some(_), Some(_)) => Some(idx),
                    (left, right) => left.or(right),
                }
            };
            if let Some(found) = report {
                reported.insert(idx, found);
            }
        }

        self.root.and_then(|root| reported.remove(&root))
    }

    /// Preorder encoding, see [`codec`].
    pub fn serialize(&self) -> String {
        codec::encode(self)
    }

    /// Rebuilds a tree from its preorder encoding.
    pub fn deserialize(text: &str) -> DomainResult<Self> {
        codec::decode(text, None)
    }
}

impl fmt::Display for BinaryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(self))
    }
}

impl FromStr for BinaryTree {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}

/// Trees are equal when shape and values match; arena handles are ignored.
impl PartialEq for BinaryTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && codec::encode(self) == codec::encode(other)
    }
}

impl Eq for BinaryTree {}

pub struct PreOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, &'a BinaryTreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                // right first so left is visited first
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root.map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a BinaryTreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                self.stack.extend(node.right.map(|c| (c, false)));
                self.stack.extend(node.left.map(|c| (c, false)));
            }
        }
        None
    }
}
