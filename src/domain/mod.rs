//! Domain layer: tree structures and their traversal algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod binary;
pub mod codec;
pub mod error;
pub mod nary;
pub mod render;

/// Handle of a node inside its tree's arena.
///
/// Node identity (cousins, lowest common ancestor) is handle equality.
pub type NodeId = generational_arena::Index;

pub use binary::{BinaryTree, BinaryTreeNode, Side};
pub use error::{DomainError, DomainResult};
pub use nary::{NodeSpec, Tree, TreeNode};
pub use render::TreeRender;
