//! Turning user input into trees.

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{codec, BinaryTree, DomainError, NodeId, NodeSpec, Tree};

/// Decodes a binary tree given on the command line.
///
/// Trailing whitespace (a newline from a shell pipe) is dropped before decoding.
#[instrument(level = "debug", skip(settings))]
pub fn load_binary(encoded: &str, settings: &Settings) -> ApplicationResult<BinaryTree> {
    let tree = codec::decode(encoded.trim_end(), settings.codec.max_nodes)?;
    debug!(nodes = tree.len(), "decoded binary tree");
    Ok(tree)
}

/// Reads an N-ary tree from a TOML file.
#[instrument(level = "debug", skip(settings))]
pub fn load_nary(path: &Path, settings: &Settings) -> ApplicationResult<Tree> {
    let content = std::fs::read_to_string(path).with_path_context("read tree", path)?;
    parse_nary(&content, path, settings)
}

/// Parses TOML `content`; `path` is only used for error messages.
pub fn parse_nary(content: &str, path: &Path, settings: &Settings) -> ApplicationResult<Tree> {
    let spec: NodeSpec = toml::from_str(content).map_err(|e| ApplicationError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let tree = Tree::from_spec(&spec)?;

    if let Some(limit) = settings.codec.max_nodes {
        if tree.len() > limit {
            return Err(DomainError::NodeLimitExceeded { limit }.into());
        }
    }
    debug!(nodes = tree.len(), "loaded n-ary tree");
    Ok(tree)
}

/// First node in preorder carrying `value`.
pub fn resolve_value(tree: &BinaryTree, value: i64) -> ApplicationResult<NodeId> {
    tree.find(value)
        .ok_or(ApplicationError::ValueNotFound(value))
}
