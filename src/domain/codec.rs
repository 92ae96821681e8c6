//! Preorder string encoding of binary trees.
//!
//! Grammar: `Node := Value "," Node "," Node | "#"`.
//! Value tokens are read like `parseInt`: leading whitespace is skipped, an
//! optional sign is accepted and parsing stops at the first non-digit.

use tracing::{debug, instrument};

use crate::domain::binary::{BinaryTree, Side};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::NodeId;

pub const SEPARATOR: &str = ",";
pub const ABSENT: &str = "#";

#[instrument(level = "debug", skip(tree), fields(nodes = tree.len()))]
pub fn encode(tree: &BinaryTree) -> String {
    let mut tokens: Vec<String> = Vec::with_capacity(2 * tree.len() + 1);
    let mut stack = vec![tree.root()];

    while let Some(slot) = stack.pop() {
        match slot.and_then(|idx| tree.node(idx)) {
            Some(node) => {
                tokens.push(node.value.to_string());
                stack.push(node.right);
                stack.push(node.left);
            }
            None => tokens.push(ABSENT.to_string()),
        }
    }

    tokens.join(SEPARATOR)
}

/// Rebuilds a tree from [`encode`] output.
///
/// The whole input must be consumed by exactly one tree: running out of tokens,
/// an unreadable token and leftover tokens are all errors. `max_nodes` caps the
/// number of nodes the input may describe.
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn decode(text: &str, max_nodes: Option<usize>) -> DomainResult<BinaryTree> {
    let mut tokens = text.split(SEPARATOR).enumerate();
    let mut tree = BinaryTree::new();
    // slots still waiting for a subtree; `None` is the root slot
    let mut pending: Vec<Option<(NodeId, Side)>> = vec![None];
    let mut consumed = 0;

    while let Some(slot) = pending.pop() {
        let (position, token) = tokens
            .next()
            .ok_or(DomainError::UnexpectedEnd { position: consumed })?;
        consumed = position + 1;

        if token == ABSENT {
            continue;
        }
        let value = parse_value(token).ok_or_else(|| {
            debug!(position, token, "unreadable token");
            DomainError::InvalidToken {
                position,
                token: token.to_string(),
            }
        })?;

        if let Some(limit) = max_nodes {
            if tree.len() >= limit {
                return Err(DomainError::NodeLimitExceeded { limit });
            }
        }

        let idx = match slot {
            None => tree.set_root(value)?,
            Some((parent, side)) => tree.insert_child(parent, side, value)?,
        };
        pending.push(Some((idx, Side::Right)));
        pending.push(Some((idx, Side::Left)));
    }

    let remaining = tokens.count();
    if remaining > 0 {
        return Err(DomainError::TrailingTokens {
            position: consumed,
            remaining,
        });
    }
    Ok(tree)
}

/// Reads the integer prefix of a token, `None` if there is none or it overflows.
pub fn parse_value(token: &str) -> Option<i64> {
    let trimmed = token.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }
    let digits = &rest[..digit_count];
    if negative {
        format!("-{digits}").parse().ok()
    } else {
        digits.parse().ok()
    }
}
