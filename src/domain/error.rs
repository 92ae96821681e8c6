//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::binary::Side;
use crate::domain::NodeId;

/// Domain errors cover malformed encoded trees and invalid construction calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed input: unexpected end of input at token {position}")]
    UnexpectedEnd { position: usize },

    #[error("malformed input: invalid token {token:?} at position {position}")]
    InvalidToken { position: usize, token: String },

    #[error("malformed input: {remaining} trailing token(s) after position {position}")]
    TrailingTokens { position: usize, remaining: usize },

    #[error("input encodes more than {limit} nodes")]
    NodeLimitExceeded { limit: usize },

    #[error("tree depth {depth} exceeds render limit {limit}")]
    RenderDepthExceeded { depth: usize, limit: usize },

    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("tree already has a root")]
    RootAlreadySet,

    #[error("{side} child already set")]
    SlotOccupied { side: Side },
}

impl DomainError {
    /// True for errors produced while decoding an encoded tree.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            DomainError::UnexpectedEnd { .. }
                | DomainError::InvalidToken { .. }
                | DomainError::TrailingTokens { .. }
                | DomainError::NodeLimitExceeded { .. }
        )
    }

    /// True for valid input refused by a configured size limit.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(
            self,
            DomainError::NodeLimitExceeded { .. } | DomainError::RenderDepthExceeded { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
