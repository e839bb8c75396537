//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::path::NodePath;

/// Domain errors represent invalid edits of a taxonomy.
/// Parsing and building never fail; only editing can.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid node path '{0}': expected 1-based indices such as 1.2.3")]
    InvalidPathSyntax(String),

    #[error("node path must name a node")]
    EmptyPath,

    #[error("no node at path {0}")]
    NoSuchNode(NodePath),

    #[error("node name must not be empty")]
    EmptyLabel,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
