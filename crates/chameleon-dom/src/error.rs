//! Error types for document operations.

use std::fmt;

/// Errors that can occur during document operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The node ID is invalid or the node has been removed.
    InvalidNodeId,
    /// The operation requires a select element but the node is something else.
    NotASelect,
    /// An option index was outside the select's option list.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The number of options available.
        len: usize,
    },
    /// The node has no parent, but the operation requires one.
    NodeDetached,
    /// Attempted to insert a node into its own subtree.
    CircularInsertion,
    /// The document root cannot be removed or reparented.
    RootImmutable,
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeId => write!(f, "Invalid or removed node ID"),
            Self::NotASelect => write!(f, "Node is not a select element"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "Option index {index} out of bounds for {len} options")
            }
            Self::NodeDetached => write!(f, "Node has no parent"),
            Self::CircularInsertion => {
                write!(f, "Cannot insert a node into its own subtree")
            }
            Self::RootImmutable => write!(f, "The document root cannot be moved or removed"),
        }
    }
}

impl std::error::Error for DomError {}

/// Result type for document operations.
pub type DomResult<T> = std::result::Result<T, DomError>;
