//! Error types for the style sampling system.

use chameleon_dom::DomError;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while sampling styles.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document operation on the reference element failed, typically
    /// because the node was detached or removed.
    #[error("Document operation failed during sampling: {0}")]
    Dom(#[from] DomError),

    /// A sampled color value could not be parsed.
    #[error("Invalid color value '{value}'")]
    InvalidColor { value: String },
}

impl Error {
    /// Create an invalid-color error.
    pub fn invalid_color(value: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
        }
    }
}
