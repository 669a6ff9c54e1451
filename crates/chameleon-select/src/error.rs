//! Error types for widget synthesis and enhancement.

use chameleon_dom::DomError;

/// Result type alias for enhancement operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while enhancing a select control.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document operation failed.
    #[error("Document operation failed: {0}")]
    Dom(#[from] DomError),

    /// Style sampling failed.
    #[error("Style sampling failed: {0}")]
    Style(#[from] chameleon_style::Error),
}
