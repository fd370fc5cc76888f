//! Error types for the extraction library.
//!
//! Errors come from two places: the external document parser that produces
//! the item stream, and rule construction (invalid patterns). The rule
//! engine itself never fails on a well-formed feed.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while producing or consuming items.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document parser rejected the document (malformed file, wrong password, ...)
    #[error("Document source error: {0}")]
    Source(String),

    /// The page tree is structurally invalid
    #[error("Malformed page tree: {0}")]
    MalformedDocument(String),

    /// A text run could not be percent-decoded
    #[error("Failed to decode text run '{text}': {reason}")]
    TextDecode {
        /// Raw (still encoded) text
        text: String,
        /// Reason reported by the decoder
        reason: String,
    },

    /// A rule pattern failed to compile
    #[error("Invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
