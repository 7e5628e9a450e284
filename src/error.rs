//! Error types for the extraction pipeline.
//!
//! Only genuinely invalid parameters fail fast; text-shape irregularities
//! (missing punctuation, no matches, malformed blocks) degrade to partial
//! or empty results instead of raising.

use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// The caller supplied an inverted year range.
    #[error("invalid year range: start {start} > end {end}")]
    InvalidRange { start: u16, end: u16 },

    /// IO error while reading an explicitly named source file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An explicitly named chapter file could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
