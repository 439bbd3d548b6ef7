//! Error types for the millsheet-core library.

use thiserror::Error;

/// Main error type for the millsheet library.
#[derive(Error, Debug)]
pub enum MillsheetError {
    /// Upstream text-source (OCR) error.
    #[error("text source error: {0}")]
    Source(#[from] SourceError),

    /// Downstream rename error.
    #[error("rename error: {0}")]
    Rename(#[from] RenameError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors reported by the upstream text source.
///
/// Field extraction itself never fails; a document whose text yields no
/// fields is an empty record, not an error. These variants cover the one
/// hard per-document failure (no text at all) and the collaborator that
/// turns a document into text.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The document produced no text at all.
    #[error("document produced no text")]
    EmptyText,

    /// The document could not be read.
    #[error("cannot read document: {0}")]
    Unreadable(String),

    /// Page rasterization failed before text detection.
    #[error("page rasterization failed: {0}")]
    Rasterize(String),

    /// The text detection service reported an error.
    #[error("text detection failed: {0}")]
    Detection(String),
}

/// Errors reported by the downstream rename collaborator.
#[derive(Error, Debug)]
pub enum RenameError {
    /// The source document disappeared before it could be renamed.
    #[error("source file missing: {0}")]
    SourceMissing(String),

    /// The rename or copy operation itself failed.
    #[error("rename failed: {0}")]
    Failed(String),
}

/// Result type for the millsheet library.
pub type Result<T> = std::result::Result<T, MillsheetError>;
