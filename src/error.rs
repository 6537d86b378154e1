//! Error types for chemtag.

use thiserror::Error;

/// Result type for chemtag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chemtag operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required configuration value is missing.
    ///
    /// Fatal at setup: the pipeline must not process any document.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The element mapping file is unreadable or malformed.
    ///
    /// Fatal at setup: no partial lookup table is ever used.
    #[error("Element map error: {0}")]
    DataLoad(String),

    /// Span offsets do not resolve against the document text.
    ///
    /// Recoverable: scoped to the single annotation whose enrichment is skipped.
    #[error("offsets {start}..{end} do not resolve against a document of {len} bytes")]
    Offset {
        /// Span start (byte offset, inclusive).
        start: usize,
        /// Span end (byte offset, exclusive).
        end: usize,
        /// Document length in bytes.
        len: usize,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a data load error.
    #[must_use]
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::DataLoad(msg.into())
    }

    /// True for setup errors that must abort the whole pipeline.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::DataLoad(_))
    }
}
