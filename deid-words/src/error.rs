//! Error types for deid-words.

use thiserror::Error;

/// Errors raised while persisting, restoring, or sourcing a word policy.
///
/// Construction and queries never fail; only I/O and parsing of the
/// persisted format do.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The file could not be opened, read, or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first line of a persisted policy is missing or not a mode marker.
    #[error("malformed policy file: expected a mode marker, found {found:?}")]
    Format {
        /// The offending first line, or `None` for an empty input.
        found: Option<String>,
    },
}

impl PolicyError {
    pub(crate) fn format(found: Option<&str>) -> Self {
        Self::Format {
            found: found.map(str::to_owned),
        }
    }

    /// Returns `true` for [`PolicyError::Format`].
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Returns `true` for [`PolicyError::Io`].
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Result type alias for policy operations.
pub type Result<T> = std::result::Result<T, PolicyError>;
