//! Error types
//!
//! All fallible operations in the crate return [`Result`], whose error side is
//! the single [`Error`] enum below.

use std::path::PathBuf;

/// Errors raised while loading language resources or running TextRank
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resource file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A model file was readable but contained a line we could not parse
    #[error("malformed model {path} at line {line}: {reason}")]
    MalformedModel {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// No language model exists for the requested language code
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A node key was requested for a token without a part-of-speech tag
    #[error("cannot build a node key for {0:?}: empty part-of-speech tag")]
    EmptyTag(String),

    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be parsed
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedModel {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
