//! Error types for the fingerprint pipeline.
//!
//! Only configuration problems surface as [`Error`]. Anything that goes wrong
//! with an individual record becomes a [`Rejection`](super::Rejection) and
//! the run continues.

use crate::toolkit::ToolkitError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised before any record is processed.
#[derive(Debug, Error)]
pub enum Error {
    /// The fingerprint type name matches no known strategy.
    #[error("unknown fingerprint type '{0}' (expected ecfp4 or apdp)")]
    UnknownFingerprintType(String),

    /// The requested bit width cannot hold a fingerprint.
    #[error("fingerprint width must be positive, got {0}")]
    InvalidBitWidth(usize),

    /// Notations and identifiers do not pair up.
    #[error("{notations} notation(s) were given with {ids} identifier(s)")]
    LengthMismatch {
        /// Number of notations supplied.
        notations: usize,
        /// Number of identifiers supplied.
        ids: usize,
    },

    /// The input file does not exist.
    #[error("input file '{}' does not exist", path.display())]
    MissingInput {
        /// Path as given by the caller.
        path: PathBuf,
    },

    /// The file pipeline only supports some strategies.
    #[error("fingerprint type '{0}' is not supported for file input")]
    UnsupportedFileType(String),

    /// A configuration file could not be read.
    #[error("failed to read configuration '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for [`FingerprintConfig`](super::FingerprintConfig).
    #[error("failed to parse fingerprint configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The toolkit could not open the input.
    #[error("failed to open input: {0}")]
    Toolkit(#[from] ToolkitError),
}

impl Error {
    pub fn length_mismatch(notations: usize, ids: usize) -> Self {
        Self::LengthMismatch { notations, ids }
    }

    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }
}
