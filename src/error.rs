//! Error types for the RIFF codec and the tagging pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tagging operations
pub type Result<T> = std::result::Result<T, AigcError>;

#[derive(Error, Debug)]
pub enum AigcError {
    /// Input path does not exist or cannot be read
    #[error("cannot read input {}: {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Output directory does not exist or is not writable
    #[error("output path {} is not writable: {reason}", path.display())]
    UnwritablePath { path: PathBuf, reason: String },

    /// Input is too short to hold the `RIFF`/size/`WAVE` header
    #[error("input holds {available} bytes, too short for a 12-byte RIFF header")]
    TruncatedHeader { available: usize },

    /// A chunk declares more payload than the input has left
    #[error(
        "chunk {index} ({tag:?}) declares {declared} bytes but only {available} remain"
    )]
    TruncatedChunk {
        index: usize,
        tag: String,
        declared: u32,
        available: usize,
    },

    /// A chunk tag is not exactly four bytes
    #[error("chunk {index} has tag {tag:?}, which is not four bytes")]
    UnencodableTag { index: usize, tag: String },

    /// A payload or the whole container overflows a 32-bit length field
    #[error("size {size} does not fit a 32-bit RIFF length field")]
    TooLarge { size: u64 },

    /// Writing the output stream failed
    #[error("failed writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// AIGC payload is not a metadata JSON document
    #[error("invalid AIGC payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl AigcError {
    pub fn missing_input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AigcError::MissingInput {
            path: path.into(),
            source,
        }
    }

    pub fn unwritable<S: Into<String>>(path: impl Into<PathBuf>, reason: S) -> Self {
        AigcError::UnwritablePath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AigcError::Write {
            path: path.into(),
            source,
        }
    }
}
