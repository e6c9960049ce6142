//! Error types for zipscan.
//!
//! Only scan-fatal conditions live here. Per-file problems (unreadable
//! files, failed digests) are recorded as report data and never surface
//! as a `ScanError`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Extraction root does not exist
    #[error("Extraction root not found: {0}")]
    RootNotFound(PathBuf),

    /// Extraction root exists but is not a directory
    #[error("Extraction root is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    /// Input is not a ZIP archive
    #[error("Not a zip file: {0}")]
    NotAnArchive(PathBuf),

    /// Archive container could not be read or unpacked
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Resource limit exceeded while materializing the archive
    #[error("Resource limit exceeded: {resource} ({used}/{limit})")]
    LimitExceeded {
        resource: String,
        used: u64,
        limit: u64,
    },

    /// Configuration rejected by validation or unparsable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

impl ScanError {
    /// Process exit code the command line front end uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::NotAnArchive(_) => 2,
            _ => 1,
        }
    }
}
