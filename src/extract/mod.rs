//! Archive extraction.
//!
//! The scanner itself only ever sees an already-materialized directory;
//! this module is the collaborator that produces one. Extractors must put
//! every entry under the destination and nowhere else; an entry whose
//! name would escape is rewritten to stay inside, never dropped.

pub mod zip;

pub use self::zip::ZipExtractor;

use crate::error::Result;
use crate::triage::config::IOConfig;
use std::path::Path;

/// Caps applied while materializing an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub max_entries: u64,
    pub max_total_uncompressed: u64,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self::from(&IOConfig::default())
    }
}

impl From<&IOConfig> for ExtractionLimits {
    fn from(io: &IOConfig) -> Self {
        Self {
            max_entries: io.max_entries,
            max_total_uncompressed: io.max_total_uncompressed,
        }
    }
}

/// What an extraction wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub files: u64,
    pub directories: u64,
    /// Entries written under a sanitized name (root, `.` or `..` dropped).
    pub renamed: u64,
    /// Entries not written because nothing of their name survived sanitizing.
    pub skipped: u64,
    pub bytes_written: u64,
}

/// Unpacks an archive file into a destination directory.
pub trait ArchiveExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<ExtractionSummary>;
}
