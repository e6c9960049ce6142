//! ZIP extraction with entry-count and size caps.

use super::{ArchiveExtractor, ExtractionLimits, ExtractionSummary};
use crate::error::{Result, ScanError};
use crate::triage::io::BoundedReader;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Extracts ZIP archives.
#[derive(Debug, Clone, Default)]
pub struct ZipExtractor {
    limits: ExtractionLimits,
}

impl ZipExtractor {
    pub fn new(limits: ExtractionLimits) -> Self {
        Self { limits }
    }
}

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<ExtractionSummary> {
        let file = File::open(archive)?;
        let mut zip = ZipArchive::new(BufReader::new(file)).map_err(|e| {
            debug!(error = %e, "zip parse failed");
            ScanError::NotAnArchive(archive.to_path_buf())
        })?;

        let entries = zip.len() as u64;
        debug!("Opening ZIP archive: {:?} ({} entries)", archive, entries);
        if entries > self.limits.max_entries {
            return Err(ScanError::LimitExceeded {
                resource: "archive entries".into(),
                used: entries,
                limit: self.limits.max_entries,
            });
        }

        let mut summary = ExtractionSummary::default();
        for i in 0..zip.len() {
            let mut entry = zip
                .by_index(i)
                .map_err(|e| ScanError::Extraction(format!("entry {i}: {e}")))?;

            // Root, drive prefix, `.` and `..` components are dropped, so
            // `../payload.exe` lands at `payload.exe` and is still scanned.
            let rel = entry.mangled_name();
            if rel.as_os_str().is_empty() {
                warn!(name = entry.name(), "skipping entry with no usable name");
                summary.skipped += 1;
                continue;
            }
            if entry.enclosed_name().as_deref() != Some(rel.as_path()) {
                warn!(
                    name = entry.name(),
                    extracted_as = %rel.display(),
                    "entry name rewritten to stay under the destination"
                );
                summary.renamed += 1;
            }
            let out = dest.join(&rel);

            if entry.is_dir() {
                fs::create_dir_all(&out)?;
                summary.directories += 1;
                continue;
            }
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }

            // Declared sizes can lie; count what is actually inflated.
            let remaining = self.limits.max_total_uncompressed - summary.bytes_written;
            let mut bounded = BoundedReader::new(&mut entry, remaining.saturating_add(1));
            let mut target = File::create(&out)?;
            let n = io::copy(&mut bounded, &mut target)
                .map_err(|e| ScanError::Extraction(format!("{}: {e}", rel.display())))?;

            summary.bytes_written += n;
            if summary.bytes_written > self.limits.max_total_uncompressed {
                return Err(ScanError::LimitExceeded {
                    resource: "uncompressed bytes".into(),
                    used: summary.bytes_written,
                    limit: self.limits.max_total_uncompressed,
                });
            }
            summary.files += 1;
        }

        info!(
            files = summary.files,
            directories = summary.directories,
            renamed = summary.renamed,
            skipped = summary.skipped,
            bytes = summary.bytes_written,
            "archive extracted"
        );
        Ok(summary)
    }
}
