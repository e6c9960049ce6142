//! Scan entry points.
//!
//! `Scanner` owns the immutable pieces built from a `ScanConfig` and runs
//! the single synchronous pass: walk, then aggregate. `scan_archive`
//! wraps that pass with the archive-side collaborators (digesting the
//! archive, extracting it into a scoped temporary directory).

use crate::core::triage::{job_id, Artifacts, Report};
use crate::error::{Result, ScanError};
use crate::extract::{ArchiveExtractor, ExtractionLimits, ZipExtractor};
use crate::hashing::sha256_file;
use crate::triage::classify::Classifier;
use crate::triage::config::ScanConfig;
use crate::triage::heuristics::HeuristicsEngine;
use crate::triage::io::{FileSource, FsSource};
use crate::triage::score::ScoreEngine;
use crate::triage::walk::{TreeWalker, WalkOutput};
use std::path::Path;
use tracing::{info, info_span, warn};

/// Prefix of the temporary extraction directory.
pub const TEMP_DIR_PREFIX: &str = "zipscan_";

/// A configured scanner. Cheap to reuse across scans.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: ScanConfig,
    classifier: Classifier,
    engine: HeuristicsEngine,
    scorer: ScoreEngine,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        let classifier = Classifier::new(&config.classifier);
        let engine = HeuristicsEngine::new(&config.heuristics)?;
        let scorer = ScoreEngine::new(&config.scoring);
        Ok(Self {
            config,
            classifier,
            engine,
            scorer,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Walk an extraction root on the real filesystem.
    pub fn scan_extracted(&self, root: &Path) -> Result<WalkOutput> {
        self.scan_extracted_with(root, &FsSource)
    }

    /// Walk an extraction root reading file contents through `source`.
    pub fn scan_extracted_with(&self, root: &Path, source: &dyn FileSource) -> Result<WalkOutput> {
        TreeWalker::new(
            &self.classifier,
            &self.engine,
            source,
            self.config.io.digest_chunk_size,
        )
        .walk(root)
    }

    /// Fold a walk into a report.
    pub fn build_report(&self, job_id: String, output: WalkOutput) -> Result<Report> {
        let summary = self.scorer.summarize(&output.findings);
        Report::builder()
            .with_job_id(job_id)
            .with_summary(summary)
            .with_findings(output.findings)
            .with_artifacts(Artifacts {
                file_list: output.file_list,
                hashes: output.hashes,
            })
            .build()
            .map_err(ScanError::Internal)
    }

    /// Scan an already-extracted tree that came from `archive_name` with
    /// whole-archive digest `archive_sha256`.
    pub fn scan_tree(&self, root: &Path, archive_name: &str, archive_sha256: &str) -> Result<Report> {
        self.scan_tree_with(root, archive_name, archive_sha256, &FsSource)
    }

    pub fn scan_tree_with(
        &self,
        root: &Path,
        archive_name: &str,
        archive_sha256: &str,
        source: &dyn FileSource,
    ) -> Result<Report> {
        let output = self.scan_extracted_with(root, source)?;
        let report = self.build_report(job_id(archive_name, archive_sha256), output)?;
        info!(
            job_id = %report.job_id,
            files = report.artifacts.file_list.len(),
            findings = report.findings.len(),
            score = report.summary.score,
            verdict = ?report.summary.verdict,
            "scan complete"
        );
        Ok(report)
    }

    /// Extract `archive` into a temporary directory and scan it.
    ///
    /// The temporary directory is removed on every exit path.
    pub fn scan_archive(&self, archive: &Path, extractor: &dyn ArchiveExtractor) -> Result<Report> {
        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ScanError::NotAnArchive(archive.to_path_buf()))?;
        let span = info_span!("scan", archive = %name);
        let _g = span.enter();

        let digest = sha256_file(archive, self.config.io.digest_chunk_size)?;
        let tmp = tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()?;
        let extracted = extractor.extract(archive, tmp.path())?;
        if extracted.renamed > 0 || extracted.skipped > 0 {
            warn!(
                renamed = extracted.renamed,
                skipped = extracted.skipped,
                "archive contains entry names that point outside the extraction root"
            );
        }

        let report = self.scan_tree(tmp.path(), &name, &digest)?;
        if let Err(e) = tmp.close() {
            warn!(error = %e, "failed to remove extraction directory");
        }
        Ok(report)
    }

    /// `scan_archive` with a ZIP extractor bounded by this scanner's I/O limits.
    pub fn scan_zip(&self, archive: &Path) -> Result<Report> {
        let extractor = ZipExtractor::new(ExtractionLimits::from(&self.config.io));
        self.scan_archive(archive, &extractor)
    }
}

/// Public API: scan an extraction root with the default configuration.
pub fn scan_extracted(root: &Path) -> Result<WalkOutput> {
    Scanner::new(ScanConfig::default())?.scan_extracted(root)
}

/// Public API: scan a ZIP archive with the default configuration.
pub fn scan_archive(archive: &Path) -> Result<Report> {
    Scanner::new(ScanConfig::default())?.scan_zip(archive)
}
