//! Recursive traversal of an extraction root.
//!
//! Every regular file is visited exactly once, in file-name order, and
//! produces one inventory entry, one digest map entry and zero or more
//! findings. Directories are traversed but not recorded; symlinks are not
//! followed and not recorded.

use crate::core::triage::Finding;
use crate::error::{Result, ScanError};
use crate::hashing::{sha256_reader, DigestOutcome};
use crate::triage::classify::Classifier;
use crate::triage::heuristics::HeuristicsEngine;
use crate::triage::io::FileSource;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info_span, trace, warn};
use walkdir::WalkDir;

/// One regular file discovered under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Slash-separated path relative to the root.
    pub rel_path: String,
    pub digest: DigestOutcome,
}

/// Everything the walk collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutput {
    pub file_list: Vec<String>,
    pub hashes: BTreeMap<String, String>,
    pub findings: Vec<Finding>,
}

impl WalkOutput {
    fn record(&mut self, record: FileRecord, findings: Vec<Finding>) {
        self.file_list.push(record.rel_path.clone());
        self.hashes
            .insert(record.rel_path, record.digest.into_report_value());
        self.findings.extend(findings);
    }

    /// `rel` itself, or `rel~N` when an earlier file already took that key.
    fn unique_key(&self, rel: String) -> String {
        if !self.hashes.contains_key(&rel) {
            return rel;
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{rel}~{n}");
            if !self.hashes.contains_key(&candidate) {
                warn!(path = %rel, key = %candidate, "duplicate relative path");
                return candidate;
            }
            n += 1;
        }
    }
}

/// Walks a tree, hashing and inspecting each file.
pub struct TreeWalker<'a> {
    classifier: &'a Classifier,
    engine: &'a HeuristicsEngine,
    source: &'a dyn FileSource,
    chunk_size: usize,
}

impl<'a> TreeWalker<'a> {
    pub fn new(
        classifier: &'a Classifier,
        engine: &'a HeuristicsEngine,
        source: &'a dyn FileSource,
        chunk_size: usize,
    ) -> Self {
        Self {
            classifier,
            engine,
            source,
            chunk_size,
        }
    }

    /// Walk `root`. Only a missing or unreadable root is an error.
    pub fn walk(&self, root: &Path) -> Result<WalkOutput> {
        check_root(root)?;
        let span = info_span!("walk", root = %root.display());
        let _g = span.enter();

        let mut out = WalkOutput::default();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ScanError::Io(io::Error::from(e)));
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = match relative_path(root, entry.path()) {
                Some(rel) => rel,
                None => {
                    warn!(path = %entry.path().display(), "entry outside root");
                    continue;
                }
            };
            let rel = out.unique_key(rel);
            let name = entry.file_name().to_string_lossy();
            let (record, findings) = self.visit(entry.path(), rel, &name);
            out.record(record, findings);
        }

        debug!(
            files = out.file_list.len(),
            findings = out.findings.len(),
            "walk complete"
        );
        Ok(out)
    }

    fn visit(&self, path: &Path, rel: String, name: &str) -> (FileRecord, Vec<Finding>) {
        let digest = DigestOutcome::from_result(self.digest(path));
        if let DigestOutcome::Failed(detail) = &digest {
            warn!(path = %rel, error = %detail, "digest failed");
        }
        let class = self.classifier.classify(name);
        trace!(path = %rel, ?class, "classified");

        let findings = if class.is_scanned() {
            self.engine
                .inspect(&rel, class, || self.source.read_all(path))
        } else {
            Vec::new()
        };

        (
            FileRecord {
                rel_path: rel,
                digest,
            },
            findings,
        )
    }

    fn digest(&self, path: &Path) -> io::Result<String> {
        let reader = self.source.open(path)?;
        sha256_reader(reader, self.chunk_size)
    }
}

/// The root must exist, be a directory, and be listable.
pub fn check_root(root: &Path) -> Result<()> {
    let meta = match fs::metadata(root) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }
        Err(e) => return Err(ScanError::Io(e)),
    };
    if !meta.is_dir() {
        return Err(ScanError::RootNotDirectory(root.to_path_buf()));
    }
    fs::read_dir(root)?;
    Ok(())
}

/// Slash-joined path of `path` relative to `root`. Bytes that are not
/// valid UTF-8 are written as `\xNN` so distinct names stay distinct.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| component_text(c.as_os_str()))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn component_text(part: &OsStr) -> String {
    if let Some(text) = part.to_str() {
        return text.to_owned();
    }
    let mut out = String::new();
    for chunk in part.as_encoded_bytes().utf8_chunks() {
        out.push_str(chunk.valid());
        for b in chunk.invalid() {
            out.push_str(&format!("\\x{b:02x}"));
        }
    }
    out
}
