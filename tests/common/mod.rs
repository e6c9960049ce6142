//! Common test utilities and helpers.
//!
//! Builds throwaway extraction trees and archives under `tempfile`
//! directories; everything is cleaned up when the guard drops.

#![allow(dead_code)]

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::TempDir;
use zipscan::triage::io::{FileSource, FsSource};

/// Create a tree of files under a fresh temp dir. Paths use `/`.
pub fn tree(files: &[(&str, &[u8])]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (rel, data) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, data).unwrap();
    }
    dir
}

/// A contiguous run of base64-alphabet characters of exactly `len` bytes.
pub fn base64_run(len: usize) -> Vec<u8> {
    b"TWFu+/9z"
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect()
}

/// Write a ZIP archive with the given entries.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    for (name, data) in entries {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
}

/// Filesystem source that refuses to open files with the given names,
/// as if their permissions denied reading.
pub struct DenyingSource {
    denied: HashSet<String>,
}

impl DenyingSource {
    pub fn new(names: &[&str]) -> Self {
        Self {
            denied: names.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FileSource for DenyingSource {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.denied.contains(&name) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Permission denied (os error 13)",
            ));
        }
        FsSource.open(path)
    }
}
