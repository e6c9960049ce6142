//! Content digests for files and in-memory buffers.
//!
//! Files are hashed incrementally in bounded chunks; nothing here ever
//! loads a whole file into memory.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Default chunk size used when streaming a file through the hasher.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Prefix written into the digest map in place of a digest when hashing failed.
pub const ERROR_MARKER_PREFIX: &str = "err:";

/// Computes the SHA-256 digest of the given data and returns it as a hex string.
pub fn sha256_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Streams a reader through SHA-256 using `chunk_size` sized reads.
pub fn sha256_reader<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; chunk_size.max(1)];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Computes the SHA-256 digest of a file on disk.
pub fn sha256_file<P: AsRef<Path>>(path: P, chunk_size: usize) -> io::Result<String> {
    let file = File::open(path)?;
    sha256_reader(file, chunk_size)
}

/// Outcome of digesting one file. Failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestOutcome {
    Digest(String),
    Failed(String),
}

impl DigestOutcome {
    pub fn from_result(result: io::Result<String>) -> Self {
        match result {
            Ok(hex) => DigestOutcome::Digest(hex),
            Err(e) => DigestOutcome::Failed(e.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, DigestOutcome::Digest(_))
    }

    /// Value stored in the report's digest map: the hex digest or `err:<detail>`.
    pub fn into_report_value(self) -> String {
        match self {
            DigestOutcome::Digest(hex) => hex,
            DigestOutcome::Failed(detail) => format!("{ERROR_MARKER_PREFIX}{detail}"),
        }
    }
}
