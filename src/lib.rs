//! zipscan: static, content-inert triage of untrusted ZIP archives.
//!
//! The crate walks an extracted archive tree, hashes every file, flags
//! native binaries, scans scripts for encoded blobs and code-execution
//! idioms, and produces a single JSON-serializable report with a score
//! and a `clean`/`suspicious` verdict.

/// Core data types (findings, report)
pub mod core;
pub mod error;
pub mod extract;
pub mod hashing;
pub mod logging;
pub mod sink;
pub mod triage;

pub use error::{Result, ScanError};
pub use triage::api::{scan_archive, scan_extracted, Scanner};
