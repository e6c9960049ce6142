//! Static triage of an extracted archive tree.
//!
//! Classifies files by extension, inspects script/text content for
//! suspicious patterns, and folds the results into a score and verdict.
//! Nothing under the extraction root is ever executed or modified.

pub mod api;
pub mod classify;
pub mod config;
pub mod heuristics;
pub mod io;
pub mod score;
pub mod walk;

// Re-export key types from core for convenience
pub use crate::core::triage::{Artifacts, Finding, Report, Severity, Summary, Verdict};
pub use api::Scanner;
pub use classify::{Classifier, FileClass};
pub use config::ScanConfig;
pub use heuristics::HeuristicsEngine;
pub use walk::{FileRecord, TreeWalker, WalkOutput};
