//! Core scan data types organized by submodule.

pub mod findings;
pub mod report;

// Re-exports for convenient access under crate::core::triage::*
pub use findings::{Finding, FindingKind, Severity};
pub use report::{
    job_id, utc_timestamp, Artifacts, Report, ReportBuilder, ScanStatus, Summary, Verdict,
};
