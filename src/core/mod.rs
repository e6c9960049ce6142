//! Core data types for zipscan.
//!
//! Everything a scan produces (findings, summary, report) is defined here;
//! the logic that produces them lives under `crate::triage`.

pub mod triage;
