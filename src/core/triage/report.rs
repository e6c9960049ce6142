//! Report types produced by a scan.

use super::findings::{Finding, Severity};
use crate::error::ScanError;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coarse outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Clean,
    Suspicious,
}

/// Scan status. Reports only exist for completed scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Complete,
}

/// Score and verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// 0..=100, higher is safer
    pub score: u8,
    pub verdict: Verdict,
}

/// File inventory and digest map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifacts {
    pub file_list: Vec<String>,
    /// Relative path -> hex digest, or `err:<detail>` when hashing failed
    pub hashes: BTreeMap<String, String>,
}

impl Artifacts {
    /// Evidence paths that are not keys of the digest map.
    pub fn dangling_evidence<'a>(&self, findings: &'a [Finding]) -> Vec<&'a str> {
        findings
            .iter()
            .flat_map(|f| f.evidence.iter())
            .filter(|p| !self.hashes.contains_key(p.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Final output of a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub job_id: String,
    pub status: ScanStatus,
    pub summary: Summary,
    pub findings: Vec<Finding>,
    pub artifacts: Artifacts,
    /// UTC, ISO-8601, `Z` suffix
    pub created_at: String,
}

impl Report {
    /// Creates a new builder for constructing Report instances.
    pub fn builder() -> ReportBuilder {
        ReportBuilder::new()
    }

    pub fn count_severity(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn to_json_string(&self) -> Result<String, ScanError> {
        serde_json::to_string(self)
            .map_err(|e| ScanError::Serialization(format!("JSON serialization error: {}", e)))
    }

    /// Two-space indented JSON, the on-disk format.
    pub fn to_json_pretty(&self) -> Result<String, ScanError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::Serialization(format!("JSON serialization error: {}", e)))
    }

    pub fn from_json_str(json_str: &str) -> Result<Self, ScanError> {
        serde_json::from_str(json_str)
            .map_err(|e| ScanError::Serialization(format!("JSON deserialization error: {}", e)))
    }
}

/// Current UTC time as `2024-01-02T03:04:05.123456Z`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Job identifier: archive base name, `_`, first 8 hex chars of the archive digest.
pub fn job_id(archive_name: &str, archive_sha256: &str) -> String {
    let prefix: String = archive_sha256.chars().take(8).collect();
    format!("{archive_name}_{prefix}")
}

/// Builder for Report.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    job_id: Option<String>,
    summary: Option<Summary>,
    findings: Vec<Finding>,
    artifacts: Artifacts,
    created_at: Option<String>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job_id<S: Into<String>>(mut self, job_id: S) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_findings(mut self, findings: Vec<Finding>) -> Self {
        self.findings = findings;
        self
    }

    pub fn with_artifacts(mut self, artifacts: Artifacts) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Overrides the timestamp; defaults to now.
    pub fn with_created_at<S: Into<String>>(mut self, created_at: S) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Builds the Report. Returns an error if required fields are missing.
    pub fn build(self) -> Result<Report, String> {
        let job_id = self.job_id.ok_or("job_id is required")?;
        let summary = self.summary.ok_or("summary is required")?;
        Ok(Report {
            job_id,
            status: ScanStatus::Complete,
            summary,
            findings: self.findings,
            artifacts: self.artifacts,
            created_at: self.created_at.unwrap_or_else(utc_timestamp),
        })
    }
}
