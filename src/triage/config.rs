//! Configuration for the scan pipeline.
//!
//! Provides centralized configuration for all scan components with
//! sensible defaults. A config is built once, validated, and then only
//! read: the classifier and heuristics engine capture what they need at
//! construction time.

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Master configuration for the scan pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// I/O and extraction limits.
    pub io: IOConfig,
    /// Extension classes.
    pub classifier: ClassifierConfig,
    /// Content pattern checks.
    pub heuristics: HeuristicsConfig,
    /// Score aggregation.
    pub scoring: ScoringConfig,
}

impl ScanConfig {
    /// Load a JSON config file; fields it omits keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ScanConfig = serde_json::from_str(&text).map_err(|e| {
            ScanError::InvalidConfig(format!("{}: {}", path.as_ref().display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the scan meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.io.digest_chunk_size == 0 {
            return Err(ScanError::InvalidConfig(
                "io.digest_chunk_size must be greater than zero".into(),
            ));
        }
        if self.heuristics.base64_min_run == 0 {
            return Err(ScanError::InvalidConfig(
                "heuristics.base64_min_run must be greater than zero".into(),
            ));
        }
        if self.heuristics.exec_markers.iter().all(|m| m.is_empty()) {
            return Err(ScanError::InvalidConfig(
                "heuristics.exec_markers must contain at least one non-empty marker".into(),
            ));
        }
        if self.scoring.base_score > 100 {
            return Err(ScanError::InvalidConfig(format!(
                "scoring.base_score must be at most 100, got {}",
                self.scoring.base_score
            )));
        }
        Ok(())
    }
}

/// I/O configuration for hashing and extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IOConfig {
    /// Read size when streaming a file through the hasher (default: 8192).
    pub digest_chunk_size: usize,
    /// Maximum number of entries extracted from one archive (default: 10000).
    pub max_entries: u64,
    /// Maximum total uncompressed bytes extracted (default: 1073741824 = 1GB).
    pub max_total_uncompressed: u64,
}

impl Default for IOConfig {
    fn default() -> Self {
        Self {
            digest_chunk_size: crate::hashing::DEFAULT_CHUNK_SIZE,
            max_entries: 10_000,
            max_total_uncompressed: 1024 * 1024 * 1024, // 1GB
        }
    }
}

/// Extension classes. Extensions are stored without the leading dot and
/// compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Executables, shared libraries and binary payloads.
    pub native_extensions: Vec<String>,
    /// Interpreted-language and shell scripts.
    pub script_extensions: Vec<String>,
    /// Treat files without an extension as scripts (default: true).
    pub scan_extensionless: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            native_extensions: ["exe", "dll", "bin", "so", "scr", "com", "pif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            script_extensions: ["js", "py", "sh", "ps1", "rb"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scan_extensionless: true,
        }
    }
}

/// Content heuristics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Minimum run of base64-alphabet characters that counts as a blob (default: 100).
    pub base64_min_run: usize,
    /// Case-insensitive substrings that indicate code execution.
    pub exec_markers: Vec<String>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            base64_min_run: 100,
            exec_markers: ["eval(", "exec(", "require(\"child_process\")", "powershell"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score of a tree without high-severity findings (default: 100).
    pub base_score: u8,
    /// Points removed per high-severity finding (default: 10).
    pub high_penalty: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100,
            high_penalty: 10,
        }
    }
}
