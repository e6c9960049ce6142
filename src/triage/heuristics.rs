//! Content heuristics for classified files.
//!
//! Native binaries are flagged by presence alone. Script/text files are
//! read in full and checked for long base64-alphabet runs and
//! code-execution idioms; each check contributes at most one finding per
//! file no matter how many times it matches.

use crate::core::triage::Finding;
use crate::error::{Result, ScanError};
use crate::triage::classify::FileClass;
use crate::triage::config::HeuristicsConfig;
use aho_corasick::AhoCorasick;
use regex::bytes::Regex;
use std::io;
use tracing::trace;

/// Compiled pattern matchers. Built once per scan and only read afterwards.
#[derive(Debug, Clone)]
pub struct HeuristicsEngine {
    base64_run: Regex,
    exec_markers: AhoCorasick,
}

impl HeuristicsEngine {
    pub fn new(config: &HeuristicsConfig) -> Result<Self> {
        if config.base64_min_run == 0 {
            return Err(ScanError::InvalidConfig(
                "base64_min_run must be greater than zero".into(),
            ));
        }
        let pattern = format!("[A-Za-z0-9+/]{{{},}}={{0,2}}", config.base64_min_run);
        let base64_run = Regex::new(&pattern)
            .map_err(|e| ScanError::InvalidConfig(format!("base64 pattern: {e}")))?;

        let markers: Vec<&str> = config
            .exec_markers
            .iter()
            .map(String::as_str)
            .filter(|m| !m.is_empty())
            .collect();
        if markers.is_empty() {
            return Err(ScanError::InvalidConfig(
                "at least one exec marker is required".into(),
            ));
        }
        let exec_markers = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&markers)
            .map_err(|e| ScanError::InvalidConfig(format!("exec markers: {e}")))?;

        Ok(Self {
            base64_run,
            exec_markers,
        })
    }

    /// True if `data` contains a base64-like run at or above the threshold.
    pub fn has_base64_blob(&self, data: &[u8]) -> bool {
        self.base64_run.is_match(data)
    }

    /// True if the permissively decoded text contains any exec marker.
    pub fn has_exec_idiom(&self, data: &[u8]) -> bool {
        let text = String::from_utf8_lossy(data);
        self.exec_markers.is_match(text.as_bytes())
    }

    /// Findings for a script/text file's content.
    pub fn scan_content(&self, rel: &str, data: &[u8]) -> Vec<Finding> {
        let mut findings = Vec::new();
        if self.has_base64_blob(data) {
            trace!(path = rel, "base64 run");
            findings.push(Finding::base64_blob(rel));
        }
        if self.has_exec_idiom(data) {
            trace!(path = rel, "exec idiom");
            findings.push(Finding::code_execution(rel));
        }
        findings
    }

    /// Findings for one classified file.
    ///
    /// `read` is only invoked for script/text files; a read failure turns
    /// into a single low-severity finding instead of an error.
    pub fn inspect<F>(&self, rel: &str, class: FileClass, read: F) -> Vec<Finding>
    where
        F: FnOnce() -> io::Result<Vec<u8>>,
    {
        match class {
            FileClass::NativeBinary => vec![Finding::native_binary(rel)],
            FileClass::ScriptText => match read() {
                Ok(data) => self.scan_content(rel, &data),
                Err(e) => {
                    tracing::warn!(path = rel, error = %e, "content read failed");
                    vec![Finding::read_error(rel, &e)]
                }
            },
            FileClass::Unclassified => Vec::new(),
        }
    }
}
