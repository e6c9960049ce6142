//! Finding and severity types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single finding.
///
/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Whether a finding at this severity is a risk signal (flips the verdict).
    pub fn is_risk_signal(self) -> bool {
        matches!(self, Severity::Medium | Severity::High)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Kinds of findings the heuristics engine emits. Only used to pick the
/// title and description; the serialized finding carries plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    NativeBinary,
    Base64Blob,
    CodeExecution,
    ReadError,
}

impl FindingKind {
    pub fn severity(self) -> Severity {
        match self {
            FindingKind::NativeBinary => Severity::High,
            FindingKind::Base64Blob | FindingKind::CodeExecution => Severity::Medium,
            FindingKind::ReadError => Severity::Low,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FindingKind::NativeBinary => "Native binary found",
            FindingKind::Base64Blob => "Base64-like blob",
            FindingKind::CodeExecution => "Potential code execution pattern",
            FindingKind::ReadError => "File read error",
        }
    }
}

/// A single detected risk signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Relative paths implicated, in order.
    pub evidence: Vec<String>,
}

impl Finding {
    pub fn new<T, D>(severity: Severity, title: T, description: D, evidence: Vec<String>) -> Self
    where
        T: Into<String>,
        D: Into<String>,
    {
        Self {
            severity,
            title: title.into(),
            description: description.into(),
            evidence,
        }
    }

    /// `.exe`/`.dll`/... present in the archive.
    pub fn native_binary(rel: &str) -> Self {
        Self::for_kind(
            FindingKind::NativeBinary,
            format!("Native executable or library: {rel}"),
            rel,
        )
    }

    pub fn base64_blob(rel: &str) -> Self {
        Self::for_kind(
            FindingKind::Base64Blob,
            format!("Large base64-like block found in {rel}"),
            rel,
        )
    }

    pub fn code_execution(rel: &str) -> Self {
        Self::for_kind(
            FindingKind::CodeExecution,
            format!("Strings like eval/exec/child_process/powershell in {rel}"),
            rel,
        )
    }

    /// Content could not be read; the description is the I/O error text.
    pub fn read_error(rel: &str, error: &std::io::Error) -> Self {
        Self::for_kind(FindingKind::ReadError, error.to_string(), rel)
    }

    fn for_kind(kind: FindingKind, description: String, rel: &str) -> Self {
        Self::new(kind.severity(), kind.title(), description, vec![rel.to_string()])
    }
}
