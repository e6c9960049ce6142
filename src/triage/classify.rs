//! Extension-based classification.
//!
//! Files are bucketed purely by name. No magic-byte sniffing happens here:
//! a renamed ELF with a `.txt` extension is unclassified, and an
//! extensionless file is treated as a script. Both are accepted
//! precision/recall trade-offs; the heuristics engine only relies on the
//! two named classes.

use crate::triage::config::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Classification class gating which heuristics apply to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClass {
    NativeBinary,
    ScriptText,
    Unclassified,
}

impl FileClass {
    pub fn is_scanned(self) -> bool {
        !matches!(self, FileClass::Unclassified)
    }
}

/// Extract the lowercased extension of a file name.
///
/// Returns `None` for names without a `.`, names ending in `.`, and names
/// whose only dot is the leading one (`.bashrc`), mirroring how most path
/// libraries split extensions.
pub fn extension_of(file_name: &str) -> Option<String> {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    let rest = &file_name[stem_start..];
    let dot = rest.rfind('.')?;
    let ext = &rest[dot + 1..];
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// Maps file names to a `FileClass` using fixed extension sets.
#[derive(Debug, Clone)]
pub struct Classifier {
    native: HashSet<String>,
    script: HashSet<String>,
    scan_extensionless: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassifierConfig::default())
    }
}

impl Classifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        let normalize = |v: &[String]| -> HashSet<String> {
            v.iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect()
        };
        Self {
            native: normalize(&config.native_extensions),
            script: normalize(&config.script_extensions),
            scan_extensionless: config.scan_extensionless,
        }
    }

    /// Classify a bare file name (not a path).
    pub fn classify(&self, file_name: &str) -> FileClass {
        match extension_of(file_name) {
            Some(ext) if self.native.contains(&ext) => FileClass::NativeBinary,
            Some(ext) if self.script.contains(&ext) => FileClass::ScriptText,
            Some(_) => FileClass::Unclassified,
            None if self.scan_extensionless => FileClass::ScriptText,
            None => FileClass::Unclassified,
        }
    }
}
