//! Report persistence.

use crate::core::triage::Report;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Something that accepts a finished report.
pub trait ReportSink {
    fn write(&self, report: &Report) -> Result<()>;
}

/// Writes the report as indented JSON to a file, creating parent
/// directories as needed. An existing file is replaced.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonFileSink {
    fn write(&self, report: &Report) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = report.to_json_pretty()?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "report written");
        Ok(())
    }
}
