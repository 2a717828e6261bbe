//! JSON export of analysis reports

use crate::model::{AnalysisReport, SampleBuffer};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One analysed file as written to `--json` output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub file: PathBuf,
    pub analyzed_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub channels: usize,
    pub report: AnalysisReport,
}

impl ReportEntry {
    pub fn new(file: &Path, buffer: &SampleBuffer, report: AnalysisReport) -> Self {
        Self {
            file: file.to_path_buf(),
            analyzed_at: Utc::now(),
            duration_secs: buffer.duration(),
            sample_rate: buffer.sample_rate,
            channels: buffer.num_channels(),
            report,
        }
    }
}

/// Pretty-printed JSON array of entries
pub fn to_json(entries: &[ReportEntry]) -> Result<String> {
    serde_json::to_string_pretty(entries).context("Failed to serialize analysis reports")
}

/// Write entries to a JSON file
pub fn write_json(path: &Path, entries: &[ReportEntry]) -> Result<()> {
    let json = to_json(entries)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write report: {:?}", path))?;
    log::info!("Wrote {} report(s) to {:?}", entries.len(), path);
    Ok(())
}
