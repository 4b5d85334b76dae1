//! Writing reports to disk.
//!
//! Files are written to a temp path in the target directory and renamed into
//! place, so a crash never leaves a half-written report behind.

use crate::models::{ExportFormat, ExportRecord, Result, SamplerError, SamplingResult};
use crate::report::{render_report, report_filename};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Writes sampling results into an output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
    format: ExportFormat,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Path the result would be exported to.
    pub fn target_path(&self, result: &SamplingResult) -> PathBuf {
        self.dir.join(report_filename(result.grade(), self.format))
    }

    /// Export the result, replacing any previous export for the same grade.
    pub fn export(&self, result: &SamplingResult) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| SamplerError::io("creating output dir", e))?;

        let path = self.target_path(result);
        let temp_path = path.with_extension("tmp");

        let written = self
            .write_temp(&temp_path, result)
            .and_then(|()| {
                // Atomic rename
                fs::rename(&temp_path, &path).map_err(|e| SamplerError::io("renaming export", e))
            });
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "Failed to remove temp export"
                );
            }
            return Err(e);
        }

        debug!(format = ?self.format, "Export written");
        info!(path = %path.display(), "Saved sampling results");
        Ok(path)
    }

    fn write_temp(&self, temp_path: &Path, result: &SamplingResult) -> Result<()> {
        let file =
            File::create(temp_path).map_err(|e| SamplerError::io("creating temp export", e))?;
        let mut writer = BufWriter::new(file);
        match self.format {
            ExportFormat::Text => writer
                .write_all(render_report(result).as_bytes())
                .map_err(|e| SamplerError::io("writing report", e))?,
            ExportFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, &ExportRecord::new(result))?;
                writer
                    .write_all(b"\n")
                    .map_err(|e| SamplerError::io("writing report", e))?;
            }
        }
        writer
            .flush()
            .map_err(|e| SamplerError::io("flushing report", e))
    }
}
