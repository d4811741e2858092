//! Conversion results.

use std::path::PathBuf;

use serde::Serialize;

use crate::output::ResultType;

/// A selection table that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenTable {
    /// Source audio filename the table annotates.
    pub begin_file: String,
    /// Path of the selection table.
    pub output_file: PathBuf,
    /// Number of selections in the table.
    pub selections: usize,
}

/// A selection table that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedTable {
    /// Source audio filename the table annotates.
    pub begin_file: String,
    /// Path the table was meant to be written to.
    pub output_file: PathBuf,
    /// Error description.
    pub error: String,
}

/// Result of converting one detection file.
#[derive(Debug, Clone, Serialize)]
pub struct CsvConversion {
    /// Detection file path.
    pub source: PathBuf,
    /// Prefix used for every table name.
    pub prefix: String,
    /// Tables written successfully, in group order.
    pub tables: Vec<WrittenTable>,
    /// Tables that failed to write.
    pub failures: Vec<FailedTable>,
}

impl CsvConversion {
    /// Whether the detection file had no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.failures.is_empty()
    }

    /// Whether every table was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total selections written across all tables.
    #[must_use]
    pub fn selections(&self) -> usize {
        self.tables.iter().map(|t| t.selections).sum()
    }
}

/// Outcome of one detection file within a directory run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// All tables written.
    Converted,
    /// Header only, nothing to write.
    Skipped,
    /// Parsing or writing failed.
    Failed,
}

/// Per-file entry of a directory run.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Detection file path.
    pub source: PathBuf,
    /// Outcome.
    pub status: FileStatus,
    /// Tables written from this file.
    pub tables: Vec<WrittenTable>,
    /// Error description for failed files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of converting a directory of detection files.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    /// Result discriminator for JSON output.
    pub result_type: ResultType,
    /// Directory scanned for detection files.
    pub input_dir: PathBuf,
    /// Directory receiving selection tables.
    pub output_dir: PathBuf,
    /// One entry per detection file, in processing order.
    pub files: Vec<FileReport>,
}

impl ConversionSummary {
    /// Create an empty summary.
    #[must_use]
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            result_type: ResultType::Conversion,
            input_dir,
            output_dir,
            files: Vec::new(),
        }
    }

    fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Number of fully converted detection files.
    #[must_use]
    pub fn converted(&self) -> usize {
        self.count(FileStatus::Converted)
    }

    /// Number of detection files without data rows.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(FileStatus::Skipped)
    }

    /// Number of detection files that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(FileStatus::Failed)
    }

    /// Number of selection tables written.
    #[must_use]
    pub fn tables(&self) -> usize {
        self.files.iter().map(|f| f.tables.len()).sum()
    }

    /// Number of selections written across all tables.
    #[must_use]
    pub fn selections(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.tables)
            .map(|t| t.selections)
            .sum()
    }
}
