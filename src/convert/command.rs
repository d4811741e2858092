//! Conversion of detection files into selection tables.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::Error;
use crate::config::ErrorPolicy;
use crate::constants::DETECTION_FILE_EXTENSION;
use crate::output::{progress, write_selection_table};

use super::{
    ConversionSummary, CsvConversion, FailedTable, FileReport, FileStatus, WrittenTable,
    group_detection_file, output_prefix, table_path,
};

/// Options for converting a directory.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Directory receiving selection tables (None = the input directory).
    pub output_dir: Option<PathBuf>,
    /// What to do when a detection file fails.
    pub on_error: ErrorPolicy,
    /// Show a progress bar.
    pub progress: bool,
}

/// Convert one detection file into one selection table per audio file.
///
/// A table that fails to write is logged and recorded in
/// [`CsvConversion::failures`]; the remaining tables are still written.
///
/// # Errors
///
/// Returns an error if the detection file cannot be parsed.
pub fn convert_csv(csv_path: &Path, output_dir: &Path) -> Result<CsvConversion, Error> {
    let prefix = output_prefix(csv_path);
    let groups = group_detection_file(csv_path)?;

    let mut conversion = CsvConversion {
        source: csv_path.to_path_buf(),
        prefix,
        tables: Vec::new(),
        failures: Vec::new(),
    };

    if groups.is_empty() {
        info!("  Skipping {}: no data rows found", csv_path.display());
        return Ok(conversion);
    }

    info!("  Found {} unique file(s)", groups.len());

    for group in &groups {
        let path = table_path(output_dir, &conversion.prefix, &group.filename);

        match write_selection_table(&path, &group.filename, &group.rows) {
            Ok(selections) => {
                info!(
                    "    Created: {} ({selections} selections)",
                    display_name(&path)
                );
                conversion.tables.push(WrittenTable {
                    begin_file: group.filename.clone(),
                    output_file: path,
                    selections,
                });
            }
            Err(e) => {
                error!("    Failed: {}", e.display_chain());
                conversion.failures.push(FailedTable {
                    begin_file: group.filename.clone(),
                    error: e.display_chain(),
                    output_file: path,
                });
            }
        }
    }

    Ok(conversion)
}

/// Convert every detection file directly inside `input_dir`.
///
/// Detection files are converted in file-name order. With
/// [`ErrorPolicy::Abort`] the first failing file ends the run with its
/// error; with [`ErrorPolicy::Skip`] failures are recorded in the summary.
///
/// # Errors
///
/// Returns an error if `input_dir` is not a directory, cannot be listed,
/// or a detection file fails under [`ErrorPolicy::Abort`].
pub fn convert_directory(
    input_dir: &Path,
    options: &ConvertOptions,
) -> Result<ConversionSummary, Error> {
    if !input_dir.is_dir() {
        return Err(Error::InvalidInputDirectory {
            path: input_dir.to_path_buf(),
        });
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| input_dir.to_path_buf());
    let mut summary = ConversionSummary::new(input_dir.to_path_buf(), output_dir.clone());

    let files = collect_detection_files(input_dir)?;
    if files.is_empty() {
        info!("No CSV files found in '{}'", input_dir.display());
        return Ok(summary);
    }

    info!(
        "Found {} CSV file(s) in '{}'",
        files.len(),
        input_dir.display()
    );

    let pb = progress::create_file_progress(files.len(), options.progress);

    for file in &files {
        let name = display_name(file);
        progress::set_progress_message(pb.as_ref(), &name);
        info!("Converting: {name}");

        let (report, failure) = match convert_csv(file, &output_dir) {
            Ok(conversion) if conversion.is_complete() => {
                let status = if conversion.is_empty() {
                    FileStatus::Skipped
                } else {
                    FileStatus::Converted
                };
                let report = FileReport {
                    source: conversion.source,
                    status,
                    tables: conversion.tables,
                    error: None,
                };
                (report, None)
            }
            Ok(conversion) => {
                let e = Error::PartialConversion {
                    path: file.clone(),
                    failed: conversion.failures.len(),
                    total: conversion.failures.len() + conversion.tables.len(),
                };
                (failed_report(file, conversion.tables, &e), Some(e))
            }
            Err(e) => (failed_report(file, Vec::new(), &e), Some(e)),
        };

        if let Some(e) = failure {
            if options.on_error == ErrorPolicy::Abort {
                progress::finish_progress(pb, "Failed");
                return Err(e);
            }
            warn!("Skipping {name}: {}", e.display_chain());
        }
        summary.files.push(report);

        progress::inc_progress(pb.as_ref());
    }

    progress::finish_progress(pb, "Complete");

    Ok(summary)
}

fn failed_report(file: &Path, tables: Vec<WrittenTable>, e: &Error) -> FileReport {
    FileReport {
        source: file.to_path_buf(),
        status: FileStatus::Failed,
        tables,
        error: Some(e.display_chain()),
    }
}

/// Collect detection files directly inside a directory.
///
/// Matches the `.csv` extension case-insensitively, does not recurse, and
/// returns paths sorted by file name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn collect_detection_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_detection_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Check if a file name ends in `.csv`, ignoring case.
fn is_detection_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|n| n.ends_with(&format!(".{DETECTION_FILE_EXTENSION}")))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
