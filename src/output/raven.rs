//! Raven selection table output format writer.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::raven;
use crate::convert::DetectionRow;
use crate::error::{Error, Result};

/// One line of a Raven selection table.
#[derive(Debug, Clone, PartialEq)]
pub struct RavenRow<'a> {
    /// 1-based selection number within the table.
    pub selection: usize,
    /// Selection start in seconds.
    pub begin_time: f64,
    /// Selection end in seconds.
    pub end_time: f64,
    /// Source audio filename.
    pub begin_file: &'a str,
    /// Detection confidence, verbatim.
    pub confidence: &'a str,
}

impl<'a> RavenRow<'a> {
    /// Derive the table row for a detection at `selection` within its group.
    #[must_use]
    pub fn new(selection: usize, detection: &'a DetectionRow, begin_file: &'a str) -> Self {
        Self {
            selection,
            begin_time: detection.time_offset,
            end_time: detection.time_offset + raven::WINDOW_SECS,
            begin_file,
            confidence: &detection.confidence,
        }
    }
}

impl fmt::Display for RavenRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = raven::SEPARATOR;
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{:.decimal$}{sep}{:.decimal$}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.selection,
            raven::VIEW,
            raven::CHANNEL,
            self.begin_time,
            self.end_time,
            raven::LOW_FREQ,
            raven::HIGH_FREQ,
            self.begin_file,
            self.confidence,
            raven::SOUND_TYPE,
            decimal = raven::TIME_DECIMAL_PLACES,
        )
    }
}

/// Raven selection table writer for the detections of one audio file.
pub struct SelectionTableWriter<'a, W: Write> {
    writer: W,
    begin_file: &'a str,
    selection_id: usize,
}

impl<'a, W: Write> SelectionTableWriter<'a, W> {
    /// Create a writer whose rows reference `begin_file`.
    pub fn new(writer: W, begin_file: &'a str) -> Self {
        Self {
            writer,
            begin_file,
            selection_id: 0,
        }
    }

    /// Number of detection rows written so far.
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.selection_id
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write the tab-separated column header line.
    pub fn write_header(&mut self) -> io::Result<()> {
        let mut header = String::new();
        for (i, column) in raven::HEADER.iter().enumerate() {
            if i > 0 {
                header.push(raven::SEPARATOR);
            }
            header.push_str(column);
        }
        writeln!(self.writer, "{header}")
    }

    /// Write the next numbered selection for a detection.
    pub fn write_detection(&mut self, detection: &DetectionRow) -> io::Result<()> {
        self.selection_id += 1;
        let row = RavenRow::new(self.selection_id, detection, self.begin_file);
        writeln!(self.writer, "{row}")
    }

    /// Flush buffered rows.
    pub fn finalize(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write the selection table for one audio file.
///
/// The table is written to a `.partial` sibling first and renamed over
/// `path` only once it is complete, so an existing table is replaced
/// atomically and a failed write never leaves a truncated table behind.
///
/// Returns the number of selections written.
///
/// # Errors
///
/// Returns [`Error::TableWrite`] if the directory is missing or not
/// writable, or the table cannot be written completely.
pub fn write_selection_table(path: &Path, begin_file: &str, rows: &[DetectionRow]) -> Result<usize> {
    let partial = partial_path(path);

    let result = write_table(&partial, begin_file, rows)
        .and_then(|count| fs::rename(&partial, path).map(|()| count));

    result.map_err(|source| {
        if let Err(e) = fs::remove_file(&partial) {
            debug!("No partial table to remove at {}: {e}", partial.display());
        }
        Error::TableWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_table(path: &Path, begin_file: &str, rows: &[DetectionRow]) -> io::Result<usize> {
    let file = File::create(path)?;
    let mut table = SelectionTableWriter::new(BufWriter::new(file), begin_file);

    table.write_header()?;
    for row in rows {
        table.write_detection(row)?;
    }
    table.finalize()?;

    let count = table.rows_written();
    table
        .into_inner()
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?
        .sync_all()?;

    Ok(count)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}
