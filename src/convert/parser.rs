//! Detection file parsing.
//!
//! Reads whistle detection CSV files into [`DetectionRow`]s. Uses the `csv`
//! crate so quoted fields, embedded commas and a leading UTF-8 BOM are
//! handled the same way spreadsheet tools write them.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::Error;
use crate::constants::columns;

/// Positions of the required columns within a record.
///
/// When a header name repeats, the last column with that name wins.
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    filename: usize,
    time_offset: usize,
    confidence: usize,
}

impl ColumnIndices {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> Result<Self, Error> {
        let find = |column: &'static str| {
            (0..headers.len())
                .rev()
                .find(|&i| headers.get(i) == Some(column))
                .ok_or_else(|| Error::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };

        Ok(Self {
            filename: find(columns::FILENAME)?,
            time_offset: find(columns::TIME_OFFSET)?,
            confidence: find(columns::CONFIDENCE)?,
        })
    }
}

/// A whistle detection parsed from a detection file.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRow {
    /// Source audio filename.
    pub filename: String,
    /// Start of the detection window in seconds.
    pub time_offset: f64,
    /// Detection confidence, exactly as written in the source file.
    pub confidence: String,
}

/// Parse a detection file from disk.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read
/// - A required column is missing from the header
/// - A row has an empty filename or an invalid time offset
///
/// Returns `Ok(vec![])` if the file has a header but no data rows.
pub fn read_detections(path: &Path) -> Result<Vec<DetectionRow>, Error> {
    let reader = csv_builder()
        .from_path(path)
        .map_err(|e| Error::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    collect_rows(reader, path)
}

/// Parse detections from any reader.
///
/// `source` only labels error messages.
///
/// # Errors
///
/// Same conditions as [`read_detections`].
pub fn parse_detections<R: io::Read>(input: R, source: &Path) -> Result<Vec<DetectionRow>, Error> {
    collect_rows(csv_builder().from_reader(input), source)
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers);
    builder
}

fn collect_rows<R: io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<DetectionRow>, Error> {
    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let indices = ColumnIndices::from_headers(&headers, path)?;

    let mut detections = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map_or(0, csv::Position::line);

        detections.push(
            parse_record(&record, indices).map_err(|message| Error::MalformedRow {
                path: path.to_path_buf(),
                line,
                message,
            })?,
        );
    }

    debug!(
        "Parsed {} detection(s) from {}",
        detections.len(),
        path.display()
    );

    Ok(detections)
}

/// Map a CSV error to a row error when it points at a line.
fn csv_error(path: &Path, e: csv::Error) -> Error {
    match e.position() {
        Some(pos) => Error::MalformedRow {
            path: path.to_path_buf(),
            line: pos.line(),
            message: e.to_string(),
        },
        None => Error::CsvRead {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

/// Build a detection from one record.
///
/// Fields past the header width are ignored; a record too short to reach a
/// required column is rejected.
fn parse_record(record: &csv::StringRecord, indices: ColumnIndices) -> Result<DetectionRow, String> {
    let field = |index: usize, column: &str| {
        record.get(index).ok_or_else(|| {
            format!(
                "record has {} field(s), missing '{column}'",
                record.len()
            )
        })
    };

    let filename = field(indices.filename, columns::FILENAME)?;
    let time_offset = field(indices.time_offset, columns::TIME_OFFSET)?;
    let confidence = field(indices.confidence, columns::CONFIDENCE)?;

    if filename.is_empty() {
        return Err(format!("'{}' must not be empty", columns::FILENAME));
    }

    Ok(DetectionRow {
        filename: filename.to_string(),
        time_offset: parse_time_offset(time_offset)?,
        confidence: confidence.to_string(),
    })
}

/// Parse a time offset in seconds.
///
/// Surrounding whitespace is ignored. The value must be finite and
/// non-negative.
fn parse_time_offset(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' value '{s}' is not a valid number", columns::TIME_OFFSET))?;

    if !value.is_finite() {
        return Err(format!(
            "'{}' must be finite, got {value}",
            columns::TIME_OFFSET
        ));
    }

    if value < 0.0 {
        return Err(format!(
            "'{}' cannot be negative, got {value}",
            columns::TIME_OFFSET
        ));
    }

    Ok(value)
}
