//! Conversion of whistle detection files into Raven selection tables.
//!
//! Detection rows are grouped by source audio file and every group is
//! written to its own selection table, named after the detection file.

pub mod command;
mod grouper;
mod naming;
mod parser;
mod report;

pub use command::{ConvertOptions, collect_detection_files, convert_csv, convert_directory};
pub use grouper::{FileGroup, group_by_filename, group_detection_file};
pub use naming::{output_prefix, table_path};
pub use parser::{DetectionRow, parse_detections, read_detections};
pub use report::{
    ConversionSummary, CsvConversion, FailedTable, FileReport, FileStatus, WrittenTable,
};
