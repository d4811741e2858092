//! Selection table file naming.

use std::path::{Path, PathBuf};

use crate::constants::naming::{ALL_PREFIX, DETECTIONS_PREFIX, FALLBACK_SEPARATOR, TABLE_SUFFIX};

/// Determine the output name prefix for a detection file.
///
/// Detector outputs named `whistle_detections_*` or `whistle_all_*` use
/// that literal prefix. Anything else uses the file stem plus `_`.
#[must_use]
pub fn output_prefix(detection_file: &Path) -> String {
    let base = detection_file
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    if base.starts_with(DETECTIONS_PREFIX) {
        return DETECTIONS_PREFIX.to_string();
    }
    if base.starts_with(ALL_PREFIX) {
        return ALL_PREFIX.to_string();
    }

    let stem = Path::new(&*base)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!("{stem}{FALLBACK_SEPARATOR}")
}

/// Path of the selection table for one source audio file.
///
/// Format: `<output_dir>/<prefix><audio_filename>.Table1.selection.txt`
#[must_use]
pub fn table_path(output_dir: &Path, prefix: &str, audio_filename: &str) -> PathBuf {
    output_dir.join(format!("{prefix}{audio_filename}{TABLE_SUFFIX}"))
}
