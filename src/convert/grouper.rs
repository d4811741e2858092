//! Detection grouping by source audio file.

use std::collections::HashMap;
use std::path::Path;

use super::{DetectionRow, read_detections};
use crate::Error;

/// All detections of one detection file that share a source audio filename.
#[derive(Debug, Clone, PartialEq)]
pub struct FileGroup {
    /// Source audio filename shared by every row.
    pub filename: String,
    /// Detections in the order they appear in the detection file.
    pub rows: Vec<DetectionRow>,
}

impl FileGroup {
    /// Number of detections in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the group holds no detections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Partition detections by source audio filename.
///
/// Groups are returned in order of first appearance and keep the input
/// order of their rows.
#[must_use]
pub fn group_by_filename(detections: Vec<DetectionRow>) -> Vec<FileGroup> {
    let mut groups: Vec<FileGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for detection in detections {
        if let Some(&i) = index.get(&detection.filename) {
            groups[i].rows.push(detection);
        } else {
            index.insert(detection.filename.clone(), groups.len());
            groups.push(FileGroup {
                filename: detection.filename.clone(),
                rows: vec![detection],
            });
        }
    }

    groups
}

/// Read a detection file and group its rows by source audio filename.
///
/// # Errors
///
/// Returns an error if the detection file cannot be parsed.
pub fn group_detection_file(path: &Path) -> Result<Vec<FileGroup>, Error> {
    Ok(group_by_filename(read_detections(path)?))
}
