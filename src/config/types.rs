//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion settings.
    #[serde(default)]
    pub convert: ConvertConfig,
}

/// Conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directory receiving selection tables (default: the input directory).
    pub output_dir: Option<PathBuf>,

    /// What to do when a detection file fails to convert.
    pub on_error: ErrorPolicy,

    /// Show a progress bar while converting.
    pub progress: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            on_error: ErrorPolicy::Abort,
            progress: true,
        }
    }
}

/// Policy for detection files that fail to convert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the run at the first failed detection file.
    #[default]
    Abort,
    /// Log the failure and continue with the next detection file.
    Skip,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Console output mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Log lines and a progress bar.
    #[default]
    Human,
    /// A single JSON result envelope on stdout.
    Json,
}

impl OutputMode {
    /// Whether stdout is reserved for machine-readable output.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output mode: {other}")),
        }
    }
}
