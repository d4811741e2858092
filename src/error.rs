//! Error types for whistle-raven.

use std::path::PathBuf;

/// Result type alias for whistle-raven operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for whistle-raven.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Input path is not a directory.
    #[error("'{path}' is not a valid directory")]
    InvalidInputDirectory {
        /// Path supplied by the caller.
        path: PathBuf,
    },

    /// Detection CSV lacks a required header column.
    #[error("detection file '{path}' is missing required column '{column}'")]
    MissingColumn {
        /// Path to the detection file.
        path: PathBuf,
        /// Name of the missing column.
        column: &'static str,
    },

    /// A detection row could not be interpreted.
    #[error("detection file '{path}', line {line}: {message}")]
    MalformedRow {
        /// Path to the detection file.
        path: PathBuf,
        /// 1-based line number in the file.
        line: u64,
        /// Description of the problem.
        message: String,
    },

    /// Detection CSV could not be opened or read.
    #[error("failed to read detection file '{path}'")]
    CsvRead {
        /// Path to the detection file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Selection table could not be written.
    #[error("failed to write selection table '{path}'")]
    TableWrite {
        /// Path to the selection table.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// One or more selection tables of a detection file failed to write.
    #[error("{failed} of {total} selection table(s) from '{path}' could not be written")]
    PartialConversion {
        /// Path to the detection file.
        path: PathBuf,
        /// Number of tables that failed.
        failed: usize,
        /// Number of tables attempted.
        total: usize,
    },

    /// Some detection files failed while the run continued past errors.
    #[error("{failed} detection file(s) failed to convert")]
    ConversionFailures {
        /// Number of failed detection files.
        failed: usize,
    },

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },
}

impl Error {
    /// Stable `snake_case` identifier for structured output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::InvalidInputDirectory { .. } => "invalid_input_directory",
            Self::MissingColumn { .. } => "missing_column",
            Self::MalformedRow { .. } => "malformed_row",
            Self::CsvRead { .. } => "csv_read_failed",
            Self::TableWrite { .. } => "table_write_failed",
            Self::PartialConversion { .. } => "partial_conversion",
            Self::ConversionFailures { .. } => "conversion_failures",
            Self::ConfigDirNotFound => "config_dir_not_found",
            Self::ConfigRead { .. } => "config_read_failed",
            Self::ConfigParse { .. } => "config_parse_failed",
            Self::ConfigWrite { .. } => "config_write_failed",
            Self::ConfigSerialize { .. } => "config_serialize_failed",
        }
    }

    /// Render the error followed by its sources, `outer: inner: ...`.
    #[must_use]
    pub fn display_chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        message
    }
}
