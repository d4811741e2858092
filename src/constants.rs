//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "whistle-raven";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Extension of detection files picked up from the input directory.
pub const DETECTION_FILE_EXTENSION: &str = "csv";

/// Required detection CSV columns.
pub mod columns {
    /// Source audio filename.
    pub const FILENAME: &str = "filename";
    /// Detection start offset in seconds.
    pub const TIME_OFFSET: &str = "time_offset";
    /// Detection confidence, passed through verbatim.
    pub const CONFIDENCE: &str = "confidence";

    /// All required columns, in the order they are checked.
    pub const REQUIRED: [&str; 3] = [FILENAME, TIME_OFFSET, CONFIDENCE];
}

/// Output file naming.
pub mod naming {
    /// Prefix recognised on detector output files.
    pub const DETECTIONS_PREFIX: &str = "whistle_detections_";
    /// Prefix recognised on combined detector output files.
    pub const ALL_PREFIX: &str = "whistle_all_";
    /// Separator appended to a CSV stem when no known prefix matches.
    pub const FALLBACK_SEPARATOR: char = '_';
    /// Suffix of every generated selection table.
    pub const TABLE_SUFFIX: &str = ".Table1.selection.txt";
}

/// Raven selection table format constants.
pub mod raven {
    /// Header columns, in output order.
    pub const HEADER: [&str; 10] = [
        "Selection",
        "View",
        "Channel",
        "Begin Time (s)",
        "End Time (s)",
        "Low Freq (Hz)",
        "High Freq (Hz)",
        "Begin File",
        "confidence",
        "Sound type",
    ];

    /// Column separator.
    pub const SEPARATOR: char = '\t';

    /// View name.
    pub const VIEW: &str = "Spectrogram 1";

    /// Channel number.
    pub const CHANNEL: u8 = 1;

    /// Lower frequency bound of every selection in Hz.
    pub const LOW_FREQ: u32 = 0;

    /// Upper frequency bound of every selection in Hz.
    pub const HIGH_FREQ: u32 = 22000;

    /// Length of every selection window in seconds.
    pub const WINDOW_SECS: f64 = 1.0;

    /// Sound type annotation.
    pub const SOUND_TYPE: &str = "Dolphin_whistles";

    /// Fractional digits for begin and end times.
    pub const TIME_DECIMAL_PLACES: usize = 6;
}
