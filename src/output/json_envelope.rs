//! JSON envelope types for CLI output.
//!
//! In JSON output mode the run ends with a single envelope on stdout so
//! whistle-raven can be driven from scripts and annotation pipelines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current version of the JSON envelope format.
pub const SPEC_VERSION: &str = "1.0";

/// JSON envelope wrapping CLI output events.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct JsonEnvelope<T> {
    /// Envelope format version.
    pub spec_version: String,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Final result.
    Result,
    /// Run-ending error.
    Error,
}

/// Result type discriminator for result payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Detection file conversion results.
    Conversion,
    /// Configuration display.
    Config,
}

/// Error payload for error events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Error code (`snake_case` identifier).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl From<&crate::Error> for ErrorPayload {
    fn from(e: &crate::Error) -> Self {
        Self {
            code: e.code().to_string(),
            message: e.display_chain(),
        }
    }
}

/// Emit a JSON result event to stdout.
pub fn emit_json_result<T: Serialize>(payload: &T) {
    emit(EventType::Result, payload);
}

/// Emit a JSON error event to stdout.
pub fn emit_json_error(error: &crate::Error) {
    emit(EventType::Error, &ErrorPayload::from(error));
}

#[allow(clippy::print_stdout, clippy::print_stderr)]
fn emit<T: Serialize>(event: EventType, payload: &T) {
    let envelope = JsonEnvelope::new(event, payload);
    match serde_json::to_string(&envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            // stderr keeps the stdout stream parseable
            eprintln!("error: failed to serialize JSON event: {e}");
        }
    }
}
