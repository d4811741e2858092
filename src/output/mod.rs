//! Output format writers and console reporting.

mod json_envelope;
pub mod progress;
mod raven;

pub use json_envelope::{
    ErrorPayload, EventType, JsonEnvelope, ResultType, SPEC_VERSION, emit_json_error,
    emit_json_result,
};
pub use raven::{RavenRow, SelectionTableWriter, write_selection_table};
