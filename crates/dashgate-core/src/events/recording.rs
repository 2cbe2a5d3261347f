//! Decoding of recorded event files.

use serde::Deserialize;

use super::{DashboardEvent, EventKind};
use crate::error::CoreError;

/// Raw line shape, decoded before the kind is validated so unknown names
/// get their own error instead of a generic serde message.
#[derive(Deserialize)]
struct RecordedLine {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Parse a recording: one JSON event object per line.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_recording(input: &str) -> Result<Vec<DashboardEvent>, CoreError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let raw: RecordedLine =
                serde_json::from_str(line).map_err(|e| CoreError::MalformedEvent {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            let kind: EventKind = raw.event.parse()?;
            Ok(DashboardEvent::new(kind, raw.data))
        })
        .collect()
}
