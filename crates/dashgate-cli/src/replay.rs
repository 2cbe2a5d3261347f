//! Publishing recorded events into a running dashboard.

use std::path::Path;

use anyhow::{Context, Result};
use dashgate_core::{EventEmitter, parse_recording};
use tracing::info;

/// Read a recording and emit every event in file order.
///
/// Returns the number of events published.
pub async fn replay_file(path: &Path, emitter: &dyn EventEmitter) -> Result<usize> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read recording {}", path.display()))?;
    let events = parse_recording(&content)
        .with_context(|| format!("Failed to parse recording {}", path.display()))?;

    let count = events.len();
    for event in events {
        emitter.emit(event);
    }

    info!(path = %path.display(), events = count, "Replayed recording");
    Ok(count)
}
