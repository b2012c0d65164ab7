use crate::layout::ensure_parent;
use crate::types::Handoff;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Format one handoff log line (without the trailing newline):
/// `[2025-10-24T00:00:00.000000Z] from -> to: message`.
pub fn handoff_line(at: DateTime<Utc>, handoff: &Handoff) -> String {
    format!(
        "[{}Z] {} -> {}: {}",
        at.format("%Y-%m-%dT%H:%M:%S%.6f"),
        handoff.from_agent,
        handoff.to_agent,
        handoff.message
    )
}

/// Append `line` plus a newline to `path`, creating the file and its parent
/// directory on demand.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    writeln!(file, "{line}").with_context(|| format!("appending to {}", path.display()))
}

/// Record a handoff in the shared log.
pub fn log_handoff(path: &Path, handoff: &Handoff) -> Result<()> {
    append_line(path, &handoff_line(Utc::now(), handoff))
}

/// Record the raw stop event, compacted onto one line, in the debug log.
pub fn log_stop_event(path: &Path, event: &serde_json::Value) -> Result<()> {
    let json = serde_json::to_string(event).context("serializing stop event")?;
    append_line(path, &json)
}
