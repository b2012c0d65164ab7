use crate::layout::TRIGGER_EXTENSION;
use crate::types::{Handoff, Trigger};
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of reading a trigger file's bytes.
#[derive(Debug)]
pub enum TriggerParse {
    /// Valid JSON carrying every required field.
    Handoff(Handoff),
    /// Not JSON at all. The file gets quarantined instead of consumed.
    Malformed(serde_json::Error),
}

/// Classify the contents of a trigger file.
///
/// Syntax errors are not errors here: they come back as
/// [`TriggerParse::Malformed`]. Valid JSON that lacks a required field *is*
/// an error, and the caller is expected to leave the file where it is.
pub fn parse_trigger(contents: &[u8]) -> Result<TriggerParse> {
    let value: serde_json::Value = match serde_json::from_slice(contents) {
        Ok(v) => v,
        Err(e) => return Ok(TriggerParse::Malformed(e)),
    };
    let trigger: Trigger = serde_json::from_value(value).context("invalid trigger")?;
    Ok(TriggerParse::Handoff(trigger.into()))
}

/// Find the next pending trigger: the regular `*.trigger` file in `dir`
/// whose name sorts first. Returns `None` if `dir` doesn't exist or holds
/// no triggers.
pub fn find_next_trigger(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("listing {}", dir.display())),
    };

    let mut triggers = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let path = entry.path();
        let is_trigger = path.extension().is_some_and(|ext| ext == TRIGGER_EXTENSION);
        if is_trigger && path.is_file() {
            triggers.push(path);
        }
    }
    triggers.sort();
    Ok(triggers.into_iter().next())
}
