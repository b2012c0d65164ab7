use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const TRIGGER_EXTENSION: &str = "trigger";
pub const MALFORMED_PREFIX: &str = "malformed-";

/// Well-known locations of the handoff files, all relative to the project
/// directory the hook runs in.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `.claude/triggers/` — pending `*.trigger` files.
    pub fn trigger_dir(&self) -> PathBuf {
        self.root.join(".claude").join("triggers")
    }

    /// `.claude/triggers/processed/` — archived and malformed triggers.
    pub fn processed_dir(&self) -> PathBuf {
        self.trigger_dir().join("processed")
    }

    pub fn handoff_log(&self) -> PathBuf {
        self.root.join(".claude").join("agent-handoff.log")
    }

    pub fn debug_log(&self) -> PathBuf {
        self.root.join("logs").join("stop.json")
    }

    pub fn preferences(&self) -> PathBuf {
        self.root.join(".claude").join("agent-handoff.toml")
    }

    /// Destination of a consumed trigger inside `processed/`.
    pub fn archived_path(&self, trigger: &Path) -> PathBuf {
        self.processed_dir().join(trigger.file_name().unwrap_or_default())
    }

    /// Destination of a quarantined trigger inside `processed/`.
    pub fn malformed_path(&self, trigger: &Path) -> PathBuf {
        let mut name = OsString::from(MALFORMED_PREFIX);
        name.push(trigger.file_name().unwrap_or_default());
        self.processed_dir().join(name)
    }
}

/// Create `path`'s parent directory if it doesn't exist yet.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    Ok(())
}

/// Move `from` to `to`, creating the destination directory on demand.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    ensure_parent(to)?;
    fs::rename(from, to)
        .with_context(|| format!("moving {} to {}", from.display(), to.display()))
}
