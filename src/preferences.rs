use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

const DEFAULT_SOUND: &str = "Purr";
const DEFAULT_FOOTER: &str = "StarForge Agent System";
const DEFAULT_RUN_HINT: &str = "starforge use {{ agent }}";

/// User-facing preferences stored in `.claude/agent-handoff.toml`.
///
/// ```toml
/// desktop_notifications = true
/// notification_sound = "Glass"
/// webhook_footer = "My Team"
/// run_hint = "starforge use {{ agent }}"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    /// Whether to pop a local desktop notification for each handoff.
    #[serde(default = "default_true")]
    pub desktop_notifications: bool,

    /// Sound name passed to the notification tool.
    #[serde(default = "default_sound")]
    pub notification_sound: String,

    /// Footer text of the webhook embed.
    #[serde(default = "default_footer")]
    pub webhook_footer: String,

    /// Jinja2 template for the follow-up command printed in the summary.
    /// Variables: `agent`, `from`, `message`, `command`, `action`.
    #[serde(default = "default_run_hint")]
    pub run_hint: String,
}

fn default_true() -> bool {
    true
}

fn default_sound() -> String {
    DEFAULT_SOUND.into()
}

fn default_footer() -> String {
    DEFAULT_FOOTER.into()
}

fn default_run_hint() -> String {
    DEFAULT_RUN_HINT.into()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            desktop_notifications: default_true(),
            notification_sound: default_sound(),
            webhook_footer: default_footer(),
            run_hint: default_run_hint(),
        }
    }
}

impl Preferences {
    /// Load preferences from `path`.
    ///
    /// A missing file means defaults; the hook never writes one itself so it
    /// leaves no trace in projects that don't opt in. Missing keys in an
    /// existing file are filled in with defaults via serde.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("parsing {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }
}
