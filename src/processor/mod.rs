use crate::journal;
use crate::layout::{Layout, move_file};
use crate::notify;
use crate::preferences::Preferences;
use crate::trigger::{TriggerParse, find_next_trigger, parse_trigger};
use crate::types::{Handoff, StopEvent};
use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Switches decided outside the project (CLI flags, environment).
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Skip the desktop notification regardless of preferences.
    pub no_notify: bool,
    /// Webhook endpoint; `None` means no network traffic at all.
    pub webhook_url: Option<String>,
}

/// What a single invocation ended up doing.
#[derive(Debug)]
pub enum Outcome {
    /// No pending trigger file.
    NoTrigger,
    /// A well-formed trigger was logged and archived.
    HandedOff { handoff: Handoff, archived: PathBuf },
    /// A trigger that wasn't JSON was moved aside as `malformed-<name>`.
    Quarantined { original: PathBuf, archived: PathBuf },
}

/// One run of the stop hook against a project directory.
pub struct Processor {
    layout: Layout,
    options: Options,
    pub prefs: Preferences,
}

impl Processor {
    /// Load preferences for `layout` and return a `Processor` ready to run.
    ///
    /// Broken preferences are reported and replaced with defaults rather
    /// than blocking the handoff.
    pub fn open(layout: Layout, options: Options) -> Self {
        let prefs = Preferences::load(&layout.preferences()).unwrap_or_else(|err| {
            eprintln!("Warning: {err:#}; using default preferences");
            Preferences::default()
        });
        Self {
            layout,
            options,
            prefs,
        }
    }

    /// Record the stop event, then consume at most one pending trigger.
    pub fn run(&self, event: &StopEvent) -> Result<Outcome> {
        journal::log_stop_event(&self.layout.debug_log(), &event.raw)?;

        let Some(path) = find_next_trigger(&self.layout.trigger_dir())? else {
            tracing::debug!("no pending triggers");
            return Ok(Outcome::NoTrigger);
        };
        tracing::debug!(trigger = %path.display(), "processing trigger");

        let contents =
            fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        match parse_trigger(&contents)
            .with_context(|| format!("processing {}", path.display()))?
        {
            TriggerParse::Malformed(err) => {
                eprintln!("Warning: Malformed trigger file {}: {err}", path.display());
                let archived = self.layout.malformed_path(&path);
                move_file(&path, &archived)?;
                Ok(Outcome::Quarantined {
                    original: path,
                    archived,
                })
            }
            TriggerParse::Handoff(handoff) => {
                let archived = self.consume(&path, &handoff)?;
                self.notify(&handoff);
                Ok(Outcome::HandedOff { handoff, archived })
            }
        }
    }

    /// Log the handoff and move the trigger into `processed/`. After the
    /// rename the trigger can't be picked up again.
    fn consume(&self, path: &Path, handoff: &Handoff) -> Result<PathBuf> {
        journal::log_handoff(&self.layout.handoff_log(), handoff)?;
        let archived = self.layout.archived_path(path);
        move_file(path, &archived)?;
        Ok(archived)
    }

    /// Fire both notifications. Failures are only visible in debug traces.
    fn notify(&self, handoff: &Handoff) {
        if self.prefs.desktop_notifications && !self.options.no_notify {
            if let Err(err) = notify::send_desktop(handoff, &self.prefs.notification_sound) {
                tracing::debug!("desktop notification failed: {err:#}");
            }
        }

        if let Some(url) = &self.options.webhook_url {
            let payload = notify::webhook_payload(handoff, &self.prefs.webhook_footer, Utc::now());
            if let Err(err) = notify::send_webhook(url, &payload) {
                tracing::debug!("webhook failed: {err:#}");
            }
        }
    }
}
