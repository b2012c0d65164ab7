//! Best-effort operator notifications: a local desktop notification and an
//! optional webhook. Both return errors so callers can trace them, but the
//! processor never lets those errors escape.

use crate::types::Handoff;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(2);
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);
pub const WEBHOOK_ENV: &str = "DISCORD_WEBHOOK_URL";

const EMBED_COLOR: u32 = 3_447_003;
const POLL_INTERVAL: Duration = Duration::from_millis(20);

// ===================================================================
// Desktop notification
// ===================================================================

pub fn notification_title(to_agent: &str) -> String {
    format!("Agent Handoff: {to_agent}")
}

/// Quote `s` as an AppleScript string literal.
fn applescript_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Program and arguments for the platform's notification tool.
#[cfg(target_os = "macos")]
pub fn notification_argv(title: &str, body: &str, sound: &str) -> (&'static str, Vec<String>) {
    let script = format!(
        "display notification {} with title {} sound name {}",
        applescript_string(body),
        applescript_string(title),
        applescript_string(sound)
    );
    ("osascript", vec!["-e".into(), script])
}

/// Program and arguments for the platform's notification tool.
#[cfg(not(target_os = "macos"))]
pub fn notification_argv(title: &str, body: &str, sound: &str) -> (&'static str, Vec<String>) {
    (
        "notify-send",
        vec![
            format!("--hint=string:sound-name:{sound}"),
            title.into(),
            body.into(),
        ],
    )
}

/// Run `cmd` with all stdio discarded, killing it if it outlives `timeout`.
pub fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<ExitStatus> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("spawning {:?}", cmd.get_program()))?;

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().context("waiting for child")? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            // The child may have exited on its own since try_wait.
            let _ = child.kill();
            let _ = child.wait();
            bail!("{:?} timed out after {timeout:?}", cmd.get_program());
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Show a desktop notification for `handoff`.
pub fn send_desktop(handoff: &Handoff, sound: &str) -> Result<()> {
    let title = notification_title(&handoff.to_agent);
    let (program, args) = notification_argv(&title, &handoff.message, sound);
    let status = run_with_timeout(Command::new(program).args(&args), NOTIFY_TIMEOUT)?;
    if !status.success() {
        bail!("{program} exited with {status}");
    }
    Ok(())
}

// ===================================================================
// Webhook
// ===================================================================

/// The configured webhook URL, if any. An empty value counts as unset.
pub fn webhook_url_from_env() -> Option<String> {
    std::env::var(WEBHOOK_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Build the rich-embed payload for a handoff.
pub fn webhook_payload(handoff: &Handoff, footer: &str, at: DateTime<Utc>) -> serde_json::Value {
    json!({
        "embeds": [{
            "title": format!("🤖 {}", notification_title(&handoff.to_agent)),
            "description": handoff.message,
            "color": EMBED_COLOR,
            "fields": [
                { "name": "From Agent", "value": handoff.from_agent, "inline": true },
                { "name": "To Agent", "value": handoff.to_agent, "inline": true },
                {
                    "name": "Next Action",
                    "value": format!("```bash\n{}\n```", handoff.command),
                    "inline": false
                }
            ],
            "timestamp": at.to_rfc3339_opts(SecondsFormat::Millis, true),
            "footer": { "text": footer }
        }]
    })
}

/// POST `payload` to `url`. Anything but 204 No Content is an error.
pub fn send_webhook(url: &str, payload: &serde_json::Value) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(WEBHOOK_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;
    let resp = client
        .post(url)
        .json(payload)
        .send()
        .context("posting webhook")?;
    let status = resp.status();
    if status != reqwest::StatusCode::NO_CONTENT {
        bail!("webhook returned {status}");
    }
    Ok(())
}
