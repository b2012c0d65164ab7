#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const STOP_EVENT: &str = r#"{
    "session_id": "test-session",
    "transcript_path": "/tmp/t.jsonl",
    "cwd": "/tmp",
    "permission_mode": "default",
    "hook_event_name": "Stop",
    "stop_hook_active": false
}"#;

/// Run the binary in `project` with `stdin_json` piped in.
///
/// Desktop notifications are disabled and the webhook variable is cleared
/// unless `webhook_url` is given.
pub fn run_cli(project: &Path, stdin_json: &str, webhook_url: Option<&str>) -> (i32, String, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_agent-handoff"));
    cmd.arg("--no-notify")
        .current_dir(project)
        .env_remove("DISCORD_WEBHOOK_URL")
        .env_remove("RUST_LOG");
    if let Some(url) = webhook_url {
        cmd.env("DISCORD_WEBHOOK_URL", url);
    }
    spawn_with_stdin(&mut cmd, stdin_json)
}

pub fn spawn_with_stdin(cmd: &mut Command, stdin_json: &str) -> (i32, String, String) {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin_json.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

pub fn trigger_dir(project: &Path) -> PathBuf {
    project.join(".claude").join("triggers")
}

pub fn processed_dir(project: &Path) -> PathBuf {
    trigger_dir(project).join("processed")
}

pub fn handoff_log(project: &Path) -> PathBuf {
    project.join(".claude").join("agent-handoff.log")
}

/// Write a trigger file into the project's trigger directory.
pub fn write_trigger(project: &Path, name: &str, body: &str) -> PathBuf {
    let dir = trigger_dir(project);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

/// A trigger file name that sorts after anything written earlier in the test.
pub fn unique_trigger_name(prefix: &str) -> String {
    format!("{prefix}-{}.trigger", uuid::Uuid::new_v4())
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|s| s.lines().map(String::from).collect())
        .unwrap_or_default()
}
