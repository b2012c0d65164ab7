use serde::{Deserialize, Serialize};

pub const UNKNOWN_AGENT: &str = "unknown";

// ===================================================================
// Stop event (received via stdin)
// ===================================================================

/// The JSON the hook runner pipes in when an agent session stops.
///
/// Only top-level JSON validity is required; the raw value is what gets
/// written to the debug log. The typed fields are picked out for tracing.
#[derive(Debug, Clone)]
pub struct StopEvent {
    pub raw: serde_json::Value,
    pub session_id: Option<String>,
    pub hook_event_name: Option<String>,
    pub cwd: Option<String>,
    pub stop_hook_active: Option<bool>,
}

impl StopEvent {
    pub fn parse(input: &str) -> serde_json::Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(input)?;
        let str_field = |key: &str| raw.get(key).and_then(|v| v.as_str()).map(String::from);
        Ok(Self {
            session_id: str_field("session_id"),
            hook_event_name: str_field("hook_event_name"),
            cwd: str_field("cwd"),
            stop_hook_active: raw.get("stop_hook_active").and_then(|v| v.as_bool()),
            raw,
        })
    }
}

// ===================================================================
// Trigger file
// ===================================================================

/// A pending handoff request written by an upstream agent as
/// `.claude/triggers/<name>.trigger`.
///
/// `to_agent`, `command` and `message` are required; a trigger missing any
/// of them fails to deserialize.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Trigger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_agent: Option<String>,
    pub to_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    pub message: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// The parts of a trigger everything downstream of parsing works with.
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub from_agent: String,
    pub to_agent: String,
    pub message: String,
    pub command: String,
    pub action: Option<String>,
}

impl From<Trigger> for Handoff {
    fn from(t: Trigger) -> Self {
        Self {
            from_agent: t.from_agent.unwrap_or_else(|| UNKNOWN_AGENT.into()),
            to_agent: t.to_agent,
            message: t.message,
            command: t.command,
            action: t.action,
        }
    }
}
