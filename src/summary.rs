use crate::types::Handoff;
use anyhow::{Context, Result};
use minijinja::{Environment, context};

const RULE_WIDTH: usize = 50;

/// Render the follow-up hint template (e.g. `starforge use {{ agent }}`).
pub fn render_run_hint(template: &str, handoff: &Handoff) -> Result<String> {
    let env = Environment::new();
    let tmpl = env
        .template_from_str(template)
        .context("parsing run hint template")?;
    tmpl.render(context! {
        agent => handoff.to_agent,
        from => handoff.from_agent,
        message => handoff.message,
        command => handoff.command,
        action => handoff.action,
    })
    .context("rendering run hint template")
}

/// The banner printed to stderr once a handoff has been processed.
///
/// A broken hint template falls back to the trigger's own `command`, so a
/// typo in the preferences never hides the handoff.
pub fn handoff_banner(handoff: &Handoff, run_hint_template: &str) -> String {
    let hint = render_run_hint(run_hint_template, handoff).unwrap_or_else(|err| {
        tracing::debug!("run hint fallback: {err:#}");
        handoff.command.clone()
    });
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "\n{rule}\n🤖 AGENT HANDOFF READY\n{rule}\nNext Agent: {}\nAction: {}\n\nRun: {hint}\n{rule}\n",
        handoff.to_agent, handoff.message
    )
}
