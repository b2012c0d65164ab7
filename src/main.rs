//! Stop hook that hands work from one agent to the next.
//!
//! Reads the stop event from stdin, consumes the oldest pending
//! `.claude/triggers/*.trigger` file, and tells the operator which agent to
//! run next. Always exits 0 so it can never block the agent that stopped.

mod journal;
mod layout;
mod notify;
mod preferences;
mod processor;
mod summary;
mod trigger;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use layout::Layout;
use processor::{Options, Outcome, Processor};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use types::StopEvent;

#[derive(Debug, Parser)]
#[command(version, about = "Agent handoff stop hook")]
struct Cli {
    /// Project directory holding `.claude/` and `logs/` (defaults to cwd).
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Don't show a desktop notification.
    #[arg(long)]
    no_notify: bool,

    /// Trace every step to stderr.
    #[arg(long)]
    debug: bool,
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("agent_handoff=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let input = read_stdin().context("reading stdin")?;
    let event = StopEvent::parse(&input)?;
    tracing::debug!(
        session_id = ?event.session_id,
        hook_event_name = ?event.hook_event_name,
        cwd = ?event.cwd,
        stop_hook_active = ?event.stop_hook_active,
        "stop event received"
    );

    let root = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("resolving working directory")?,
    };
    let options = Options {
        no_notify: cli.no_notify,
        webhook_url: notify::webhook_url_from_env(),
    };
    let processor = Processor::open(Layout::new(root), options);

    match processor.run(&event)? {
        Outcome::HandedOff { handoff, archived } => {
            tracing::debug!(archived = %archived.display(), "trigger archived");
            eprint!("{}", summary::handoff_banner(&handoff, &processor.prefs.run_hint));
            eprintln!();
        }
        Outcome::Quarantined { original, archived } => {
            tracing::debug!(
                original = %original.display(),
                archived = %archived.display(),
                "malformed trigger quarantined"
            );
        }
        Outcome::NoTrigger => {}
    }
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("Stop hook error: {err}");
            return;
        }
    };
    init_tracing(cli.debug);

    if let Err(err) = run(cli) {
        eprintln!("Stop hook error: {err:#}");
    }
}
