//! Alfred script-filter entry point.
//!
//! # Responsibility
//! - Adapt argv/env input into one router invocation and print the
//!   response document to stdout.
//! - Render uncaught errors as a single non-actionable item and exit
//!   non-zero.

mod alfred_env;

use clap::{Parser, Subcommand};
use std::error::Error;
use std::fmt::Write as _;
use vaultflow_core::{
    default_log_level, icons, init_logging, route_notes, route_vaults, ConfigStore,
    FsObsidianConfig, Item, ItemText, OutputDocument, RouterOutcome, ScreenError, SessionState,
    SpotlightSearcher, VaultRegistry,
};

#[derive(Debug, Parser)]
#[command(name = "vaultflow", version, about = "Alfred workflow for Obsidian vaults")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Vault management script filter.
    Vaults {
        #[arg(default_value = "")]
        input: String,
    },
    /// Note search script filter for the active vault.
    Notes {
        #[arg(default_value = "")]
        input: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let data_dir = alfred_env::data_dir();
    let level = if alfred_env::is_debug() {
        "debug"
    } else {
        default_log_level()
    };
    if let Err(err) = init_logging(level, &data_dir) {
        // Logging is diagnostics only; a broken data dir must not take
        // down the screen render.
        eprintln!("vaultflow: logging disabled: {err}");
    }

    let mut session = SessionState::parse(&alfred_env::session_raw());
    let registry = VaultRegistry::new(ConfigStore::new(&data_dir));

    match run(&cli.command, &mut session, &registry) {
        Ok(document) => println!("{}", document.to_json_pretty()),
        Err(err) => {
            log::error!("event=invocation module=cli status=error error={err}");
            let document = error_document(&session, &err);
            println!("{}", document.to_json_pretty());
            std::process::exit(1);
        }
    }
}

fn run(
    command: &Command,
    session: &mut SessionState,
    registry: &VaultRegistry,
) -> Result<OutputDocument, ScreenError> {
    let outcome = match command {
        Command::Vaults { input } => {
            let action = session.action();
            route_vaults(action, input.trim(), registry, &FsObsidianConfig)?
        }
        Command::Notes { input } => {
            route_notes(input.trim(), session, registry, &SpotlightSearcher)?
        }
    };

    Ok(match outcome {
        RouterOutcome::Render(items) => OutputDocument::render(session, &items),
        RouterOutcome::Continue(next) => {
            session.set_action(&next);
            OutputDocument::rerun(session)
        }
    })
}

/// Formats an uncaught error as the single item the host shows instead
/// of a screen.
fn error_document(session: &SessionState, err: &dyn Error) -> OutputDocument {
    let formatted = format_error(err);
    let item = Item::new(err.to_string())
        .subtitle("Press ⌘L to see the full error and ⌘C to copy it.")
        .valid(false)
        .icon(icons::close())
        .text(ItemText {
            copy: Some(formatted.clone()),
            largetype: Some(formatted),
        });
    OutputDocument::render(session, &[item])
}

/// Error chain plus workflow/host identity for bug reports.
fn format_error(err: &dyn Error) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{err}");

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(out, "  caused by: {cause}");
        source = cause.source();
    }

    let _ = writeln!(out, "-");
    let _ = writeln!(
        out,
        "Workflow: {} (v. {})",
        alfred_env::workflow_name(),
        alfred_env::workflow_version().unwrap_or_else(|| "0.0.0".to_string())
    );
    let _ = write!(
        out,
        "Alfred: {}",
        alfred_env::alfred_version().unwrap_or_else(|| "unknown".to_string())
    );
    out
}
