//! urlbar CLI
//!
//! Address bar completion from the terminal. Provides:
//! - One-shot completion of partial input
//! - Custom domain management and the autocomplete toggle
//! - An interactive address bar with inline hints

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use urlbar_core::config::{Config, Directories};
use urlbar_core::domains::{DomainStore, JsonFileBackend};
use urlbar_core::{BuiltinTable, CompletionController, CompletionProvider, DomainEntry};

mod shell;

/// urlbar - address bar completion and custom domains
#[derive(Parser)]
#[command(name = "urlbar")]
#[command(version, about)]
#[command(after_help = "\
Examples:
  urlbar complete moz             Prints mozilla.org
  urlbar domains add 680news.com  Add a custom domain
  urlbar autocomplete enable      Use custom domains for completion
  urlbar complete 68              Prints 680news.com
  urlbar shell                    Interactive address bar
")]
struct Cli {
    /// Use this directory for config.json and custom-domains.json
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print what the address field shows after typing TEXT
    Complete {
        text: String,

        /// Print the completion result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage custom domains
    Domains {
        #[command(subcommand)]
        command: DomainsCommand,
    },

    /// Turn custom domain completion on or off
    Autocomplete {
        #[command(subcommand)]
        command: AutocompleteCommand,
    },

    /// List shipped builtin domains
    Builtin {
        /// Only entries matching this prefix
        prefix: Option<String>,
    },

    /// Interactive address bar with inline completion
    Shell,
}

#[derive(Subcommand)]
enum DomainsCommand {
    /// List custom domains in order
    List,

    /// Add a custom domain
    Add { domain: String },

    /// Remove one or more custom domains
    Remove {
        #[arg(required = true)]
        domains: Vec<String>,
    },

    /// Move a custom domain to a position (0 = first)
    Move { domain: String, index: usize },

    /// Remove all custom domains and disable autocomplete
    Reset,
}

#[derive(Subcommand)]
enum AutocompleteCommand {
    Enable,
    Disable,
    Status,
}

/// Filter used when `RUST_LOG` is unset: debug in debug builds, warn in
/// release so one-shot commands keep stderr quiet.
fn default_log_directive() -> &'static str {
    if cfg!(debug_assertions) {
        "urlbar=debug"
    } else {
        "urlbar=warn"
    }
}

/// Set up logging on stderr; stdout is reserved for command output.
/// In debug builds, also logs to a timestamped file.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_directive()));

    if cfg!(debug_assertions) {
        let temp_dir = std::env::temp_dir();
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("urlbar-{timestamp}.log");

        let file_appender = tracing_appender::rolling::never(&temp_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        std::mem::forget(guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .init();
    }
}

/// Everything a command needs: resolved paths, config and the open store
struct App {
    config: Config,
    domains_file: PathBuf,
    store: Arc<DomainStore>,
}

impl App {
    fn open(config_dir: Option<PathBuf>) -> Result<Self> {
        let dirs = config_dir.map_or_else(Directories::new, Directories::with_base);

        let config = Config::load(&dirs.config_file)
            .with_context(|| format!("Failed to load {}", dirs.config_file.display()))?;
        let domains_file = config.domains_file_or(&dirs.domains_file);
        debug!("Using domains file {}", domains_file.display());

        let store = DomainStore::open(JsonFileBackend::new(&domains_file))
            .with_context(|| format!("Failed to open {}", domains_file.display()))?;

        Ok(Self {
            config,
            domains_file,
            store: Arc::new(store),
        })
    }

    fn controller(&self) -> CompletionController {
        CompletionController::new(CompletionProvider::new(
            Arc::clone(&self.store),
            self.config.completion.clone(),
        ))
    }
}

fn parse_entry(domain: &str) -> Result<DomainEntry> {
    DomainEntry::parse(domain).map_err(|e| urlbar_core::Error::InvalidDomain(e).into())
}

fn run_complete(app: &App, text: &str, json: bool) -> Result<()> {
    let mut controller = app.controller();
    controller.on_text_changed(text);

    if json {
        let result = controller.provider().complete(text);
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", controller.text());
    }
    Ok(())
}

fn run_domains(app: &App, command: DomainsCommand) -> Result<()> {
    match command {
        DomainsCommand::List => {
            for entry in app.store.list() {
                println!("{entry}");
            }
        }
        DomainsCommand::Add { domain } => {
            let entry = app.store.add(&domain)?;
            println!("Added {entry}");
            if !app.store.is_enabled() {
                println!("Note: autocomplete is disabled (urlbar autocomplete enable)");
            }
        }
        DomainsCommand::Remove { domains } => {
            let entries = domains
                .iter()
                .map(String::as_str)
                .map(parse_entry)
                .collect::<Result<Vec<_>>>()?;
            let removed = app.store.remove_all(&entries)?;
            println!("Removed {removed} domain(s)");
        }
        DomainsCommand::Move { domain, index } => {
            app.store.move_to(&parse_entry(&domain)?, index)?;
        }
        DomainsCommand::Reset => {
            app.store.reset()?;
            println!("Custom domains cleared");
        }
    }
    Ok(())
}

fn run_autocomplete(app: &App, command: &AutocompleteCommand) -> Result<()> {
    match command {
        AutocompleteCommand::Enable => app.store.set_enabled(true)?,
        AutocompleteCommand::Disable => app.store.set_enabled(false)?,
        AutocompleteCommand::Status => {}
    }
    println!(
        "Custom autocomplete: {} ({} domains)",
        if app.store.is_enabled() { "enabled" } else { "disabled" },
        app.store.len()
    );
    Ok(())
}

fn run_builtin(prefix: Option<&str>) {
    for entry in BuiltinTable::shipped().entries() {
        let matches = prefix.is_none_or(|p| {
            entry.key.starts_with(&p.to_lowercase()) || entry.canonical.starts_with(&p.to_lowercase())
        });
        if !matches {
            continue;
        }
        if entry.key == entry.canonical {
            println!("{}", entry.canonical);
        } else {
            println!("{} -> {}", entry.key, entry.canonical);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging();

    if let Commands::Builtin { prefix } = &cli.command {
        run_builtin(prefix.as_deref());
        return Ok(());
    }

    let app = App::open(cli.config_dir)?;
    info!("urlbar started");

    match cli.command {
        Commands::Complete { text, json } => run_complete(&app, &text, json),
        Commands::Domains { command } => run_domains(&app, command),
        Commands::Autocomplete { command } => run_autocomplete(&app, &command),
        Commands::Shell => shell::run(&app),
        Commands::Builtin { .. } => Ok(()),
    }
}
