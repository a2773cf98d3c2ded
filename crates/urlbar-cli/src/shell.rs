//! Interactive address bar.
//!
//! Every keystroke goes through [`CompletionController::on_text_changed`];
//! the remainder is drawn in reverse video after the cursor, like a
//! selection. Enter accepts the hint, Right/End accepts it for further
//! editing. Lines starting with `:` manage custom domains the way the
//! settings screen would.

use crate::App;
use anyhow::Result;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow;
use std::cell::RefCell;
use tracing::warn;
use urlbar_core::domains::watch_domains_file;
use urlbar_core::{CompletionController, DomainEntry, DomainStore};

const PROMPT: &str = "url> ";

struct AddressBarHelper {
    controller: RefCell<CompletionController>,
}

impl Completer for AddressBarHelper {
    type Candidate = String;
}

impl Hinter for AddressBarHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        // Inline completion only makes sense with the caret at the end
        if pos < line.len() {
            return None;
        }
        let mut controller = self.controller.borrow_mut();
        controller.on_text_changed(line);
        controller.hint().map(ToOwned::to_owned)
    }
}

impl Highlighter for AddressBarHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[7m{hint}\x1b[0m"))
    }
}

impl Validator for AddressBarHelper {}

impl Helper for AddressBarHelper {}

/// Outcome of a `:` command line
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Add(&'a str),
    Remove(&'a str),
    Enable,
    Disable,
    List,
    Help,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Option<ShellCommand<'_>> {
    let rest = line.strip_prefix(':')?;
    let mut parts = rest.split_whitespace();
    let cmd = parts.next().unwrap_or("");
    let arg = parts.next();

    Some(match (cmd, arg) {
        ("add", Some(domain)) => ShellCommand::Add(domain),
        ("rm" | "remove", Some(domain)) => ShellCommand::Remove(domain),
        ("enable", None) => ShellCommand::Enable,
        ("disable", None) => ShellCommand::Disable,
        ("list" | "ls", None) => ShellCommand::List,
        ("help" | "h", None) => ShellCommand::Help,
        _ => ShellCommand::Unknown(rest),
    })
}

/// Apply a `:` command. User errors become a message, never an exit.
fn apply_command(store: &DomainStore, command: &ShellCommand<'_>) -> String {
    let outcome = match command {
        ShellCommand::Add(domain) => store.add(domain).map(|e| format!("Added {e}")),
        ShellCommand::Remove(domain) => match DomainEntry::parse(domain) {
            Ok(entry) => store.remove(&entry).map(|()| format!("Removed {entry}")),
            Err(e) => Ok(format!("Invalid domain: {e}")),
        },
        ShellCommand::Enable => store
            .set_enabled(true)
            .map(|()| "Custom autocomplete enabled".to_string()),
        ShellCommand::Disable => store
            .set_enabled(false)
            .map(|()| "Custom autocomplete disabled".to_string()),
        ShellCommand::List => {
            let entries: Vec<String> = store.list().iter().map(ToString::to_string).collect();
            Ok(if entries.is_empty() {
                "(no custom domains)".to_string()
            } else {
                entries.join("\n")
            })
        }
        ShellCommand::Help => Ok(
            ":add DOMAIN  :rm DOMAIN  :enable  :disable  :list  (Ctrl-D to quit)".to_string(),
        ),
        ShellCommand::Unknown(text) => Ok(format!("Unknown command: :{text}")),
    };

    outcome.unwrap_or_else(|e| {
        if !e.is_user_error() {
            warn!("Shell command failed: {e}");
        }
        e.to_string()
    })
}

pub fn run(app: &App) -> Result<()> {
    let _watcher = match watch_domains_file(&app.domains_file, app.store.clone()) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!("Not watching domains file: {e}");
            None
        }
    };

    let mut rl: Editor<AddressBarHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(AddressBarHelper {
        controller: RefCell::new(app.controller()),
    }));

    println!("Type a site and press Enter. :help for commands, Ctrl-D to quit.");

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if let Some(command) = parse_command(line) {
                    println!("{}", apply_command(&app.store, &command));
                    continue;
                }

                let Some(helper) = rl.helper() else {
                    continue;
                };
                let mut controller = helper.controller.borrow_mut();
                controller.on_text_changed(line);
                if let Some(url) = controller.commit() {
                    println!("Navigating to {url}");
                }
                controller.on_clear();
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
