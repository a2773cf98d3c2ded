//! Reloads a [`DomainStore`] when its file changes on disk.

use super::DomainStore;
use crate::{Error, Result};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

const DOMAINS_DEBOUNCE_DURATION: Duration = Duration::from_millis(500);

/// Keeps the file watch alive; dropping it stops reloading.
pub struct DomainsWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
}

/// Watch `path` and call [`DomainStore::reload`] whenever it is created or
/// modified by anyone, including other processes.
///
/// The parent directory is created if missing so the watch can be set up
/// before the first save.
///
/// # Errors
///
/// Returns an error if `path` has no file name or the watch cannot be
/// registered.
pub fn watch_domains_file(path: &Path, store: Arc<DomainStore>) -> Result<DomainsWatcher> {
    let file_name = path
        .file_name()
        .map(ToOwned::to_owned)
        .ok_or_else(|| Error::Config(format!("Invalid domains path: {}", path.display())))?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)?;

    let mut debouncer = new_debouncer(
        DOMAINS_DEBOUNCE_DURATION,
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                if events
                    .iter()
                    .any(|e| e.path.file_name() == Some(file_name.as_os_str()))
                {
                    debug!("Domains file changed, reloading");
                    if let Err(e) = store.reload() {
                        error!("Failed to reload custom domains: {e}");
                    }
                }
            }
            Err(e) => error!("Domains watcher error: {e}"),
        },
    )?;

    debouncer
        .watcher()
        .watch(&parent, RecursiveMode::NonRecursive)?;
    info!("Watching domains directory: {}", parent.display());

    Ok(DomainsWatcher {
        _debouncer: debouncer,
    })
}
