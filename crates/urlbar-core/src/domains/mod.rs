//! Registry of user-managed custom domains.
//!
//! [`DomainStore`] owns the ordered list of [`DomainEntry`] values and the
//! autocomplete flag. Readers take an immutable [`DomainSnapshot`]; writers
//! are serialized, persist through a [`StateBackend`], and only publish the
//! new snapshot once the backend accepted it.

mod backend;
mod watcher;

pub use backend::{JsonFileBackend, MemoryBackend, StateBackend};
pub use watcher::{DomainsWatcher, watch_domains_file};

use crate::{Error, Result};
use arc_swap::ArcSwap;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use urlbar_types::{DomainEntry, StoreState};

/// Immutable view of the store at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSnapshot {
    pub entries: Vec<DomainEntry>,
    pub enabled: bool,
}

impl DomainSnapshot {
    fn from_state(state: StoreState) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(state.custom_domains.len());

        for raw in state.custom_domains {
            match DomainEntry::parse(&raw) {
                Ok(entry) if seen.insert(entry.clone()) => entries.push(entry),
                Ok(entry) => warn!("Dropping duplicate persisted domain: {entry}"),
                Err(e) => warn!("Dropping invalid persisted domain: {e}"),
            }
        }

        Self {
            entries,
            enabled: state.autocomplete_enabled,
        }
    }

    fn to_state(&self) -> StoreState {
        StoreState {
            autocomplete_enabled: self.enabled,
            custom_domains: self.entries.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, entry: &DomainEntry) -> bool {
        self.entries.contains(entry)
    }

    fn position(&self, entry: &DomainEntry) -> Option<usize> {
        self.entries.iter().position(|e| e == entry)
    }
}

/// Custom domain registry with single-writer/multi-reader semantics
pub struct DomainStore {
    current: ArcSwap<DomainSnapshot>,
    writer: Mutex<()>,
    backend: Box<dyn StateBackend>,
}

impl DomainStore {
    /// Load the store from `backend`.
    ///
    /// Persisted entries are normalized; invalid and duplicate ones are
    /// dropped with a warning. Stored data that does not parse at all
    /// starts the store empty and disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn open(backend: impl StateBackend + 'static) -> Result<Self> {
        let state = match backend.load() {
            Ok(state) => state,
            Err(e) if e.is_corrupt_data() => {
                warn!("Starting with no custom domains: {e}");
                StoreState::default()
            }
            Err(e) => return Err(e),
        };
        let snapshot = DomainSnapshot::from_state(state);
        info!(
            "Loaded {} custom domains (autocomplete {})",
            snapshot.entries.len(),
            if snapshot.enabled { "enabled" } else { "disabled" }
        );

        Ok(Self {
            current: ArcSwap::from_pointee(snapshot),
            writer: Mutex::new(()),
            backend: Box::new(backend),
        })
    }

    /// Consistent view of entries and flag for the duration of one lookup.
    #[must_use]
    pub fn snapshot(&self) -> Arc<DomainSnapshot> {
        self.current.load_full()
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<DomainEntry> {
        self.current.load().entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.current.load().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.load().entries.is_empty()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.current.load().enabled
    }

    /// Normalize `candidate` and append it.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDomain`] if the candidate is empty after
    ///   normalization or contains whitespace
    /// - [`Error::Duplicate`] if the normalized domain is already present
    /// - [`Error::Persistence`] if the backend rejected the write; the
    ///   store is left unchanged
    pub fn add(&self, candidate: &str) -> Result<DomainEntry> {
        let entry = DomainEntry::parse(candidate).map_err(Error::InvalidDomain)?;

        self.mutate(|snapshot| {
            if snapshot.contains(&entry) {
                return Err(Error::Duplicate(entry.to_string()));
            }
            snapshot.entries.push(entry.clone());
            Ok(())
        })?;

        info!("Added custom domain: {entry}");
        Ok(entry)
    }

    /// Remove an entry by exact normalized match.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the entry is not present
    /// - [`Error::Persistence`] if the backend rejected the write
    pub fn remove(&self, entry: &DomainEntry) -> Result<()> {
        self.mutate(|snapshot| {
            let idx = snapshot
                .position(entry)
                .ok_or_else(|| Error::NotFound(entry.to_string()))?;
            snapshot.entries.remove(idx);
            Ok(())
        })?;

        info!("Removed custom domain: {entry}");
        Ok(())
    }

    /// Remove several entries in one persisted step.
    ///
    /// Either all entries are removed or none are.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] naming the first entry that is not present
    /// - [`Error::Persistence`] if the backend rejected the write
    pub fn remove_all(&self, entries: &[DomainEntry]) -> Result<usize> {
        let targets: HashSet<&DomainEntry> = entries.iter().collect();

        self.mutate(|snapshot| {
            if let Some(missing) = entries.iter().find(|e| !snapshot.contains(e)) {
                return Err(Error::NotFound(missing.to_string()));
            }
            snapshot.entries.retain(|e| !targets.contains(e));
            Ok(())
        })?;

        info!("Removed {} custom domains", targets.len());
        Ok(targets.len())
    }

    /// Move `entry` to `index`, clamped to the end of the list.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the entry is not present
    /// - [`Error::Persistence`] if the backend rejected the write
    pub fn move_to(&self, entry: &DomainEntry, index: usize) -> Result<()> {
        self.mutate(|snapshot| {
            let from = snapshot
                .position(entry)
                .ok_or_else(|| Error::NotFound(entry.to_string()))?;
            let moved = snapshot.entries.remove(from);
            let to = index.min(snapshot.entries.len());
            snapshot.entries.insert(to, moved);
            Ok(())
        })?;

        debug!("Moved custom domain {entry} to position {index}");
        Ok(())
    }

    /// Turn custom-domain completion on or off. Entries are kept either way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the backend rejected the write.
    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.mutate(|snapshot| {
            snapshot.enabled = enabled;
            Ok(())
        })?;

        info!(
            "Custom domain autocomplete {}",
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    /// Drop all entries and disable autocomplete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the backend rejected the write.
    pub fn reset(&self) -> Result<()> {
        self.mutate(|snapshot| {
            *snapshot = DomainSnapshot::default();
            Ok(())
        })?;

        info!("Custom domain settings reset");
        Ok(())
    }

    /// Replace in-memory state with what the backend currently holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or its data does not
    /// parse; the store is left unchanged.
    pub fn reload(&self) -> Result<()> {
        let _guard = self.lock_writer();
        let state = self.backend.load().inspect_err(|e| {
            warn!("Keeping current custom domains, reload failed: {e}");
        })?;
        let snapshot = DomainSnapshot::from_state(state);

        if *self.current.load_full() == snapshot {
            debug!("Reloaded custom domains, no changes");
        } else {
            info!("Reloaded {} custom domains", snapshot.entries.len());
            self.current.store(Arc::new(snapshot));
        }
        Ok(())
    }

    /// Apply `change` to a copy of the current state, persist it, then
    /// publish it. Nothing is published if `change` or the save fails.
    fn mutate<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut DomainSnapshot) -> Result<()>,
    {
        let _guard = self.lock_writer();

        let mut next = DomainSnapshot::clone(&self.current.load());
        change(&mut next)?;

        if let Err(e) = self.backend.save(&next.to_state()) {
            warn!("Failed to persist custom domains, keeping previous state: {e}");
            return Err(match e {
                Error::Persistence(_) => e,
                other => Error::persistence(other),
            });
        }

        self.current.store(Arc::new(next));
        Ok(())
    }

    fn lock_writer(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded value is (), so a poisoned lock holds no broken state
        self.writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl std::fmt::Debug for DomainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainStore")
            .field("current", &self.current.load_full())
            .finish_non_exhaustive()
    }
}
