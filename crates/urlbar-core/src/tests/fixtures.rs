//! Test fixtures and helpers

use crate::completion::{BuiltinTable, CompletionProvider};
use crate::config::CompletionConfig;
use crate::controller::CompletionController;
use crate::domains::{DomainStore, MemoryBackend, StateBackend};
use crate::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use urlbar_types::StoreState;

/// Backend whose saves can be switched to fail, for rollback tests.
/// Clones share the same switch and storage.
#[derive(Clone, Default)]
pub struct FlakyBackend {
    inner: Arc<MemoryBackend>,
    failing: Arc<AtomicBool>,
}

impl FlakyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self) -> StoreState {
        self.inner.stored()
    }

    /// Replace what is stored without going through a store
    pub fn overwrite(&self, state: &StoreState) {
        self.inner.save(state).unwrap();
    }
}

impl StateBackend for FlakyBackend {
    fn load(&self) -> Result<StoreState> {
        self.inner.load()
    }

    fn save(&self, state: &StoreState) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::persistence("disk unavailable"));
        }
        self.inner.save(state)
    }
}

/// Open a store over a fresh memory backend with the given state
pub fn make_store(enabled: bool, domains: &[&str]) -> Arc<DomainStore> {
    let state = StoreState {
        autocomplete_enabled: enabled,
        custom_domains: domains.iter().map(ToString::to_string).collect(),
    };
    Arc::new(DomainStore::open(MemoryBackend::with_state(state)).unwrap())
}

/// Small table so tests don't depend on the shipped list
pub fn make_table(text: &str) -> &'static BuiltinTable {
    Box::leak(Box::new(BuiltinTable::parse(text)))
}

pub fn make_provider(store: Arc<DomainStore>, config: CompletionConfig) -> CompletionProvider {
    CompletionProvider::with_table(
        make_table("mozilla mozilla.org\ngoogle.com\ngithub.com"),
        store,
        config,
    )
}

pub fn make_controller(enabled: bool, domains: &[&str]) -> CompletionController {
    CompletionController::new(make_provider(
        make_store(enabled, domains),
        CompletionConfig::default(),
    ))
}
