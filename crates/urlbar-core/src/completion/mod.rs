//! Inline domain completion.
//!
//! [`CompletionProvider`] answers "what should this partial host complete
//! to?" by checking the [`BuiltinTable`] and the custom entries of a
//! [`DomainStore`], in the order the configured [`Precedence`] dictates.

mod builtin;

pub use builtin::{BuiltinEntry, BuiltinTable};

use crate::config::{CompletionConfig, Precedence};
use crate::domains::{DomainSnapshot, DomainStore};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;
use urlbar_types::{CompletionResult, CompletionSource, strip_prefix_ignore_case};

const WWW: &str = "www.";

static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*://").expect("scheme pattern is valid")
});

/// Whether `text` carries an explicit `scheme://`.
#[must_use]
pub fn has_scheme(text: &str) -> bool {
    SCHEME_RE.is_match(text)
}

/// Whether `text` could be the start of a bare host name.
///
/// Anything with a scheme, whitespace (a search query), or URL punctuation
/// (path, query, fragment, port, userinfo) is a full address or a search,
/// never a partial host.
#[must_use]
pub fn is_partial_host(text: &str) -> bool {
    !text.is_empty()
        && !has_scheme(text)
        && !text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | ':' | '@'))
}

/// Completes partial host input from builtin and custom domains
pub struct CompletionProvider {
    builtin: &'static BuiltinTable,
    store: Arc<DomainStore>,
    config: CompletionConfig,
}

impl CompletionProvider {
    /// Provider over the shipped builtin table.
    #[must_use]
    pub fn new(store: Arc<DomainStore>, config: CompletionConfig) -> Self {
        Self::with_table(BuiltinTable::shipped(), store, config)
    }

    #[must_use]
    pub fn with_table(
        builtin: &'static BuiltinTable,
        store: Arc<DomainStore>,
        config: CompletionConfig,
    ) -> Self {
        Self {
            builtin,
            store,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<DomainStore> {
        &self.store
    }

    /// Suggest a completion for `prefix`, or `None`.
    ///
    /// Empty input and anything that is not a bare partial host (see
    /// [`is_partial_host`]) never complete. Custom entries are only
    /// consulted while the store is enabled.
    #[must_use]
    pub fn complete(&self, prefix: &str) -> Option<CompletionResult> {
        if !is_partial_host(prefix) {
            debug!("No completion for {prefix:?}: not a partial host");
            return None;
        }

        let snapshot = self.store.snapshot();

        let result = match self.config.precedence {
            Precedence::BuiltinFirst => self
                .complete_builtin(prefix)
                .or_else(|| self.complete_custom(prefix, &snapshot)),
            Precedence::CustomFirst => self
                .complete_custom(prefix, &snapshot)
                .or_else(|| self.complete_builtin(prefix)),
        };

        match &result {
            Some(r) => debug!("Completed {prefix:?} -> {:?} ({:?})", r.completion, r.source),
            None => debug!("No completion for {prefix:?}"),
        }
        result
    }

    fn complete_builtin(&self, prefix: &str) -> Option<CompletionResult> {
        if !self.config.builtin_enabled {
            return None;
        }

        self.with_www(prefix, |p| self.builtin.lookup(p).map(ToOwned::to_owned))
            .map(|completion| result(prefix, completion, CompletionSource::Builtin))
    }

    fn complete_custom(&self, prefix: &str, snapshot: &DomainSnapshot) -> Option<CompletionResult> {
        if !snapshot.enabled {
            return None;
        }

        self.with_www(prefix, |p| {
            snapshot
                .entries
                .iter()
                .find(|e| strip_prefix_ignore_case(e.as_str(), p).is_some())
                .map(ToString::to_string)
        })
        .map(|completion| result(prefix, completion, CompletionSource::Custom))
    }

    /// Run `lookup` on the literal prefix, then, if the user typed `www.`
    /// and `match_www` is on, on the rest with `www.` put back in front of
    /// the answer.
    fn with_www(
        &self,
        prefix: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Option<String> {
        lookup(prefix).or_else(|| {
            if !self.config.match_www {
                return None;
            }
            let rest = strip_prefix_ignore_case(prefix, WWW)?;
            if rest.is_empty() {
                return None;
            }
            lookup(rest).map(|domain| format!("{WWW}{domain}"))
        })
    }
}

fn result(prefix: &str, completion: String, source: CompletionSource) -> CompletionResult {
    CompletionResult {
        prefix: prefix.to_string(),
        completion,
        source,
    }
}

impl std::fmt::Debug for CompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionProvider")
            .field("builtin_entries", &self.builtin.len())
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}
