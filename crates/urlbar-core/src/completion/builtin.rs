//! Shipped domain table.

use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::warn;
use urlbar_types::strip_prefix_ignore_case;

const SHIPPED_DOMAINS: &str = include_str!("../../assets/topdomains.txt");

static SHIPPED: LazyLock<BuiltinTable> = LazyLock::new(|| BuiltinTable::parse(SHIPPED_DOMAINS));

/// One row of the table: typed text matching `key` completes to `canonical`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinEntry {
    pub key: String,
    pub canonical: String,
}

impl BuiltinEntry {
    fn matches(&self, prefix: &str) -> bool {
        strip_prefix_ignore_case(&self.key, prefix).is_some()
            || strip_prefix_ignore_case(&self.canonical, prefix).is_some()
    }
}

/// Ordered, read-only list of builtin completions
#[derive(Debug, Clone, Default)]
pub struct BuiltinTable {
    entries: Vec<BuiltinEntry>,
}

impl BuiltinTable {
    /// Table embedded in the binary, parsed on first use.
    #[must_use]
    pub fn shipped() -> &'static BuiltinTable {
        &SHIPPED
    }

    /// Parse the line format: `domain` or `alias domain`, `#` comments.
    ///
    /// Aliases that are not a prefix of their domain and repeated keys are
    /// skipped with a warning.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let (key, canonical) = match (parts.next(), parts.next(), parts.next()) {
                (Some(domain), None, None) => (domain.to_lowercase(), domain.to_lowercase()),
                (Some(alias), Some(domain), None) => (alias.to_lowercase(), domain.to_lowercase()),
                _ => {
                    warn!("Skipping malformed builtin domain line {}: {line}", lineno + 1);
                    continue;
                }
            };

            if !canonical.starts_with(&key) {
                warn!("Skipping builtin alias {key:?}: not a prefix of {canonical:?}");
                continue;
            }
            if !seen.insert(key.clone()) {
                warn!("Skipping repeated builtin key {key:?}");
                continue;
            }

            entries.push(BuiltinEntry { key, canonical });
        }

        Self { entries }
    }

    /// First entry, in table order, whose key or domain starts with
    /// `prefix` (case-insensitive). Returns the domain.
    #[must_use]
    pub fn lookup(&self, prefix: &str) -> Option<&str> {
        if prefix.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.matches(prefix))
            .map(|e| e.canonical.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = &BuiltinEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
