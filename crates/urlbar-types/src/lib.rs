//! Shared types for urlbar components.
//!
//! This crate provides the types used across urlbar-core and urlbar-cli:
//! normalized custom domains, the persisted store schema, and completion
//! results. All types are serializable so they can be persisted or printed
//! as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize user input into the canonical domain form.
///
/// Trims surrounding whitespace, lowercases, strips a leading `scheme://`
/// and any trailing slashes. Nothing else is touched: `www.` and paths are
/// kept as typed.
#[must_use]
pub fn normalize_domain(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let without_scheme = strip_scheme(&lowered);
    without_scheme.trim_end_matches('/').to_string()
}

/// Strip `scheme://` from the front of `s` if it has one.
fn strip_scheme(s: &str) -> &str {
    let Some(idx) = s.find("://") else {
        return s;
    };
    if is_scheme(&s[..idx]) {
        &s[idx + 3..]
    } else {
        s
    }
}

/// RFC 3986 scheme: a letter followed by letters, digits, `+`, `-` or `.`
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// A user-managed custom domain in normalized form.
///
/// Construct with [`DomainEntry::parse`]; the inner string is guaranteed to
/// be non-empty, lowercase, scheme-less, without trailing slash and without
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainEntry(String);

impl DomainEntry {
    /// Normalize and validate a candidate domain.
    ///
    /// # Errors
    ///
    /// Returns a message if the input normalizes to an empty string or
    /// contains whitespace.
    pub fn parse(input: &str) -> Result<Self, String> {
        let normalized = normalize_domain(input);
        if normalized.is_empty() {
            return Err(format!("{input:?} is empty after normalization"));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(format!("{input:?} contains whitespace"));
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainEntry {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DomainEntry> for String {
    fn from(entry: DomainEntry) -> Self {
        entry.0
    }
}

impl AsRef<str> for DomainEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted custom-domain settings.
///
/// Entries are kept as raw strings so a hand-edited file with one bad line
/// still loads; the store normalizes them on open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub autocomplete_enabled: bool,

    #[serde(default)]
    pub custom_domains: Vec<String>,
}

/// Where a completion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionSource {
    Builtin,
    Custom,
}

/// A single inline completion for a typed prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    /// Text exactly as the user typed it
    pub prefix: String,

    /// Full suggested text (lowercase domain, possibly with `www.`)
    pub completion: String,

    pub source: CompletionSource,
}

impl CompletionResult {
    /// Part of the completion that follows the typed prefix.
    ///
    /// Returns an empty string when the prefix already spells out the whole
    /// completion, or when the completion does not start with the prefix.
    #[must_use]
    pub fn remainder(&self) -> &str {
        strip_prefix_ignore_case(&self.completion, &self.prefix).unwrap_or("")
    }

    /// What the address field shows: the typed text followed by the remainder.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("{}{}", self.prefix, self.remainder())
    }
}

/// Case-insensitive `str::strip_prefix`.
///
/// `prefix` is lowercased the way [`normalize_domain`] lowercases, then
/// matched against the lowercase expansion of each `haystack` char, so a
/// char that lowercases to several (`İ` -> `i̇`) still matches its stored
/// form. A prefix that ends inside such an expansion does not match.
#[must_use]
pub fn strip_prefix_ignore_case<'a>(haystack: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.to_lowercase();
    let mut wanted = prefix.chars().peekable();

    for (idx, h) in haystack.char_indices() {
        if wanted.peek().is_none() {
            return Some(&haystack[idx..]);
        }
        for lower in h.to_lowercase() {
            if wanted.next() != Some(lower) {
                return None;
            }
        }
    }

    wanted.peek().is_none().then_some("")
}
