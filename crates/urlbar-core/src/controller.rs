//! Address-field state machine driving inline completion.
//!
//! ```text
//! Empty -> Typing -> Suggested | NoSuggestion -> Empty      (clear)
//!                                             -> Committed  (commit)
//! ```
//!
//! `Typing` is transient: every edit queries the provider and settles in
//! `Suggested` or `NoSuggestion` before `on_text_changed` returns.

use crate::completion::CompletionProvider;
use tracing::debug;
use urlbar_types::CompletionResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    /// Field is empty and shows the placeholder
    Empty,
    /// Input received, lookup in progress
    Typing,
    /// An inline completion is shown after the caret
    Suggested(CompletionResult),
    /// Input present, nothing to suggest
    NoSuggestion,
    /// User navigated to this text
    Committed(String),
}

/// Owns the address field text and its inline hint
#[derive(Debug)]
pub struct CompletionController {
    provider: CompletionProvider,
    typed: String,
    state: ControllerState,
}

impl CompletionController {
    #[must_use]
    pub fn new(provider: CompletionProvider) -> Self {
        Self {
            provider,
            typed: String::new(),
            state: ControllerState::Empty,
        }
    }

    /// React to an edit of the field. `text` is what the user has typed,
    /// without any previous hint.
    pub fn on_text_changed(&mut self, text: &str) -> &ControllerState {
        let deleting = text.len() < self.typed.len() && self.typed.starts_with(text);
        text.clone_into(&mut self.typed);

        if text.is_empty() {
            self.state = ControllerState::Empty;
            return &self.state;
        }

        self.state = ControllerState::Typing;

        if deleting && self.provider.config().suppress_on_delete {
            debug!("Deletion, not suggesting for {text:?}");
            self.state = ControllerState::NoSuggestion;
            return &self.state;
        }

        self.state = match self.provider.complete(text) {
            Some(result) => ControllerState::Suggested(result),
            None => ControllerState::NoSuggestion,
        };
        &self.state
    }

    /// Clear button: empty field, placeholder shown, hint gone.
    pub fn on_clear(&mut self) {
        self.typed.clear();
        self.state = ControllerState::Empty;
    }

    /// Accept the field content (typed text plus any hint) for navigation.
    ///
    /// Returns `None` when the field is empty.
    pub fn commit(&mut self) -> Option<String> {
        if self.typed.is_empty() {
            return None;
        }

        let accepted = self.full_text();
        debug!("Committed {accepted:?}");
        self.typed.clone_from(&accepted);
        self.state = ControllerState::Committed(accepted.clone());
        Some(accepted)
    }

    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Text exactly as typed
    #[must_use]
    pub fn typed(&self) -> &str {
        &self.typed
    }

    /// Selected inline remainder shown after the caret, if any.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        match &self.state {
            ControllerState::Suggested(result) if !result.remainder().is_empty() => {
                Some(result.remainder())
            }
            _ => None,
        }
    }

    /// What the field displays: the placeholder when empty, otherwise the
    /// typed text followed by the hint.
    #[must_use]
    pub fn text(&self) -> String {
        if matches!(self.state, ControllerState::Empty) {
            return self.provider.config().placeholder.clone();
        }
        self.full_text()
    }

    #[must_use]
    pub fn provider(&self) -> &CompletionProvider {
        &self.provider
    }

    fn full_text(&self) -> String {
        match self.hint() {
            Some(hint) => format!("{}{hint}", self.typed),
            None => self.typed.clone(),
        }
    }
}
