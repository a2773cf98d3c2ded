//! Test module for urlbar-core
//!
//! This module contains tests for:
//! - Custom domain registry (add/remove/reorder, persistence, rollback)
//! - Completion lookup (builtin vs custom precedence, URL rejection, www.)
//! - Address field state machine (hints, clear, commit)
//! - Property checks over generated domains and prefixes

mod fixtures;
mod property_tests;
