pub mod completion;
pub mod config;
pub mod controller;
pub mod domains;

mod error;

#[cfg(test)]
mod tests;

pub use completion::{BuiltinTable, CompletionProvider};
pub use controller::{CompletionController, ControllerState};
pub use domains::{DomainSnapshot, DomainStore};
pub use error::{Error, Result};

pub use urlbar_types::*;
