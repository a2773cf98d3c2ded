mod dirs;
mod settings;
mod validation;

pub use dirs::Directories;
pub use settings::{CompletionConfig, Config, Precedence, StorageConfig};
pub use validation::warn_unknown_fields;
