use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load config from file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Domains file to use: the configured override, else `default`.
    #[must_use]
    pub fn domains_file_or(&self, default: &Path) -> PathBuf {
        self.storage
            .domains_file
            .clone()
            .unwrap_or_else(|| default.to_path_buf())
    }
}

/// Which table wins when both the builtin list and a custom domain match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Precedence {
    #[default]
    BuiltinFirst,
    CustomFirst,
}

/// Matching and rendering behavior of the address bar
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionConfig {
    #[serde(default)]
    pub precedence: Precedence,

    /// Suggest from the shipped domain list
    #[serde(default = "default_true")]
    pub builtin_enabled: bool,

    /// Typing `www.` also matches domains stored without it
    #[serde(default = "default_true")]
    pub match_www: bool,

    /// Don't suggest while the user is deleting characters
    #[serde(default)]
    pub suppress_on_delete: bool,

    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_true() -> bool {
    true
}
fn default_placeholder() -> String {
    "Search or enter address".to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            precedence: Precedence::default(),
            builtin_enabled: default_true(),
            match_www: default_true(),
            suppress_on_delete: false,
            placeholder: default_placeholder(),
        }
    }
}

/// Where custom domains are persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// Overrides the XDG data location of `custom-domains.json`
    #[serde(default)]
    pub domains_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.completion.precedence, Precedence::BuiltinFirst);
        assert!(config.completion.builtin_enabled);
        assert!(config.completion.match_www);
        assert!(!config.completion.suppress_on_delete);
        assert_eq!(config.completion.placeholder, "Search or enter address");
        assert!(config.storage.domains_file.is_none());
    }

    #[test]
    fn test_config_load_nonexistent_returns_default() {
        let path = std::path::Path::new("/nonexistent/path/config.json");
        let config = Config::load(path).unwrap();
        assert!(config.completion.builtin_enabled);
    }

    #[test]
    fn test_config_load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"completion": {{"precedence": "customFirst", "matchWww": false}}}}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.completion.precedence, Precedence::CustomFirst);
        assert!(!config.completion.match_www);
        assert!(config.completion.builtin_enabled);
    }

    #[test]
    fn test_config_load_invalid_json_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_domains_file_or_prefers_override() {
        let mut config = Config::default();
        let default = PathBuf::from("/data/custom-domains.json");
        assert_eq!(config.domains_file_or(&default), default);

        config.storage.domains_file = Some(PathBuf::from("/elsewhere/domains.json"));
        assert_eq!(
            config.domains_file_or(&default),
            PathBuf::from("/elsewhere/domains.json")
        );
    }
}
