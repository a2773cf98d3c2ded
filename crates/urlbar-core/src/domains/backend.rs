//! Durable storage for [`StoreState`].

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};
use urlbar_types::StoreState;

/// Key-value settings storage the domain store reads at open and writes on
/// every mutation.
pub trait StateBackend: Send + Sync {
    /// Read the persisted state. A backend with nothing stored yet returns
    /// the default state.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read or holds
    /// data that does not parse.
    fn load(&self) -> Result<StoreState>;

    /// Durably replace the persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state could not be written.
    fn save(&self, state: &StoreState) -> Result<()>;
}

/// Stores state as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateBackend for JsonFileBackend {
    fn load(&self) -> Result<StoreState> {
        if !self.path.exists() {
            debug!("Domains file not found at {}", self.path.display());
            return Ok(StoreState::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(Error::persistence)?;
        serde_json::from_str(&content).map_err(|e| {
            warn!(
                "Failed to parse domains file {}: {} (at line {}, column {})",
                self.path.display(),
                e,
                e.line(),
                e.column()
            );
            Error::persistence(e)
        })
    }

    fn save(&self, state: &StoreState) -> Result<()> {
        let content = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::persistence)?;
        }

        // Write-then-rename so readers (and the watcher) never see half a file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(Error::persistence)?;
        std::fs::rename(&tmp, &self.path).map_err(Error::persistence)?;

        debug!(
            "Saved {} custom domains to {}",
            state.custom_domains.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Keeps state in process memory; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<StoreState>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(state: StoreState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Last state handed to `save`.
    #[must_use]
    pub fn stored(&self) -> StoreState {
        self.state
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self) -> Result<StoreState> {
        Ok(self.stored())
    }

    fn save(&self, state: &StoreState) -> Result<()> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| Error::persistence("memory backend mutex poisoned"))?;
        *guard = state.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_state() -> StoreState {
        StoreState {
            autocomplete_enabled: true,
            custom_domains: vec!["680news.com".to_string(), "geckoview.com".to_string()],
        }
    }

    #[test]
    fn test_json_backend_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nope.json"));
        assert_eq!(backend.load().unwrap(), StoreState::default());
    }

    #[test]
    fn test_json_backend_save_then_load() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested/custom-domains.json"));

        backend.save(&sample_state()).unwrap();

        assert!(backend.path().exists());
        assert!(!backend.path().with_extension("json.tmp").exists());
        assert_eq!(backend.load().unwrap(), sample_state());
    }

    #[test]
    fn test_json_backend_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom-domains.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let backend = JsonFileBackend::new(&path);
        let err = backend.load().unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
        assert!(err.is_corrupt_data());
    }

    #[test]
    fn test_json_backend_file_format() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("custom-domains.json"));
        backend.save(&sample_state()).unwrap();

        let raw = std::fs::read_to_string(backend.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["autocomplete_enabled"], true);
        assert_eq!(
            value["custom_domains"],
            serde_json::json!(["680news.com", "geckoview.com"])
        );
    }

    #[test]
    fn test_json_backend_save_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let backend = JsonFileBackend::new(blocker.join("custom-domains.json"));
        let err = backend.save(&sample_state()).unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
    }

    #[test]
    fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load().unwrap(), StoreState::default());

        backend.save(&sample_state()).unwrap();
        assert_eq!(backend.load().unwrap(), sample_state());
        assert_eq!(backend.stored(), sample_state());
    }
}
