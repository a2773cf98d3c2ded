use directories::ProjectDirs;
use std::path::PathBuf;

/// Application directories following XDG spec
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config file path (~/.config/urlbar/config.json)
    pub config_file: PathBuf,

    /// Custom domains and the autocomplete flag
    /// (~/.local/share/urlbar/custom-domains.json)
    pub domains_file: PathBuf,
}

impl Directories {
    /// Create a new `Directories` instance with standard XDG paths.
    ///
    /// # Panics
    ///
    /// Panics if the system's project directories cannot be determined.
    #[must_use]
    pub fn new() -> Self {
        let project =
            ProjectDirs::from("", "", "urlbar").expect("Failed to determine project directories");

        Self {
            config_file: project.config_dir().join("config.json"),
            domains_file: project.data_dir().join("custom-domains.json"),
        }
    }

    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_file: base.join("config.json"),
            domains_file: base.join("custom-domains.json"),
        }
    }
}

impl Default for Directories {
    fn default() -> Self {
        Self::new()
    }
}
