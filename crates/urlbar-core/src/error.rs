use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Domain already exists: {0}")]
    Duplicate(String),

    #[error("Domain not found: {0}")]
    NotFound(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Watcher error: {0}")]
    Watch(#[from] notify::Error),
}

impl Error {
    /// Wrap a backend failure so callers can tell it apart from user errors.
    pub(crate) fn persistence(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Persistence(err.into())
    }

    /// Whether stored data was readable but did not parse.
    #[must_use]
    pub fn is_corrupt_data(&self) -> bool {
        match self {
            Self::Persistence(source) => source.is::<serde_json::Error>(),
            _ => false,
        }
    }

    /// Whether this is a recoverable user error (duplicate, missing, or malformed input)
    /// rather than an I/O or storage failure.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Duplicate(_) | Self::NotFound(_) | Self::InvalidDomain(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
