//! Error types
//!
//! Run-level failures are [`Error`] and abort the category being rendered.
//! Problems with a single document are [`SkipReason`]s: they are logged and
//! the document is left out, but the run carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Run-level errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown category: {0} (available: blog, projects)")]
    UnknownCategory(String),

    #[error("Content directory not found: {}", .0.display())]
    MissingContentDir(PathBuf),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single document was left out of its collection
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("no front-matter found")]
    MissingHeader,

    #[error("invalid front-matter: {0}")]
    InvalidHeader(#[from] serde_yaml::Error),

    #[error("front-matter is not a key/value mapping")]
    HeaderNotMapping,

    #[error("file is not valid UTF-8")]
    NotUtf8,

    #[error("renderer fault: {0}")]
    RendererFault(String),
}

/// A document that was left out, with the file name it came from
#[derive(Debug)]
pub struct Skipped {
    pub name: String,
    pub reason: SkipReason,
}

impl std::fmt::Display for Skipped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}
