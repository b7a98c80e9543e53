use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by a [`Platform`](super::Platform).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlatformError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid search pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PlatformError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}
