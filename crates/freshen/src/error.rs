//! Error types for freshen.

use std::fmt;
use std::path::PathBuf;

use freshen_fetch::FetchError;
use thiserror::Error;

/// Error type an update callback may return.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Coarse classification of an [`Error`].
///
/// Only [`ErrorKind::Setup`] ever reaches the caller of `start`; the
/// others are logged by the polling loop, which carries on at the next
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Setup,
    Probe,
    Fetch,
    Callback,
    Commit,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Setup => write!(f, "setup"),
            ErrorKind::Probe => write!(f, "probe"),
            ErrorKind::Fetch => write!(f, "fetch"),
            ErrorKind::Callback => write!(f, "callback"),
            ErrorKind::Commit => write!(f, "commit"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot create cache directory {}: {source}", path.display())]
    CacheDir {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build HTTP client: {message}")]
    Client { message: String },

    #[error("no Tokio runtime to run the mirror on: {message}")]
    Runtime { message: String },

    #[error("scheme probe failed: {0}")]
    Probe(#[source] FetchError),

    #[error("fetch failed: {0}")]
    Fetch(#[source] FetchError),

    #[error("update callback failed: {0}")]
    Callback(#[source] BoxError),

    #[error("commit failed: {0}")]
    Commit(#[from] freshen_fs::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CacheDir { .. } | Error::Client { .. } | Error::Runtime { .. } => ErrorKind::Setup,
            Error::Probe(_) => ErrorKind::Probe,
            Error::Fetch(_) => ErrorKind::Fetch,
            Error::Callback(_) => ErrorKind::Callback,
            Error::Commit(_) => ErrorKind::Commit,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let setup = Error::CacheDir {
            path:   PathBuf::from("/nope"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let probe = Error::Probe(FetchError::Transport {
            url:     "http://mirror.test".into(),
            message: "refused".into(),
        });
        let callback = Error::Callback("bad data".into());

        assert_eq!(setup.kind(), ErrorKind::Setup);
        assert_eq!(probe.kind(), ErrorKind::Probe);
        assert_eq!(callback.kind(), ErrorKind::Callback);
        assert_eq!(callback.to_string(), "update callback failed: bad data");
    }
}
