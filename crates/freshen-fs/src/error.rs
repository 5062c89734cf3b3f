use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot stage beside {}: {source}", path.display())]
    Stage {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to replace {}: {source}", path.display())]
    Replace {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path has no file name: {}", path.display())]
    NoFileName { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
