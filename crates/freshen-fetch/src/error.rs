//! Error types for freshen-fetch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read body from {url}: {message}")]
    Body { url: String, message: String },
}

pub type Result<T> = std::result::Result<T, FetchError>;
