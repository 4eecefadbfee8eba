// Error types shared by the library modules. The binary and the
// top-level runner wrap these in `anyhow::Error`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure signal of the AnkiConnect client. Callers only need to know
/// whether the service was unreachable or rejected the request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got an HTTP response (refused, timed out).
    #[error("Error connecting to Anki: {0}")]
    Connection(String),

    /// The service answered, but with a non-2xx status, an unreadable
    /// body or a non-null `error` field.
    #[error("API Error: {0}")]
    Api(String),
}

/// Only used for `send()`; everything after a response arrives is `Api`.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Connection(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be provided")]
    Missing(&'static str),

    #[error("ANKI_TIMEOUT must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading standard input: {0}")]
    Stdin(#[source] io::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
