use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum NewsError {
    /// An error occurred during an outbound HTTP request (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The upstream server returned a non-success HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// An error occurred while reading or writing the snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No snapshot has ever been written; the cache is still warming up.
    #[error("news snapshot is not yet available")]
    NotReady,

    /// The persisted snapshot exists but cannot be parsed.
    #[error("news snapshot is corrupt: {0}")]
    Corrupt(String),

    /// No cached story carries the requested id.
    #[error("no story with id `{0}`")]
    NotFound(String),

    /// The story exists but lacks the canonical URL needed to fetch its body.
    #[error("story `{0}` has no canonical url")]
    IncompleteData(String),

    /// The data was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),
}
