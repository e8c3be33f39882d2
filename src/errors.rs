//! Error types for the dashboard

use thiserror::Error;

/// Errors surfaced by the data client, the preference store and the views.
///
/// The `Display` text of the fetch-related variants is exactly what the
/// dashboard shows in its error banner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The request did not complete before the timeout fired.
    #[error("Request timed out after {ms} ms")]
    Timeout { ms: u64 },

    /// Connectivity or transport failure, message passed through verbatim.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// The API answered `ok: false`.
    #[error("{0}")]
    Api(String),

    /// The body (or the decoded payload) was not the JSON we expected.
    #[error("{0}")]
    Json(String),

    #[error("Preference store error: {0}")]
    Preferences(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Preferences(err.to_string())
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, Error>;
