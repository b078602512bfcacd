//! Error types for the REST client

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the state server
#[derive(Debug, Error)]
pub enum ClientError {
    /// Building the HTTP client failed
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, timeout or protocol failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },

    /// Response body was not a JSON array of states
    #[error("could not decode states from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
