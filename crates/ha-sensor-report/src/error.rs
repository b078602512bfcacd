//! Error types for a report run

use std::path::PathBuf;
use thiserror::Error;

use crate::stamp::Artifact;

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Fatal conditions of a report run
///
/// Attribute problems never show up here; they degrade to defaults during
/// normalization.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The snapshot could not be fetched; nothing was written
    #[error("state server unavailable: {reason}")]
    RemoteUnavailable {
        reason: String,
        #[source]
        source: Option<ha_client::ClientError>,
    },

    /// The output directory could not be created
    #[error("failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be written; artifacts written before it remain
    #[error("failed to write {artifact} {path}: {source}")]
    WriteFailure {
        artifact: Artifact,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
