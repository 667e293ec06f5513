//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    SerializationFailed(String),

    #[error("snapshot deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
