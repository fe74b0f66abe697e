//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a checkpoint.
#[derive(Debug, Error, PartialEq)]
pub enum CheckpointError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint names a state this statechart does not declare
    #[error("Checkpoint refers to unknown state '{name}'")]
    UnknownState { name: String },

    /// The restored states do not form a legal configuration
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
