//! Transition errors.

use thiserror::Error;

/// Errors that can occur when driving a statechart.
///
/// Every variant is raised before any hook fires, so a failed call leaves
/// the configuration, recorded history and monitor untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatechartError {
    #[error("Unknown state '{name}'")]
    UnknownState { name: String },

    #[error("Statechart has not been initialized. Call init_statechart() first")]
    NotInitialized,

    #[error("Statechart is already initialized")]
    AlreadyInitialized,

    #[error("Cannot transition from '{name}': it is not a current state")]
    NotCurrentState { name: String },
}
