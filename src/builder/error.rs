//! Build errors for statechart and state builders.

use crate::engine::StatechartError;
use thiserror::Error;

/// Errors that can occur when building a statechart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Root state not specified. Call .root(state) before .build()")]
    MissingRoot,

    #[error("Invalid state tree: {}", describe(.0))]
    InvalidTree(Vec<TreeViolation>),

    #[error("Initial configuration could not be entered: {0}")]
    Initialization(#[from] StatechartError),
}

/// A single structural problem in a declared state tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeViolation {
    #[error("State with empty name (parent: {parent:?})")]
    EmptyName { parent: Option<String> },

    #[error("State name '{name}' is declared more than once")]
    DuplicateName { name: String },

    #[error("Initial substate '{initial}' of '{state}' is not one of its children")]
    UnknownInitialSubstate { state: String, initial: String },

    #[error("Concurrent state '{state}' cannot declare an initial substate")]
    InitialOnConcurrent { state: String },

    #[error("Leaf state '{state}' cannot declare an initial substate ('{initial}')")]
    InitialOnLeaf { state: String, initial: String },

    #[error("Concurrent state '{state}' has no regions")]
    ConcurrentWithoutRegions { state: String },

    #[error("State '{state}' declares a history mode but has no substates")]
    HistoryOnLeaf { state: String },

    #[error("Concurrent state '{state}' cannot declare a history mode")]
    HistoryOnConcurrent { state: String },

    #[error("State '{state}' has both a custom behavior and hook closures")]
    ConflictingBehavior { state: String },
}

fn describe(violations: &[TreeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
