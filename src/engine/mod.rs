//! Transition engine: the imperative shell around the core data model.
//!
//! # Key Concepts
//!
//! - **Planning**: exit and entry paths are computed up front, as a pure
//!   function of the tree, the configuration and recorded history
//! - **Commit**: the manager fires every exit hook, deepest first, then every
//!   entry hook, shallowest first, passing the same context to each
//! - **Journal**: each committed transition is recorded with the leaves it
//!   left and the leaves it reached

mod error;
mod journal;
mod manager;
mod transition;

pub use error::StatechartError;
pub use journal::{TransitionJournal, TransitionRecord};
pub use manager::StatechartManager;
pub use transition::{TransitionKind, TransitionPlan};
