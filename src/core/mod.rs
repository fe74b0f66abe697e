//! Core statechart types.
//!
//! This module contains the data model shared by the engine and the monitor:
//! - The arena-backed state tree and its nodes
//! - The active configuration
//! - Recorded history of last active substates
//! - The `StateBehavior` hooks invoked during transitions
//!
//! Nothing here fires hooks or logs; that is the engine's job.

mod configuration;
mod history;
mod node;
mod state;
mod tree;

pub use configuration::Configuration;
pub use history::{HistoryResolver, Recall};
pub use node::{HistoryMode, StateId, StateNode};
pub use state::{HookFn, Hooks, StateBehavior};
pub use tree::StateTree;

#[cfg(test)]
pub(crate) use tree::fixtures;
