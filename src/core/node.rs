//! Nodes of the hierarchical state tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a node inside a [`StateTree`](super::StateTree).
///
/// Ids are assigned in depth-first declaration order, so sorting ids
/// reproduces the order in which states were declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a node recalls its previously active substates when it is
/// entered without a more specific target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Always enter the initial substate.
    #[default]
    None,
    /// Enter the last active child; the child resolves its own substates.
    Shallow,
    /// Enter the whole recorded chain of last active descendants.
    Recursive,
}

/// A single state in the tree.
///
/// Shape is fixed once the tree is built. Runtime data (activity, recorded
/// history) lives in [`Configuration`](super::Configuration) and
/// [`HistoryResolver`](super::HistoryResolver).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateNode {
    pub(crate) id: StateId,
    pub(crate) name: String,
    pub(crate) parent: Option<StateId>,
    pub(crate) children: Vec<StateId>,
    pub(crate) concurrent: bool,
    pub(crate) initial: Option<StateId>,
    pub(crate) history_mode: HistoryMode,
}

impl StateNode {
    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[StateId] {
        &self.children
    }

    /// True when the children of this node are parallel regions.
    pub fn is_concurrent(&self) -> bool {
        self.concurrent
    }

    /// Child entered by default. Always `None` for leaves and concurrent nodes.
    pub fn initial_substate(&self) -> Option<StateId> {
        self.initial
    }

    pub fn history_mode(&self) -> HistoryMode {
        self.history_mode
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_mode_defaults_to_none() {
        assert_eq!(HistoryMode::default(), HistoryMode::None);
    }

    #[test]
    fn history_mode_serializes_lowercase() {
        let json = serde_json::to_string(&HistoryMode::Recursive).unwrap();
        assert_eq!(json, "\"recursive\"");
        let mode: HistoryMode = serde_json::from_str("\"shallow\"").unwrap();
        assert_eq!(mode, HistoryMode::Shallow);
    }

    #[test]
    fn state_ids_order_by_declaration() {
        assert!(StateId(1) < StateId(2));
        assert_eq!(StateId(3).index(), 3);
        assert_eq!(StateId(3).to_string(), "#3");
    }
}
