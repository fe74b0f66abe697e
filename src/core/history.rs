//! Recorded history of last active substates.
//!
//! The tree shape never changes after construction; history is the one
//! piece of per-node data that does. It is kept here, as a map from a
//! parent to the child that was active when the parent was last exited.

use super::node::{HistoryMode, StateId};
use super::tree::StateTree;
use std::collections::HashMap;

/// Whether default entry should follow recorded history below a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recall {
    /// Use each node's own history mode.
    Declared,
    /// Follow recorded history all the way down, whatever the nodes declare.
    Deep,
}

/// Mutable side table of last active substates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryResolver {
    last_active: HashMap<StateId, StateId>,
}

impl HistoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Child of `id` that was active when `id` was last exited.
    pub fn last_active_substate(&self, id: StateId) -> Option<StateId> {
        self.last_active.get(&id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.last_active.is_empty()
    }

    /// Recorded `(parent, child)` pairs, sorted by parent.
    pub fn entries(&self) -> Vec<(StateId, StateId)> {
        let mut entries: Vec<_> = self
            .last_active
            .iter()
            .map(|(parent, child)| (*parent, *child))
            .collect();
        entries.sort();
        entries
    }

    /// Note that `exited` was just left. Its parent remembers it unless the
    /// parent is concurrent, where every child is active together.
    pub fn record_exit(&mut self, tree: &StateTree, exited: StateId) {
        if let Some(parent) = tree.node(exited).parent {
            if !tree.node(parent).concurrent {
                self.last_active.insert(parent, exited);
            }
        }
    }

    pub(crate) fn set(&mut self, parent: StateId, child: StateId) {
        self.last_active.insert(parent, child);
    }

    pub fn clear(&mut self) {
        self.last_active.clear();
    }

    /// Child entered when `id` is entered without a specific target, plus the
    /// recall mode that applies below that child. `None` for leaves and
    /// concurrent nodes.
    pub fn default_substate(
        &self,
        tree: &StateTree,
        id: StateId,
        recall: Recall,
    ) -> Option<(StateId, Recall)> {
        let node = tree.node(id);
        if node.concurrent || node.is_leaf() {
            return None;
        }
        let below = match (recall, node.history_mode) {
            (Recall::Deep, _) | (_, HistoryMode::Recursive) => Recall::Deep,
            _ => Recall::Declared,
        };
        let use_history = recall == Recall::Deep || node.history_mode != HistoryMode::None;
        let remembered = use_history
            .then(|| self.last_active_substate(id))
            .flatten();
        let child = remembered
            .or(node.initial)
            .or_else(|| node.children.first().copied())?;
        Some((child, below))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::fixtures::{abcdef, node};

    #[test]
    fn record_exit_remembers_child_in_parent() {
        let tree = abcdef();
        let mut history = HistoryResolver::new();
        let a = tree.lookup("A").unwrap();
        let d = tree.lookup("D").unwrap();

        history.record_exit(&tree, d);
        history.record_exit(&tree, a);

        assert_eq!(history.last_active_substate(a), Some(d));
        assert_eq!(history.last_active_substate(tree.root()), Some(a));
    }

    #[test]
    fn concurrent_parents_record_nothing() {
        let mut root = node(0, "root", None, &[1, 2], None);
        root.concurrent = true;
        let tree = StateTree::from_nodes(vec![
            root,
            node(1, "X", Some(0), &[], None),
            node(2, "Y", Some(0), &[], None),
        ]);
        let mut history = HistoryResolver::new();

        history.record_exit(&tree, tree.lookup("X").unwrap());

        assert!(history.is_empty());
    }

    #[test]
    fn default_substate_prefers_initial_without_history_mode() {
        let tree = abcdef();
        let mut history = HistoryResolver::new();
        let a = tree.lookup("A").unwrap();
        let c = tree.lookup("C").unwrap();
        let d = tree.lookup("D").unwrap();
        history.record_exit(&tree, d);

        assert_eq!(
            history.default_substate(&tree, a, Recall::Declared),
            Some((c, Recall::Declared))
        );
        assert_eq!(
            history.default_substate(&tree, a, Recall::Deep),
            Some((d, Recall::Deep))
        );
        assert_eq!(history.default_substate(&tree, d, Recall::Deep), None);
    }

    #[test]
    fn default_substate_honours_declared_history_mode() {
        let mut nodes = vec![
            node(0, "root", None, &[1], Some(1)),
            node(1, "A", Some(0), &[2, 3], Some(2)),
            node(2, "C", Some(1), &[], None),
            node(3, "D", Some(1), &[], None),
        ];
        nodes[1].history_mode = HistoryMode::Shallow;
        let tree = StateTree::from_nodes(nodes);
        let mut history = HistoryResolver::new();
        let a = tree.lookup("A").unwrap();
        let d = tree.lookup("D").unwrap();
        history.record_exit(&tree, d);

        assert_eq!(
            history.default_substate(&tree, a, Recall::Declared),
            Some((d, Recall::Declared))
        );
    }
}
