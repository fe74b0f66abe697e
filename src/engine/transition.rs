//! Pure computation of exit and entry paths.
//!
//! Planning reads the tree, the configuration and recorded history, and
//! produces the complete ordered list of notifications a transition will
//! fire. Nothing is mutated until the manager commits the plan, which is
//! what keeps failed transitions free of partial side effects.

use crate::core::{Configuration, HistoryResolver, Recall, StateId, StateTree};
use serde::{Deserialize, Serialize};

/// How the target of a transition was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Entry into the initial configuration.
    Initial,
    /// Plain `goto_state`.
    Direct,
    /// `goto_history_state` stopping at the recorded child.
    ShallowHistory,
    /// `goto_history_state` following the whole recorded chain.
    RecursiveHistory,
}

/// Ordered notifications for one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPlan {
    pub target: StateId,
    /// Deepest node left untouched by the transition; `None` for the
    /// initial entry and for no-op transitions.
    pub pivot: Option<StateId>,
    /// Nodes to exit, in firing order.
    pub exits: Vec<StateId>,
    /// Nodes to enter, in firing order.
    pub entries: Vec<StateId>,
}

impl TransitionPlan {
    pub fn is_noop(&self) -> bool {
        self.exits.is_empty() && self.entries.is_empty()
    }
}

pub(crate) struct Planner<'a> {
    tree: &'a StateTree,
    configuration: &'a Configuration,
    history: HistoryResolver,
}

impl<'a> Planner<'a> {
    pub(crate) fn new(
        tree: &'a StateTree,
        configuration: &'a Configuration,
        history: &HistoryResolver,
    ) -> Self {
        Self {
            tree,
            configuration,
            history: history.clone(),
        }
    }

    /// Entry of the root and its default descendants.
    pub(crate) fn initial(self) -> (TransitionPlan, HistoryResolver) {
        let root = self.tree.root();
        let mut entries = Vec::new();
        self.enter_default(root, Recall::Declared, &mut entries);
        let plan = TransitionPlan {
            target: root,
            pivot: None,
            exits: Vec::new(),
            entries,
        };
        (plan, self.history)
    }

    /// Active leaf that shares the deepest common ancestor with `target`.
    /// Ties go to the leaf declared first.
    pub(crate) fn relative_origin(&self, target: StateId) -> Option<StateId> {
        let mut best: Option<(StateId, usize)> = None;
        for leaf in self.configuration.leaves(self.tree) {
            let depth = self
                .tree
                .depth(self.tree.lowest_common_ancestor(leaf, target));
            if best.map_or(true, |(_, best_depth)| depth > best_depth) {
                best = Some((leaf, depth));
            }
        }
        best.map(|(leaf, _)| leaf)
    }

    /// Resolve a history marker to a concrete target.
    ///
    /// Active nodes recall their current child, inactive ones the child
    /// recorded when they were last exited.
    pub(crate) fn resolve_history(&self, marker: StateId, recursive: bool) -> StateId {
        let mut target = marker;
        loop {
            let node = self.tree.node(target);
            if node.is_concurrent() || node.is_leaf() {
                return target;
            }
            let recalled = if self.configuration.is_active(target) {
                self.configuration
                    .active_children(self.tree, target)
                    .first()
                    .copied()
            } else {
                self.history.last_active_substate(target)
            };
            let Some(next) = recalled else {
                return target;
            };
            target = next;
            if !recursive {
                return target;
            }
        }
    }

    /// Plan a transition from the active state `origin` to `target`.
    ///
    /// `recall` governs default entry below the target, including every
    /// region when the target is concurrent.
    pub(crate) fn plan(
        mut self,
        origin: StateId,
        target: StateId,
        recall: Recall,
    ) -> (TransitionPlan, HistoryResolver) {
        let target_node = self.tree.node(target);
        if target_node.is_leaf() && self.configuration.is_active(target) {
            let plan = TransitionPlan {
                target,
                pivot: None,
                exits: Vec::new(),
                entries: Vec::new(),
            };
            return (plan, self.history);
        }

        let pivot = self.pivot(origin, target);

        let mut exits = Vec::new();
        for child in self.configuration.active_children(self.tree, pivot) {
            self.exit_subtree(child, &mut exits);
        }

        let mut entries = Vec::new();
        let path = self.tree.path_below(pivot, target);
        self.enter_below(pivot, &path, recall, &mut entries);

        let plan = TransitionPlan {
            target,
            pivot: Some(pivot),
            exits,
            entries,
        };
        (plan, self.history)
    }

    fn pivot(&self, origin: StateId, target: StateId) -> StateId {
        if self.configuration.is_active(target) {
            return target;
        }
        let mut pivot = self.tree.lowest_common_ancestor(origin, target);
        // Crossing between regions of a concurrent node leaves and re-enters
        // the whole concurrent node.
        while self.tree.node(pivot).is_concurrent() && pivot != target {
            match self.tree.node(pivot).parent() {
                Some(parent) => pivot = parent,
                None => break,
            }
        }
        pivot
    }

    fn exit_subtree(&mut self, id: StateId, exits: &mut Vec<StateId>) {
        for child in self.configuration.active_children(self.tree, id) {
            self.exit_subtree(child, exits);
        }
        exits.push(id);
        self.history.record_exit(self.tree, id);
    }

    /// Enter the children of an already-entered `id`, heading for the
    /// first node of `path` and filling every other region by default.
    /// Once `path` is exhausted, defaults are resolved with `recall`.
    fn enter_below(
        &self,
        id: StateId,
        path: &[StateId],
        recall: Recall,
        entries: &mut Vec<StateId>,
    ) {
        let node = self.tree.node(id);
        let next = path.first().copied();
        if node.is_concurrent() {
            for child in node.children() {
                match next {
                    Some(next) if next == *child => {
                        self.enter_path(*child, &path[1..], recall, entries)
                    }
                    Some(_) => self.enter_default(*child, Recall::Declared, entries),
                    None => self.enter_default(*child, recall, entries),
                }
            }
        } else if let Some(next) = next {
            self.enter_path(next, &path[1..], recall, entries);
        } else if let Some((child, below)) = self.history.default_substate(self.tree, id, recall)
        {
            self.enter_default(child, below, entries);
        }
    }

    fn enter_path(
        &self,
        id: StateId,
        rest: &[StateId],
        recall: Recall,
        entries: &mut Vec<StateId>,
    ) {
        entries.push(id);
        self.enter_below(id, rest, recall, entries);
    }

    fn enter_default(&self, id: StateId, recall: Recall, entries: &mut Vec<StateId>) {
        entries.push(id);
        let node = self.tree.node(id);
        if node.is_concurrent() {
            for child in node.children() {
                self.enter_default(*child, recall, entries);
            }
        } else if let Some((child, below)) = self.history.default_substate(self.tree, id, recall) {
            self.enter_default(child, below, entries);
        }
    }
}
