//! Builder for constructing a statechart manager.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::builder::validation::{validate_tree, Declaration};
use crate::config::StatechartOptions;
use crate::core::{StateBehavior, StateId, StateNode, StateTree};
use crate::engine::StatechartManager;
use stillwater::validation::Validation;

/// Builder for a [`StatechartManager`] with a fluent API.
///
/// The tree is validated as a whole when [`build`](Self::build) runs, and
/// every structural problem is reported at once.
pub struct StatechartBuilder<C = ()> {
    root: Option<StateBuilder<C>>,
    options: StatechartOptions,
}

impl<C: Clone + 'static> StatechartBuilder<C> {
    pub fn new() -> Self {
        Self {
            root: None,
            options: StatechartOptions::default(),
        }
    }

    /// Set the root state (required).
    pub fn root(mut self, root: StateBuilder<C>) -> Self {
        self.root = Some(root);
        self
    }

    /// Replace all options at once, e.g. with ones loaded from JSON.
    pub fn options(mut self, options: StatechartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn monitor_is_active(mut self, active: bool) -> Self {
        self.options.monitor_is_active = active;
        self
    }

    pub fn trace(mut self, trace: bool) -> Self {
        self.options.trace = trace;
        self
    }

    /// Enter the initial configuration during `build`. On by default.
    pub fn auto_init(mut self, auto_init: bool) -> Self {
        self.options.auto_init = auto_init;
        self
    }

    pub fn journal_capacity(mut self, capacity: Option<usize>) -> Self {
        self.options.journal_capacity = capacity;
        self
    }

    /// Build the statechart.
    /// Returns an error if the root is missing or the tree is malformed.
    pub fn build(self) -> Result<StatechartManager<C>, BuildError> {
        let root = self.root.ok_or(BuildError::MissingRoot)?;

        let mut flat = Flattened::default();
        flat.push(root, None);

        if let Validation::Failure(errors) = validate_tree(&flat.nodes, &flat.declarations) {
            let violations: Vec<_> = errors.iter().cloned().collect();
            tracing::warn!(violations = violations.len(), "rejected invalid state tree");
            return Err(BuildError::InvalidTree(violations));
        }

        let tree = StateTree::from_nodes(flat.nodes);
        tracing::debug!(states = tree.len(), root = tree.name(tree.root()), "built state tree");

        let auto_init = self.options.auto_init;
        let mut manager = StatechartManager::new(tree, flat.behaviors, self.options);
        if auto_init {
            manager.init_statechart()?;
        }
        Ok(manager)
    }
}

impl<C: Clone + 'static> Default for StatechartBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Nodes, declarations and behaviors laid out in depth-first order, all
/// indexed by `StateId`.
struct Flattened<C> {
    nodes: Vec<StateNode>,
    declarations: Vec<Declaration>,
    behaviors: Vec<Box<dyn StateBehavior<C>>>,
}

impl<C> Default for Flattened<C> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            declarations: Vec::new(),
            behaviors: Vec::new(),
        }
    }
}

impl<C: 'static> Flattened<C> {
    fn push(&mut self, state: StateBuilder<C>, parent: Option<StateId>) -> StateId {
        let id = StateId(self.nodes.len());
        let conflicting_behavior = state.behavior.is_some() && state.has_hooks();
        let StateBuilder {
            name,
            initial,
            concurrent,
            history,
            substates,
            behavior,
            hooks,
        } = state;

        self.nodes.push(StateNode {
            id,
            name,
            parent,
            children: Vec::new(),
            concurrent,
            initial: None,
            history_mode: history,
        });
        self.declarations.push(Declaration {
            initial: initial.clone(),
            conflicting_behavior,
        });
        self.behaviors
            .push(StateBuilder::into_behavior(behavior, hooks));

        let children: Vec<StateId> = substates
            .into_iter()
            .map(|substate| self.push(substate, Some(id)))
            .collect();

        let initial = if concurrent {
            None
        } else {
            match initial {
                Some(name) => children
                    .iter()
                    .copied()
                    .find(|child| self.nodes[child.index()].name == name),
                None => children.first().copied(),
            }
        };

        let node = &mut self.nodes[id.index()];
        node.children = children;
        node.initial = initial;
        id
    }
}
