//! Statechart manager: owns the tree and drives transitions.

use super::error::StatechartError;
use super::journal::{TransitionJournal, TransitionRecord};
use super::transition::{Planner, TransitionKind, TransitionPlan};
use crate::config::StatechartOptions;
use crate::core::{
    Configuration, HistoryResolver, Recall, StateBehavior, StateId, StateNode, StateTree,
};
use crate::monitor::{Action, Monitor};
use chrono::Utc;
use std::fmt;

/// A running statechart.
///
/// Transitions run to completion synchronously: the whole exit path fires,
/// then the whole entry path. Hooks receive the behavior's own `&mut self`
/// only, so a transition cannot start another one from inside a hook.
pub struct StatechartManager<C = ()> {
    pub(crate) tree: StateTree,
    behaviors: Vec<Box<dyn StateBehavior<C>>>,
    pub(crate) configuration: Configuration,
    pub(crate) history: HistoryResolver,
    monitor: Option<Monitor<C>>,
    pub(crate) journal: TransitionJournal,
    options: StatechartOptions,
}

impl<C: Clone> StatechartManager<C> {
    pub(crate) fn new(
        tree: StateTree,
        behaviors: Vec<Box<dyn StateBehavior<C>>>,
        options: StatechartOptions,
    ) -> Self {
        Self {
            tree,
            behaviors,
            configuration: Configuration::new(),
            history: HistoryResolver::new(),
            monitor: options.monitor_is_active.then(Monitor::new),
            journal: TransitionJournal::with_capacity(options.journal_capacity),
            options,
        }
    }

    /// Enter the root state and its default descendants.
    pub fn init_statechart(&mut self) -> Result<(), StatechartError> {
        if self.is_initialized() {
            return Err(StatechartError::AlreadyInitialized);
        }
        let (plan, history) =
            Planner::new(&self.tree, &self.configuration, &self.history).initial();
        let root = self.tree.name(self.tree.root()).to_string();
        self.commit(&root, TransitionKind::Initial, plan, history, None);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        !self.configuration.is_empty()
    }

    /// Move to `name`, resolving initial substates below it.
    ///
    /// The origin is the active leaf closest to the target.
    pub fn goto_state(&mut self, name: &str, context: Option<&C>) -> Result<(), StatechartError> {
        self.transition(name, None, TransitionKind::Direct, context)
    }

    /// Move to `name` as if the transition started at the active state `from`.
    pub fn goto_state_from(
        &mut self,
        name: &str,
        from: &str,
        context: Option<&C>,
    ) -> Result<(), StatechartError> {
        self.transition(name, Some(from), TransitionKind::Direct, context)
    }

    /// Move to the most recently active configuration under `name`.
    ///
    /// With `recursive` the whole recorded chain is restored; otherwise only
    /// the recorded child, which then resolves its own substates. Without any
    /// recorded history this behaves like [`goto_state`](Self::goto_state).
    pub fn goto_history_state(
        &mut self,
        name: &str,
        recursive: bool,
        context: Option<&C>,
    ) -> Result<(), StatechartError> {
        self.transition(name, None, history_kind(recursive), context)
    }

    pub fn goto_history_state_from(
        &mut self,
        name: &str,
        from: &str,
        recursive: bool,
        context: Option<&C>,
    ) -> Result<(), StatechartError> {
        self.transition(name, Some(from), history_kind(recursive), context)
    }

    /// Compute, without firing anything, what `goto_state` would do.
    pub fn plan_transition(
        &self,
        name: &str,
        from: Option<&str>,
    ) -> Result<TransitionPlan, StatechartError> {
        self.prepare(name, from, TransitionKind::Direct)
            .map(|(plan, _)| plan)
    }

    /// Compute, without firing anything, what `goto_history_state` would do.
    pub fn plan_history_transition(
        &self,
        name: &str,
        from: Option<&str>,
        recursive: bool,
    ) -> Result<TransitionPlan, StatechartError> {
        self.prepare(name, from, history_kind(recursive))
            .map(|(plan, _)| plan)
    }

    fn transition(
        &mut self,
        name: &str,
        from: Option<&str>,
        kind: TransitionKind,
        context: Option<&C>,
    ) -> Result<(), StatechartError> {
        let (plan, history) = self.prepare(name, from, kind)?;
        self.commit(name, kind, plan, history, context);
        Ok(())
    }

    fn prepare(
        &self,
        name: &str,
        from: Option<&str>,
        kind: TransitionKind,
    ) -> Result<(TransitionPlan, HistoryResolver), StatechartError> {
        let marker = self.resolve(name)?;
        let from = from.map(|from| self.resolve(from)).transpose()?;
        if !self.is_initialized() {
            return Err(StatechartError::NotInitialized);
        }
        if let Some(from) = from {
            if !self.configuration.is_active(from) {
                return Err(StatechartError::NotCurrentState {
                    name: self.tree.name(from).to_string(),
                });
            }
        }

        let planner = Planner::new(&self.tree, &self.configuration, &self.history);
        let target = match kind {
            TransitionKind::ShallowHistory => planner.resolve_history(marker, false),
            TransitionKind::RecursiveHistory => planner.resolve_history(marker, true),
            TransitionKind::Initial | TransitionKind::Direct => marker,
        };
        let origin = match from {
            Some(from) => from,
            None => planner
                .relative_origin(target)
                .ok_or(StatechartError::NotInitialized)?,
        };
        let recall = match kind {
            TransitionKind::RecursiveHistory => Recall::Deep,
            _ => Recall::Declared,
        };
        Ok(planner.plan(origin, target, recall))
    }

    fn commit(
        &mut self,
        requested: &str,
        kind: TransitionKind,
        plan: TransitionPlan,
        history: HistoryResolver,
        context: Option<&C>,
    ) {
        if plan.is_noop() {
            tracing::debug!(target_state = requested, "already in target state, nothing to do");
            return;
        }

        let from_states = self.current_state_names();
        for id in &plan.exits {
            self.notify(Action::Exited, *id, context);
        }
        self.history = history;
        for id in &plan.entries {
            self.notify(Action::Entered, *id, context);
        }
        let to_states = self.current_state_names();

        tracing::debug!(
            target_state = requested,
            resolved = self.tree.name(plan.target),
            pivot = plan.pivot.map(|id| self.tree.name(id)),
            exits = plan.exits.len(),
            entries = plan.entries.len(),
            ?kind,
            "transition complete"
        );

        self.journal.record(TransitionRecord {
            target: requested.to_string(),
            kind,
            from_states,
            to_states,
            timestamp: Utc::now(),
        });
    }

    fn notify(&mut self, action: Action, id: StateId, context: Option<&C>) {
        let name = self.tree.node(id).name();
        let behavior = &mut self.behaviors[id.index()];
        match action {
            Action::Exited => {
                behavior.exit_state(context);
                self.configuration.deactivate(id);
            }
            Action::Entered => {
                self.configuration.activate(id);
                behavior.enter_state(context);
            }
        }
        if let Some(monitor) = self.monitor.as_mut() {
            match action {
                Action::Exited => monitor.exited(id, name, context.cloned()),
                Action::Entered => monitor.entered(id, name, context.cloned()),
            }
        }
        if self.options.trace {
            tracing::info!(state = name, %action, "state notification");
        } else {
            tracing::trace!(state = name, %action, "state notification");
        }
    }

    fn resolve(&self, name: &str) -> Result<StateId, StatechartError> {
        self.tree
            .lookup(name)
            .ok_or_else(|| StatechartError::UnknownState {
                name: name.to_string(),
            })
    }
}

impl<C> StatechartManager<C> {
    pub fn tree(&self) -> &StateTree {
        &self.tree
    }

    pub fn state(&self, name: &str) -> Option<&StateNode> {
        self.tree.lookup(name).map(|id| self.tree.node(id))
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.tree.lookup(name)
    }

    /// Active leaf states, in declaration order.
    pub fn current_states(&self) -> Vec<&StateNode> {
        self.configuration
            .leaves(&self.tree)
            .into_iter()
            .map(|id| self.tree.node(id))
            .collect()
    }

    pub fn current_state_names(&self) -> Vec<String> {
        self.current_states()
            .into_iter()
            .map(|node| node.name().to_string())
            .collect()
    }

    pub fn current_state_count(&self) -> usize {
        self.configuration.leaves(&self.tree).len()
    }

    /// True when `name` is an active leaf or an active ancestor of one.
    /// Unknown names are never current.
    pub fn is_current_state(&self, name: &str) -> bool {
        self.tree
            .lookup(name)
            .is_some_and(|id| self.configuration.is_active(id))
    }

    pub fn is_current(&self, id: StateId) -> bool {
        self.configuration.is_active(id)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn history(&self) -> &HistoryResolver {
        &self.history
    }

    /// Name of the child recorded when `name` was last exited.
    pub fn last_active_substate(&self, name: &str) -> Option<&str> {
        let id = self.tree.lookup(name)?;
        self.history
            .last_active_substate(id)
            .map(|child| self.tree.name(child))
    }

    pub fn journal(&self) -> &TransitionJournal {
        &self.journal
    }

    pub fn options(&self) -> &StatechartOptions {
        &self.options
    }

    pub fn monitor(&self) -> Option<&Monitor<C>> {
        self.monitor.as_ref()
    }

    pub fn is_monitor_active(&self) -> bool {
        self.monitor.is_some()
    }

    /// Turn recording on or off. Turning it on starts an empty log; turning
    /// it off discards the current one.
    pub fn set_monitor_active(&mut self, active: bool) {
        match (active, self.monitor.is_some()) {
            (true, false) => self.monitor = Some(Monitor::new()),
            (false, true) => self.monitor = None,
            _ => {}
        }
        self.options.monitor_is_active = active;
    }

    /// Clear the monitor's log, if monitoring is active.
    pub fn reset_monitor(&mut self) {
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.reset();
        }
    }
}

impl<C> fmt::Debug for StatechartManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current: Vec<&str> = self
            .configuration
            .leaves(&self.tree)
            .into_iter()
            .map(|id| self.tree.name(id))
            .collect();
        f.debug_struct("StatechartManager")
            .field("states", &self.tree.len())
            .field("current", &current)
            .field("monitor_active", &self.monitor.is_some())
            .finish()
    }
}

fn history_kind(recursive: bool) -> TransitionKind {
    if recursive {
        TransitionKind::RecursiveHistory
    } else {
        TransitionKind::ShallowHistory
    }
}
