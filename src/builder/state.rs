//! Builder for declaring a state and its substates.

use crate::core::{HistoryMode, Hooks, StateBehavior};
use std::fmt;

/// Fluent declaration of one state and, recursively, its substates.
///
/// Substates are kept in declaration order, which is also the order in
/// which concurrent regions are entered and exited.
pub struct StateBuilder<C> {
    pub(crate) name: String,
    pub(crate) initial: Option<String>,
    pub(crate) concurrent: bool,
    pub(crate) history: HistoryMode,
    pub(crate) substates: Vec<StateBuilder<C>>,
    pub(crate) behavior: Option<Box<dyn StateBehavior<C>>>,
    pub(crate) hooks: Hooks<C>,
}

impl<C: 'static> StateBuilder<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: None,
            concurrent: false,
            history: HistoryMode::None,
            substates: Vec::new(),
            behavior: None,
            hooks: Hooks::new(),
        }
    }

    /// Child entered by default. Defaults to the first declared substate.
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Make the substates parallel regions, all active together.
    pub fn concurrent(mut self) -> Self {
        self.concurrent = true;
        self
    }

    pub fn history(mut self, mode: HistoryMode) -> Self {
        self.history = mode;
        self
    }

    pub fn substate(mut self, state: StateBuilder<C>) -> Self {
        self.substates.push(state);
        self
    }

    pub fn substates(mut self, states: impl IntoIterator<Item = StateBuilder<C>>) -> Self {
        self.substates.extend(states);
        self
    }

    /// Attach a custom behavior. Cannot be combined with hook closures.
    pub fn behavior(mut self, behavior: impl StateBehavior<C> + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Option<&C>) + Send + 'static,
    {
        self.hooks = self.hooks.on_enter(hook);
        self
    }

    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Option<&C>) + Send + 'static,
    {
        self.hooks = self.hooks.on_exit(hook);
        self
    }

    pub(crate) fn has_hooks(&self) -> bool {
        self.hooks.on_enter.is_some() || self.hooks.on_exit.is_some()
    }

    /// Behavior the engine will call: the custom one if present, otherwise
    /// the hook closures.
    pub(crate) fn into_behavior(
        behavior: Option<Box<dyn StateBehavior<C>>>,
        hooks: Hooks<C>,
    ) -> Box<dyn StateBehavior<C>> {
        behavior.unwrap_or_else(|| Box::new(hooks))
    }
}

impl<C> fmt::Debug for StateBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateBuilder")
            .field("name", &self.name)
            .field("initial", &self.initial)
            .field("concurrent", &self.concurrent)
            .field("history", &self.history)
            .field("substates", &self.substates)
            .finish()
    }
}
