//! Behavior attached to states.
//!
//! The engine calls these hooks while it walks exit and entry paths. A
//! state without custom behavior uses [`Hooks::default`], which does nothing.

use std::fmt;

/// Lifecycle hooks for a state.
///
/// Both methods default to no-ops, so implementors override only what they
/// need. `context` is whatever was passed to the transition call, or `None`
/// when the call carried no context.
///
/// # Example
///
/// ```rust
/// use statechart::core::StateBehavior;
///
/// #[derive(Default)]
/// struct CountEntries {
///     entries: usize,
/// }
///
/// impl StateBehavior<String> for CountEntries {
///     fn enter_state(&mut self, _context: Option<&String>) {
///         self.entries += 1;
///     }
/// }
///
/// let mut behavior = CountEntries::default();
/// behavior.enter_state(None);
/// behavior.exit_state(None);
/// assert_eq!(behavior.entries, 1);
/// ```
pub trait StateBehavior<C>: Send {
    /// Called once each time the state is entered.
    fn enter_state(&mut self, context: Option<&C>) {
        let _ = context;
    }

    /// Called once each time the state is exited.
    fn exit_state(&mut self, context: Option<&C>) {
        let _ = context;
    }
}

/// Boxed hook closure.
pub type HookFn<C> = Box<dyn FnMut(Option<&C>) + Send>;

/// Behavior assembled from optional closures.
pub struct Hooks<C> {
    pub(crate) on_enter: Option<HookFn<C>>,
    pub(crate) on_exit: Option<HookFn<C>>,
}

impl<C> Hooks<C> {
    pub fn new() -> Self {
        Self {
            on_enter: None,
            on_exit: None,
        }
    }

    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Option<&C>) + Send + 'static,
    {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Option<&C>) + Send + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }
}

impl<C> Default for Hooks<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Hooks<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}

impl<C> StateBehavior<C> for Hooks<C> {
    fn enter_state(&mut self, context: Option<&C>) {
        if let Some(hook) = self.on_enter.as_mut() {
            hook(context);
        }
    }

    fn exit_state(&mut self, context: Option<&C>) {
        if let Some(hook) = self.on_exit.as_mut() {
            hook(context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Silent;

    impl StateBehavior<u32> for Silent {}

    #[test]
    fn default_hooks_do_nothing() {
        let mut silent = Silent;
        silent.enter_state(Some(&1));
        silent.exit_state(None);

        let mut hooks: Hooks<u32> = Hooks::default();
        hooks.enter_state(Some(&1));
        hooks.exit_state(Some(&2));
    }

    #[test]
    fn closures_receive_context() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let on_enter = Arc::clone(&seen);
        let on_exit = Arc::clone(&seen);
        let mut hooks = Hooks::new()
            .on_enter(move |ctx: Option<&u32>| on_enter.lock().unwrap().push(("enter", ctx.copied())))
            .on_exit(move |ctx: Option<&u32>| on_exit.lock().unwrap().push(("exit", ctx.copied())));

        hooks.enter_state(Some(&7));
        hooks.exit_state(None);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![("enter", Some(7)), ("exit", None)]
        );
    }

    #[test]
    fn debug_reports_installed_hooks() {
        let hooks: Hooks<u32> = Hooks::new().on_enter(|_| {});
        let rendered = format!("{hooks:?}");
        assert!(rendered.contains("on_enter: true"));
        assert!(rendered.contains("on_exit: false"));
    }
}
