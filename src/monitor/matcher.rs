//! Matching a recorded log against an expected pattern.

use super::error::MatcherError;
use super::{Action, Monitor, MonitorRecord};
use crate::core::StateId;
use std::fmt;

/// Reference to a state inside an expected pattern.
///
/// An id matches only the record for that exact node; a name matches any
/// record whose state carries that name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateRef {
    Id(StateId),
    Name(String),
}

impl StateRef {
    pub fn matches<C>(&self, record: &MonitorRecord<C>) -> bool {
        match self {
            Self::Id(id) => *id == record.state,
            Self::Name(name) => *name == record.name,
        }
    }
}

impl From<StateId> for StateRef {
    fn from(id: StateId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for StateRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for StateRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for StateRef {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Expected behavior, as a tree of groups and items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Children must match one after another, in order.
    Sequence(Vec<Pattern>),
    /// Children must each match once, in any order.
    Concurrent(Vec<Pattern>),
    /// A single notification.
    Item { action: Action, state: StateRef },
}

impl Pattern {
    pub fn entered(state: impl Into<StateRef>) -> Self {
        Self::Item {
            action: Action::Entered,
            state: state.into(),
        }
    }

    pub fn exited(state: impl Into<StateRef>) -> Self {
        Self::Item {
            action: Action::Exited,
            state: state.into(),
        }
    }

    /// True when matching from the start of `log` consumes every record.
    pub fn matches_log<C>(&self, log: &[MonitorRecord<C>]) -> bool {
        Matching { log }.pattern(self, 0) == Some(log.len())
    }
}

/// Recursive descent over a pattern. `None` is the mismatch sentinel,
/// distinct from every valid position.
struct Matching<'a, C> {
    log: &'a [MonitorRecord<C>],
}

impl<C> Matching<'_, C> {
    fn pattern(&self, pattern: &Pattern, pos: usize) -> Option<usize> {
        match pattern {
            Pattern::Sequence(children) => self.sequence(children, pos),
            Pattern::Concurrent(children) => self.concurrent(children, pos),
            Pattern::Item { action, state } => {
                let record = self.log.get(pos)?;
                (record.action == *action && state.matches(record)).then_some(pos + 1)
            }
        }
    }

    fn sequence(&self, children: &[Pattern], mut pos: usize) -> Option<usize> {
        if children.is_empty() {
            return Some(pos);
        }
        if pos > self.log.len() {
            return None;
        }
        for child in children {
            pos = self.pattern(child, pos)?;
        }
        Some(pos)
    }

    // Greedy: each round commits to the first remaining child, in
    // declaration order, that matches at the current position. No
    // backtracking over alternative interleavings.
    fn concurrent(&self, children: &[Pattern], mut pos: usize) -> Option<usize> {
        if children.is_empty() {
            return Some(pos);
        }
        if pos > self.log.len() {
            return None;
        }
        let mut remaining: Vec<&Pattern> = children.iter().collect();
        while !remaining.is_empty() {
            let (index, next) = remaining
                .iter()
                .enumerate()
                .find_map(|(i, child)| self.pattern(child, pos).map(|next| (i, next)))?;
            remaining.remove(index);
            pos = next;
        }
        Some(pos)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroupKind {
    Sequence,
    Concurrent,
}

impl GroupKind {
    fn label(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Concurrent => "concurrent",
        }
    }

    fn close(self, children: Vec<Pattern>) -> Pattern {
        match self {
            Self::Sequence => Pattern::Sequence(children),
            Self::Concurrent => Pattern::Concurrent(children),
        }
    }
}

/// Builder and verifier for expected enter/exit sequences.
///
/// `begin` opens an implicit root sequence; `begin_sequence` and
/// `begin_concurrent` nest groups; `entered` and `exited` add items to the
/// innermost open group. `end` closes the root and matches it against the
/// monitor's log.
pub struct SequenceMatcher<'m, C> {
    monitor: &'m Monitor<C>,
    stack: Vec<(GroupKind, Vec<Pattern>)>,
    misuse: Option<MatcherError>,
    pattern: Option<Pattern>,
    matched: Option<bool>,
}

impl<'m, C> SequenceMatcher<'m, C> {
    pub fn new(monitor: &'m Monitor<C>) -> Self {
        Self {
            monitor,
            stack: Vec::new(),
            misuse: None,
            pattern: None,
            matched: None,
        }
    }

    pub fn begin(&mut self) -> &mut Self {
        self.stack = vec![(GroupKind::Sequence, Vec::new())];
        self.misuse = None;
        self.pattern = None;
        self.matched = None;
        self
    }

    pub fn entered<I, S>(&mut self, states: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateRef>,
    {
        self.add_items(Action::Entered, states)
    }

    pub fn exited<I, S>(&mut self, states: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateRef>,
    {
        self.add_items(Action::Exited, states)
    }

    pub fn begin_sequence(&mut self) -> &mut Self {
        self.open(GroupKind::Sequence)
    }

    pub fn end_sequence(&mut self) -> &mut Self {
        self.close(GroupKind::Sequence)
    }

    pub fn begin_concurrent(&mut self) -> &mut Self {
        self.open(GroupKind::Concurrent)
    }

    pub fn end_concurrent(&mut self) -> &mut Self {
        self.close(GroupKind::Concurrent)
    }

    /// Close the root group and match it against the monitor's log.
    ///
    /// Returns `Ok(true)` only when the whole pattern is consumed exactly at
    /// the end of the log. Protocol misuse is an error, never a mismatch.
    pub fn end(&mut self) -> Result<bool, MatcherError> {
        if let Some(err) = self.misuse.take() {
            self.stack.clear();
            return Err(err);
        }
        let (kind, children) = self.stack.pop().ok_or(MatcherError::NotStarted)?;
        if !self.stack.is_empty() {
            let open = self.stack.len();
            self.stack.clear();
            return Err(MatcherError::UnbalancedGroup { open });
        }

        let root = kind.close(children);
        let matched = root.matches_log(self.monitor.sequence());
        tracing::trace!(matched, records = self.monitor.len(), "sequence match finished");

        self.pattern = Some(root);
        self.matched = Some(matched);
        Ok(matched)
    }

    /// Outcome of the last `end`, if any.
    pub fn is_match(&self) -> Option<bool> {
        self.matched
    }

    /// Pattern assembled by the last successful `end`.
    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    fn add_items<I, S>(&mut self, action: Action, states: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateRef>,
    {
        match self.stack.last_mut() {
            Some((_, children)) => children.extend(states.into_iter().map(|state| {
                Pattern::Item {
                    action,
                    state: state.into(),
                }
            })),
            None => self.flag(MatcherError::NotStarted),
        }
        self
    }

    fn open(&mut self, kind: GroupKind) -> &mut Self {
        if self.stack.is_empty() {
            self.flag(MatcherError::NotStarted);
        } else {
            self.stack.push((kind, Vec::new()));
        }
        self
    }

    fn close(&mut self, kind: GroupKind) -> &mut Self {
        // The root is closed by end(), never by an explicit group end.
        if self.stack.len() < 2 {
            self.flag(MatcherError::UnmatchedEnd { found: kind.label() });
            return self;
        }
        let Some((open_kind, children)) = self.stack.pop() else {
            return self;
        };
        if open_kind != kind {
            self.flag(MatcherError::MismatchedGroupEnd {
                expected: open_kind.label(),
                found: kind.label(),
            });
        }
        if let Some((_, parent)) = self.stack.last_mut() {
            parent.push(open_kind.close(children));
        }
        self
    }

    fn flag(&mut self, err: MatcherError) {
        if self.misuse.is_none() {
            self.misuse = Some(err);
        }
    }
}
