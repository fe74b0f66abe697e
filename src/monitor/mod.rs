//! Behavioral verification of transitions.
//!
//! A [`Monitor`] records every enter and exit notification in the order it
//! fired. A [`SequenceMatcher`] then checks that log against an expected
//! pattern of nested sequential and concurrent groups.
//!
//! # Example
//!
//! ```rust
//! use statechart::builder::{StateBuilder, StatechartBuilder};
//!
//! let mut chart = StatechartBuilder::<()>::new()
//!     .root(
//!         StateBuilder::new("root")
//!             .initial("A")
//!             .substate(StateBuilder::new("A"))
//!             .substate(StateBuilder::new("B")),
//!     )
//!     .monitor_is_active(true)
//!     .build()
//!     .unwrap();
//!
//! chart.reset_monitor();
//! chart.goto_state("B", None).unwrap();
//!
//! let matched = chart
//!     .monitor()
//!     .unwrap()
//!     .matcher()
//!     .begin()
//!     .exited(["A"])
//!     .entered(["B"])
//!     .end()
//!     .unwrap();
//! assert!(matched);
//! ```

mod error;
mod matcher;

pub use error::MatcherError;
pub use matcher::{Pattern, SequenceMatcher, StateRef};

use crate::core::StateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of notification a record stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Entered,
    Exited,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entered => f.write_str("entered"),
            Self::Exited => f.write_str("exited"),
        }
    }
}

/// One enter or exit notification.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorRecord<C> {
    pub action: Action,
    pub state: StateId,
    pub name: String,
    pub context: Option<C>,
}

/// Append-only log of notifications for one statechart.
#[derive(Clone, Debug)]
pub struct Monitor<C> {
    sequence: Vec<MonitorRecord<C>>,
}

impl<C> Default for Monitor<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Monitor<C> {
    pub fn new() -> Self {
        Self {
            sequence: Vec::new(),
        }
    }

    /// Recorded notifications in firing order.
    pub fn sequence(&self) -> &[MonitorRecord<C>] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Drop every record, starting a new verification episode.
    pub fn reset(&mut self) {
        self.sequence.clear();
    }

    pub(crate) fn entered(&mut self, state: StateId, name: &str, context: Option<C>) {
        self.append(Action::Entered, state, name, context);
    }

    pub(crate) fn exited(&mut self, state: StateId, name: &str, context: Option<C>) {
        self.append(Action::Exited, state, name, context);
    }

    fn append(&mut self, action: Action, state: StateId, name: &str, context: Option<C>) {
        self.sequence.push(MonitorRecord {
            action,
            state,
            name: name.to_string(),
            context,
        });
    }

    /// Start building an expected pattern against this log.
    pub fn matcher(&self) -> SequenceMatcher<'_, C> {
        SequenceMatcher::new(self)
    }

    /// True when the entered states equal `states` as a multiset, ignoring
    /// order and exits. Each expected state consumes one entry record.
    pub fn matches_entered_states<I, S>(&self, states: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<StateRef>,
    {
        let expected: Vec<StateRef> = states.into_iter().map(Into::into).collect();
        let entered: Vec<&MonitorRecord<C>> = self
            .sequence
            .iter()
            .filter(|record| record.action == Action::Entered)
            .collect();
        if entered.len() != expected.len() {
            return false;
        }
        // A reference names one node, so records it matches are interchangeable.
        let mut used = vec![false; entered.len()];
        expected.iter().all(|state| {
            match (0..entered.len()).find(|&i| !used[i] && state.matches(entered[i])) {
                Some(i) => {
                    used[i] = true;
                    true
                }
                None => false,
            }
        })
    }
}

impl<C> fmt::Display for Monitor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.sequence.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", record.action, record.name)?;
        }
        Ok(())
    }
}
