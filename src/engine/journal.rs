//! Journal of completed transitions.
//!
//! Keeps an ordered record of what each transition did to the active
//! configuration, bounded to the most recent entries.

use super::transition::TransitionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the state the caller asked for (the history marker for
    /// history transitions).
    pub target: String,
    pub kind: TransitionKind,
    /// Active leaves before the transition, in declaration order.
    pub from_states: Vec<String>,
    /// Active leaves after the transition, in declaration order.
    pub to_states: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Ordered, optionally bounded log of transitions.
///
/// # Example
///
/// ```rust
/// use statechart::engine::{TransitionJournal, TransitionKind, TransitionRecord};
/// use chrono::Utc;
///
/// let mut journal = TransitionJournal::with_capacity(Some(8));
/// journal.record(TransitionRecord {
///     target: "F".to_string(),
///     kind: TransitionKind::Direct,
///     from_states: vec!["D".to_string()],
///     to_states: vec!["F".to_string()],
///     timestamp: Utc::now(),
/// });
///
/// let path = journal.path();
/// assert_eq!(path.len(), 2); // [D] -> [F]
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionJournal {
    records: VecDeque<TransitionRecord>,
    capacity: Option<usize>,
}

impl TransitionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal keeping at most `capacity` records; `None` keeps everything.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord) {
        if self.capacity == Some(0) {
            return;
        }
        if let Some(capacity) = self.capacity {
            while self.records.len() >= capacity {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Configurations traversed: the leaves before the first retained
    /// transition, then the leaves after each one.
    pub fn path(&self) -> Vec<&[String]> {
        let mut path = Vec::new();
        if let Some(first) = self.records.front() {
            path.push(first.from_states.as_slice());
        }
        for record in &self.records {
            path.push(record.to_states.as_slice());
        }
        path
    }

    /// Time between the first and last retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub(crate) fn replace(&mut self, records: Vec<TransitionRecord>) {
        self.records = records.into();
        if let Some(capacity) = self.capacity {
            while self.records.len() > capacity {
                self.records.pop_front();
            }
        }
    }
}
