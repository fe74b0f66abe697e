//! Checkpoint and restore for statecharts.
//!
//! A checkpoint captures the runtime data of a statechart by state name:
//! the active leaves, recorded history and the transition journal. The tree
//! itself and the hooks are not part of it; a checkpoint is restored into a
//! statechart built from the same declaration.

use crate::core::{Configuration, HistoryResolver, StateId};
use crate::engine::{StatechartManager, TransitionRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a statechart's runtime data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Active leaf states, in declaration order. Empty if not initialized.
    pub active_states: Vec<String>,

    /// Last active substate recorded for each parent
    pub history: BTreeMap<String, String>,

    /// Completed transitions still held by the journal
    pub journal: Vec<TransitionRecord>,
}

impl Checkpoint {
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}

impl<C> StatechartManager<C> {
    /// Snapshot the active states, recorded history and journal.
    pub fn checkpoint(&self) -> Checkpoint {
        let history = self
            .history
            .entries()
            .into_iter()
            .map(|(parent, child)| {
                (
                    self.tree.name(parent).to_string(),
                    self.tree.name(child).to_string(),
                )
            })
            .collect();

        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            active_states: self.current_state_names(),
            history,
            journal: self.journal.records().cloned().collect(),
        }
    }

    /// Replace the runtime data with a checkpoint's, without firing any hook
    /// or monitor notification.
    ///
    /// Nothing changes unless the whole checkpoint is valid for this tree.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let leaves = checkpoint
            .active_states
            .iter()
            .map(|name| self.lookup(name))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(inner) = leaves.iter().find(|id| !self.tree.node(**id).is_leaf()) {
            return Err(CheckpointError::ValidationFailed(format!(
                "active state '{}' is not a leaf",
                self.tree.name(*inner)
            )));
        }
        let configuration = Configuration::from_leaves(&self.tree, &leaves);
        configuration
            .validate(&self.tree)
            .map_err(CheckpointError::ValidationFailed)?;

        let mut history = HistoryResolver::new();
        for (parent, child) in &checkpoint.history {
            let parent = self.lookup(parent)?;
            let child = self.lookup(child)?;
            if self.tree.node(child).parent() != Some(parent) {
                return Err(CheckpointError::ValidationFailed(format!(
                    "'{}' is not a substate of '{}'",
                    self.tree.name(child),
                    self.tree.name(parent)
                )));
            }
            history.set(parent, child);
        }

        self.configuration = configuration;
        self.history = history;
        self.journal.replace(checkpoint.journal.clone());

        tracing::info!(
            checkpoint = %checkpoint.id,
            active = ?checkpoint.active_states,
            "restored statechart from checkpoint"
        );
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<StateId, CheckpointError> {
        self.tree
            .lookup(name)
            .ok_or_else(|| CheckpointError::UnknownState {
                name: name.to_string(),
            })
    }
}
