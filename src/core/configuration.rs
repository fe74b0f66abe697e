//! The set of currently active states.

use super::node::StateId;
use super::tree::StateTree;
use std::collections::BTreeSet;

/// Active states of a statechart.
///
/// Every active node is stored, not only the leaves, which keeps
/// `is_active` a set lookup. Leaves are derived on demand and come out in
/// declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Configuration {
    active: BTreeSet<StateId>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration in which `leaves` and all of their ancestors are active.
    pub fn from_leaves(tree: &StateTree, leaves: &[StateId]) -> Self {
        let active = leaves
            .iter()
            .flat_map(|leaf| tree.ancestors(*leaf))
            .collect();
        Self { active }
    }

    pub fn is_active(&self, id: StateId) -> bool {
        self.active.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Every active node, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = StateId> + '_ {
        self.active.iter().copied()
    }

    /// Active leaf states, in declaration order.
    pub fn leaves(&self, tree: &StateTree) -> Vec<StateId> {
        self.active
            .iter()
            .copied()
            .filter(|id| tree.node(*id).is_leaf())
            .collect()
    }

    /// Active children of `id`, in declaration order.
    pub fn active_children(&self, tree: &StateTree, id: StateId) -> Vec<StateId> {
        tree.node(id)
            .children
            .iter()
            .copied()
            .filter(|child| self.is_active(*child))
            .collect()
    }

    pub(crate) fn activate(&mut self, id: StateId) {
        self.active.insert(id);
    }

    pub(crate) fn deactivate(&mut self, id: StateId) {
        self.active.remove(&id);
    }

    /// Check the structural invariant: every active non-root node has an
    /// active parent, every active concurrent node has all children active,
    /// and every active non-concurrent parent has exactly one active child.
    pub fn validate(&self, tree: &StateTree) -> Result<(), String> {
        if self.active.is_empty() {
            return Ok(());
        }
        if !self.is_active(tree.root()) {
            return Err("root state is not active".to_string());
        }
        for id in &self.active {
            let node = tree
                .get(*id)
                .ok_or_else(|| format!("state {id} does not belong to this statechart"))?;
            if let Some(parent) = node.parent {
                if !self.is_active(parent) {
                    return Err(format!(
                        "state '{}' is active but its parent '{}' is not",
                        node.name,
                        tree.name(parent)
                    ));
                }
            }
            if node.is_leaf() {
                continue;
            }
            let active_children = self.active_children(tree, *id).len();
            if node.concurrent && active_children != node.children.len() {
                return Err(format!(
                    "concurrent state '{}' has {} of {} regions active",
                    node.name,
                    active_children,
                    node.children.len()
                ));
            }
            if !node.concurrent && active_children != 1 {
                return Err(format!(
                    "state '{}' has {} active substates, expected exactly one",
                    node.name, active_children
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::fixtures::abcdef;

    #[test]
    fn from_leaves_activates_ancestors() {
        let tree = abcdef();
        let d = tree.lookup("D").unwrap();
        let config = Configuration::from_leaves(&tree, &[d]);

        assert!(config.is_active(tree.root()));
        assert!(config.is_active(tree.lookup("A").unwrap()));
        assert!(config.is_active(d));
        assert!(!config.is_active(tree.lookup("B").unwrap()));
        assert_eq!(config.leaves(&tree), vec![d]);
        assert!(config.validate(&tree).is_ok());
    }

    #[test]
    fn validate_rejects_two_active_alternatives() {
        let tree = abcdef();
        let c = tree.lookup("C").unwrap();
        let d = tree.lookup("D").unwrap();
        let config = Configuration::from_leaves(&tree, &[c, d]);

        let err = config.validate(&tree).unwrap_err();
        assert!(err.contains("'A' has 2 active substates"));
    }

    #[test]
    fn validate_rejects_dangling_parent() {
        let tree = abcdef();
        let mut config = Configuration::new();
        config.activate(tree.root());
        config.activate(tree.lookup("C").unwrap());

        assert!(config.validate(&tree).is_err());
    }

    #[test]
    fn empty_configuration_is_valid() {
        let tree = abcdef();
        assert!(Configuration::new().validate(&tree).is_ok());
    }
}
