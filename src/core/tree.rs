//! Arena holding the hierarchical state tree.
//!
//! Nodes reference each other by [`StateId`] rather than by pointer, so
//! parent back-links carry no ownership and ancestor walks stay O(depth).

use super::node::{StateId, StateNode};
use std::collections::HashMap;

/// Immutable tree of states, indexed by id and by name.
#[derive(Clone, Debug)]
pub struct StateTree {
    nodes: Vec<StateNode>,
    by_name: HashMap<String, StateId>,
}

impl StateTree {
    /// Assemble a tree from nodes already laid out in depth-first order.
    ///
    /// Node 0 is the root. Callers validate names and links beforehand.
    pub(crate) fn from_nodes(nodes: Vec<StateNode>) -> Self {
        let by_name = nodes
            .iter()
            .map(|node| (node.name.clone(), node.id))
            .collect();
        Self { nodes, by_name }
    }

    pub fn root(&self) -> StateId {
        StateId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node for an id handed out by this tree.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to a different tree.
    pub fn node(&self, id: StateId) -> &StateNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: StateId) -> Option<&StateNode> {
        self.nodes.get(id.0)
    }

    pub fn lookup(&self, name: &str) -> Option<StateId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: StateId) -> &str {
        &self.node(id).name
    }

    /// All nodes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &StateNode> {
        self.nodes.iter()
    }

    pub fn depth(&self, id: StateId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent;
        }
        depth
    }

    /// `id` followed by each of its ancestors up to and including the root.
    pub fn ancestors(&self, id: StateId) -> Vec<StateId> {
        let mut chain = vec![id];
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.node(parent).parent;
        }
        chain
    }

    /// True when `ancestor` lies strictly above `id`.
    pub fn is_proper_ancestor(&self, ancestor: StateId, id: StateId) -> bool {
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.node(parent).parent;
        }
        false
    }

    /// True when `id` is `ancestor` or lies below it.
    pub fn is_descendant_or_self(&self, id: StateId, ancestor: StateId) -> bool {
        id == ancestor || self.is_proper_ancestor(ancestor, id)
    }

    /// Deepest node that is an ancestor-or-self of both `a` and `b`.
    pub fn lowest_common_ancestor(&self, a: StateId, b: StateId) -> StateId {
        let (mut a, mut b) = (a, b);
        let (mut depth_a, mut depth_b) = (self.depth(a), self.depth(b));
        while depth_a > depth_b {
            a = self.parent_or_self(a);
            depth_a -= 1;
        }
        while depth_b > depth_a {
            b = self.parent_or_self(b);
            depth_b -= 1;
        }
        while a != b {
            a = self.parent_or_self(a);
            b = self.parent_or_self(b);
        }
        a
    }

    /// Nodes strictly below `ancestor` down to and including `id`,
    /// shallowest first. Empty when `id == ancestor`.
    pub fn path_below(&self, ancestor: StateId, id: StateId) -> Vec<StateId> {
        let mut path: Vec<StateId> = self
            .ancestors(id)
            .into_iter()
            .take_while(|node| *node != ancestor)
            .collect();
        path.reverse();
        path
    }

    fn parent_or_self(&self, id: StateId) -> StateId {
        self.node(id).parent.unwrap_or(id)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::abcdef;
    use super::*;

    #[test]
    fn lookup_resolves_names() {
        let tree = abcdef();
        assert_eq!(tree.lookup("D"), Some(StateId(3)));
        assert_eq!(tree.lookup("missing"), None);
        assert_eq!(tree.name(StateId(6)), "F");
    }

    #[test]
    fn ancestors_walk_up_to_root() {
        let tree = abcdef();
        let d = tree.lookup("D").unwrap();
        let names: Vec<&str> = tree.ancestors(d).into_iter().map(|id| tree.name(id)).collect();
        assert_eq!(names, vec!["D", "A", "root"]);
        assert_eq!(tree.depth(d), 2);
        assert_eq!(tree.depth(tree.root()), 0);
    }

    #[test]
    fn lowest_common_ancestor_of_cousins_is_root() {
        let tree = abcdef();
        let d = tree.lookup("D").unwrap();
        let f = tree.lookup("F").unwrap();
        assert_eq!(tree.lowest_common_ancestor(d, f), tree.root());
    }

    #[test]
    fn lowest_common_ancestor_of_siblings_is_parent() {
        let tree = abcdef();
        let c = tree.lookup("C").unwrap();
        let d = tree.lookup("D").unwrap();
        assert_eq!(tree.lowest_common_ancestor(c, d), tree.lookup("A").unwrap());
    }

    #[test]
    fn lowest_common_ancestor_with_ancestor_is_ancestor() {
        let tree = abcdef();
        let a = tree.lookup("A").unwrap();
        let d = tree.lookup("D").unwrap();
        assert_eq!(tree.lowest_common_ancestor(a, d), a);
        assert_eq!(tree.lowest_common_ancestor(d, d), d);
    }

    #[test]
    fn path_below_is_shallowest_first() {
        let tree = abcdef();
        let f = tree.lookup("F").unwrap();
        let names: Vec<&str> = tree
            .path_below(tree.root(), f)
            .into_iter()
            .map(|id| tree.name(id))
            .collect();
        assert_eq!(names, vec!["B", "F"]);
        assert!(tree.path_below(f, f).is_empty());
    }

    #[test]
    fn ancestry_predicates() {
        let tree = abcdef();
        let a = tree.lookup("A").unwrap();
        let c = tree.lookup("C").unwrap();
        let e = tree.lookup("E").unwrap();
        assert!(tree.is_proper_ancestor(a, c));
        assert!(!tree.is_proper_ancestor(c, c));
        assert!(tree.is_descendant_or_self(c, c));
        assert!(!tree.is_descendant_or_self(e, a));
    }
}
