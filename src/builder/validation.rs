//! Structural checks on a flattened state tree using Validation.

use crate::builder::error::TreeViolation;
use crate::core::{HistoryMode, StateNode};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// What a state declared, kept alongside its node because an unknown
/// initial name cannot be represented as a `StateId`.
#[derive(Clone, Debug, Default)]
pub(crate) struct Declaration {
    pub(crate) initial: Option<String>,
    pub(crate) conflicting_behavior: bool,
}

type Check = Validation<(), NonEmptyVec<TreeViolation>>;

fn check(ok: bool, violation: impl FnOnce() -> TreeViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Validate every node, accumulating ALL violations.
///
/// `nodes` and `declarations` are parallel slices indexed by `StateId`.
pub(crate) fn validate_tree(nodes: &[StateNode], declarations: &[Declaration]) -> Check {
    let mut checks: Vec<Check> = Vec::new();
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for (node, declaration) in nodes.iter().zip(declarations) {
        let name = node.name();
        let parent = node.parent().map(|id| nodes[id.index()].name().to_string());

        checks.push(check(!name.is_empty(), || TreeViolation::EmptyName {
            parent: parent.clone(),
        }));

        if !name.is_empty() && !seen.insert(name) && reported.insert(name) {
            checks.push(Validation::fail(TreeViolation::DuplicateName {
                name: name.to_string(),
            }));
        }

        if let Some(initial) = &declaration.initial {
            let state = name.to_string();
            if node.is_concurrent() {
                checks.push(Validation::fail(TreeViolation::InitialOnConcurrent { state }));
            } else if node.is_leaf() {
                checks.push(Validation::fail(TreeViolation::InitialOnLeaf {
                    state,
                    initial: initial.clone(),
                }));
            } else {
                let known = node
                    .children()
                    .iter()
                    .any(|child| nodes[child.index()].name() == initial);
                checks.push(check(known, || TreeViolation::UnknownInitialSubstate {
                    state,
                    initial: initial.clone(),
                }));
            }
        }

        if node.is_concurrent() {
            checks.push(check(!node.is_leaf(), || {
                TreeViolation::ConcurrentWithoutRegions {
                    state: name.to_string(),
                }
            }));
        }

        if node.history_mode() != HistoryMode::None {
            if node.is_leaf() {
                checks.push(Validation::fail(TreeViolation::HistoryOnLeaf {
                    state: name.to_string(),
                }));
            } else if node.is_concurrent() {
                checks.push(Validation::fail(TreeViolation::HistoryOnConcurrent {
                    state: name.to_string(),
                }));
            }
        }

        checks.push(check(!declaration.conflicting_behavior, || {
            TreeViolation::ConflictingBehavior {
                state: name.to_string(),
            }
        }));
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;

    fn violations(result: Check) -> Vec<TreeViolation> {
        match result {
            Validation::Failure(errors) => errors.iter().cloned().collect(),
            Validation::Success(_) => Vec::new(),
        }
    }

    fn undeclared(count: usize) -> Vec<Declaration> {
        vec![Declaration::default(); count]
    }

    #[test]
    fn well_formed_tree_passes() {
        let tree = fixtures::abcdef();
        let nodes: Vec<StateNode> = tree.iter().cloned().collect();
        assert!(validate_tree(&nodes, &undeclared(nodes.len())).is_success());
    }

    #[test]
    fn accumulates_all_violations() {
        let mut nodes = vec![
            fixtures::node(0, "root", None, &[1, 2], Some(1)),
            fixtures::node(1, "A", Some(0), &[], None),
            fixtures::node(2, "A", Some(0), &[], None),
        ];
        nodes[1].history_mode = HistoryMode::Shallow;
        let mut declarations = undeclared(3);
        declarations[0].initial = Some("Missing".to_string());
        declarations[2].conflicting_behavior = true;

        let found = violations(validate_tree(&nodes, &declarations));

        assert_eq!(found.len(), 4);
        assert!(found.contains(&TreeViolation::DuplicateName { name: "A".to_string() }));
        assert!(found.contains(&TreeViolation::UnknownInitialSubstate {
            state: "root".to_string(),
            initial: "Missing".to_string(),
        }));
        assert!(found.contains(&TreeViolation::HistoryOnLeaf { state: "A".to_string() }));
        assert!(found.contains(&TreeViolation::ConflictingBehavior { state: "A".to_string() }));
    }

    #[test]
    fn duplicate_reported_once_per_name() {
        let nodes = vec![
            fixtures::node(0, "root", None, &[1, 2, 3], None),
            fixtures::node(1, "X", Some(0), &[], None),
            fixtures::node(2, "X", Some(0), &[], None),
            fixtures::node(3, "X", Some(0), &[], None),
        ];
        let found = violations(validate_tree(&nodes, &undeclared(4)));
        assert_eq!(found, vec![TreeViolation::DuplicateName { name: "X".to_string() }]);
    }

    #[test]
    fn concurrent_rules() {
        let mut nodes = vec![
            fixtures::node(0, "root", None, &[1, 2], None),
            fixtures::node(1, "P", Some(0), &[3], None),
            fixtures::node(2, "Q", Some(0), &[], None),
            fixtures::node(3, "R", Some(1), &[], None),
        ];
        nodes[1].concurrent = true;
        nodes[1].history_mode = HistoryMode::Recursive;
        nodes[2].concurrent = true;
        let mut declarations = undeclared(4);
        declarations[1].initial = Some("R".to_string());

        let found = violations(validate_tree(&nodes, &declarations));

        assert_eq!(found.len(), 3);
        assert!(found.contains(&TreeViolation::InitialOnConcurrent { state: "P".to_string() }));
        assert!(found.contains(&TreeViolation::HistoryOnConcurrent { state: "P".to_string() }));
        assert!(found.contains(&TreeViolation::ConcurrentWithoutRegions { state: "Q".to_string() }));
    }

    #[test]
    fn empty_name_and_initial_on_leaf() {
        let nodes = vec![
            fixtures::node(0, "root", None, &[1], None),
            fixtures::node(1, "", Some(0), &[], None),
        ];
        let mut declarations = undeclared(2);
        declarations[1].initial = Some("Y".to_string());

        let found = violations(validate_tree(&nodes, &declarations));

        assert_eq!(found.len(), 2);
        assert!(found.contains(&TreeViolation::EmptyName { parent: Some("root".to_string()) }));
        assert!(found.contains(&TreeViolation::InitialOnLeaf {
            state: String::new(),
            initial: "Y".to_string(),
        }));
    }
}
