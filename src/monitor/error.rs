//! Errors raised by misuse of the pattern-building protocol.

use thiserror::Error;

/// Errors that can occur when finishing a [`SequenceMatcher`](super::SequenceMatcher).
///
/// These signal a broken expectation, not a failed match: a log that does
/// not fit the pattern is reported as `Ok(false)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatcherError {
    #[error("Sequence matcher used before begin()")]
    NotStarted,

    #[error("Unbalanced pattern: {open} group(s) still open at end()")]
    UnbalancedGroup { open: usize },

    #[error("Unbalanced pattern: end of {found} without a matching begin")]
    UnmatchedEnd { found: &'static str },

    #[error("Group end mismatch: expected end of {expected}, found end of {found}")]
    MismatchedGroupEnd {
        expected: &'static str,
        found: &'static str,
    },
}
