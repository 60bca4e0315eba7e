//! Match-state register
//!
//! The legacy language exposes match results as ambient state: a statement
//! runs `$line =~ /pat/` and later statements read `$1`, `$2` from whatever
//! matched last. [`MatchRegister`] reproduces that coupling exactly,
//! including its hazard: a later unrelated match silently overwrites the
//! earlier outcome. That hazard is part of the semantics translated
//! programs rely on, so it is preserved rather than fixed.
//!
//! The register is an ordinary value, not a true global. Each
//! translated-program instance owns its own register; there is no
//! cross-instance sharing.

use std::fmt;

use anyhow::Result;

use crate::directive::MatchDirective;
use crate::engine;

/// Which side of the legacy bind operator a match call came from.
///
/// `=~` asserts a match; `!~` asserts its absence. The boolean returned by
/// [`MatchRegister::record`] is the raw match result XORed with the
/// negation, so a `!~` query returns true exactly when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    Affirm,
    Negate,
}

impl MatchOp {
    /// Map the legacy operator token to its semantics selector.
    pub fn from_token(token: &str) -> Option<MatchOp> {
        match token {
            "=~" => Some(MatchOp::Affirm),
            "!~" => Some(MatchOp::Negate),
            _ => None,
        }
    }
}

/// Outcome of the most recent match attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    NoMatch,
    /// Ordered captures: index 0 is the whole match, 1..N the
    /// parenthesized groups. `None` marks a group that did not
    /// participate in the match.
    Matched { groups: Vec<Option<String>> },
}

/// Group retrieval with no valid prior match to read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoActiveMatchError {
    /// No match operation has ever been recorded.
    NothingRecorded,
    /// The most recent match attempt found nothing.
    LastMatchFailed,
    /// The requested group was not captured by the last outcome.
    GroupNotCaptured { group: usize, available: usize },
}

impl fmt::Display for NoActiveMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoActiveMatchError::NothingRecorded => {
                write!(f, "no match has been recorded")
            }
            NoActiveMatchError::LastMatchFailed => {
                write!(f, "the most recent match attempt did not match")
            }
            NoActiveMatchError::GroupNotCaptured { group, available } => {
                write!(
                    f,
                    "group {} was not captured by the last match ({} groups available)",
                    group, available
                )
            }
        }
    }
}

impl std::error::Error for NoActiveMatchError {}

/// Single-slot holder of the most recent [`MatchOutcome`].
#[derive(Debug, Default)]
pub struct MatchRegister {
    last: Option<MatchOutcome>,
}

impl MatchRegister {
    pub fn new() -> Self {
        MatchRegister { last: None }
    }

    /// Search `pattern` against `subject`, store the outcome (overwriting
    /// any previous one), and return the boolean the legacy operator
    /// would produce.
    ///
    /// An invalid pattern is an error and leaves the register untouched.
    pub fn record(&mut self, op: MatchOp, subject: &str, pattern: &str) -> Result<bool> {
        self.record_with(op, subject, pattern, false)
    }

    /// [`record`](Self::record) for a parsed `m//` literal, honoring its
    /// `i` flag.
    pub fn record_directive(
        &mut self,
        op: MatchOp,
        subject: &str,
        directive: &MatchDirective,
    ) -> Result<bool> {
        self.record_with(op, subject, &directive.pattern, directive.case_insensitive())
    }

    fn record_with(
        &mut self,
        op: MatchOp,
        subject: &str,
        pattern: &str,
        case_insensitive: bool,
    ) -> Result<bool> {
        let re = engine::compile(pattern, case_insensitive)?;

        let matched = match engine::search(&re, subject) {
            Some(groups) => {
                self.last = Some(MatchOutcome::Matched { groups });
                true
            }
            None => {
                self.last = Some(MatchOutcome::NoMatch);
                false
            }
        };

        Ok(match op {
            MatchOp::Affirm => matched,
            MatchOp::Negate => !matched,
        })
    }

    /// The text of capture group `n` from the most recently recorded
    /// outcome.
    pub fn group(&self, n: usize) -> Result<String, NoActiveMatchError> {
        let outcome = self
            .last
            .as_ref()
            .ok_or(NoActiveMatchError::NothingRecorded)?;

        match outcome {
            MatchOutcome::NoMatch => Err(NoActiveMatchError::LastMatchFailed),
            MatchOutcome::Matched { groups } => match groups.get(n) {
                Some(Some(text)) => Ok(text.clone()),
                // Out of range and unparticipating groups read the same
                // way: that group was not captured by this outcome.
                _ => Err(NoActiveMatchError::GroupNotCaptured {
                    group: n,
                    available: groups.len(),
                }),
            },
        }
    }

    /// The raw outcome, for callers that want to inspect it directly.
    pub fn last_outcome(&self) -> Option<&MatchOutcome> {
        self.last.as_ref()
    }
}
