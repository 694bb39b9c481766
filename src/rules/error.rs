//! Rule parsing errors.
//!
//! Two tiers: [`AuthoringError`] means the content data is broken and must
//! be fixed before the template is usable. [`RuleError`] describes a single
//! bad line, which decision-time code skips.

use thiserror::Error;

/// Broken references in rule text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthoringError {
    #[error("unknown skill `{0}` in skill-ai block")]
    UnknownSkill(String),

    #[error("unknown status effect `{0}`")]
    UnknownState(String),
}

/// Why a single rule line could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The line belongs to a different rule grammar (or none).
    #[error("not a {expected} rule: `{line}`")]
    NotARule { expected: &'static str, line: String },

    #[error("malformed rule: `{0}`")]
    Malformed(String),

    #[error("unrecognized condition: `{0}`")]
    Condition(String),

    #[error("unrecognized comparison: `{0}`")]
    Comparison(String),

    #[error(transparent)]
    Authoring(#[from] AuthoringError),
}

impl RuleError {
    /// True when the line simply belongs to another grammar.
    #[must_use]
    pub fn is_other_grammar(&self) -> bool {
        matches!(self, RuleError::NotARule { .. })
    }
}
