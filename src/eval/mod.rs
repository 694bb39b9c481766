//! Evaluation of parsed conditions against live battle state.
//!
//! Collaborators (battlefield, global store, catalogue, thresholds) are
//! passed in through [`ConditionContext`]; nothing is looked up globally.

mod context;
mod evaluator;

pub use context::ConditionContext;
pub use evaluator::{numeric_value, sample, ConditionEvaluator, GroupStats};
