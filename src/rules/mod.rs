//! The rule language.
//!
//! Rules are authored as free text inside template annotations and parsed
//! into a small AST:
//!
//! - [`RuleCache`]: raw lines per skill, extracted from `<skill-ai>` blocks
//! - [`Condition`] / [`TargetCondition`]: subject plus comparison
//! - [`Comparison`]: the predicate tested against a value
//! - [`RatingRule`] / [`TargetRule`]: the two line grammars
//! - [`SkillRules`]: a skill's lines parsed once
//!
//! Parsing is separate from evaluation; see [`crate::eval`].

mod block;
mod comparison;
mod condition;
mod error;
mod rule;

pub use block::{CompiledRuleCache, RuleCache};
pub use comparison::{CmpOp, Comparison, Membership, Named, Operand, Sample, Value};
pub use condition::{BattlerScope, Condition, Property, Subject, TargetCondition};
pub use error::{AuthoringError, RuleError};
pub use rule::{Direction, RatingRule, Rule, SkillRules, TargetEffect, TargetRule};
