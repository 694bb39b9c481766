//! Rating adjustment.
//!
//! Each `boost`/`nerf` rule whose condition holds adds or subtracts its
//! magnitude. The host then picks a skill from the adjusted ratings with its
//! own selection algorithm; only the numbers change here.

use tracing::{debug, trace, warn};

use crate::eval::{ConditionContext, ConditionEvaluator};
use crate::rules::{RatingRule, SkillRules};

/// Adjust a skill's base rating using its raw rule lines.
///
/// Lines of other grammars are ignored. Lines that fail to parse are logged
/// and skipped so one typo never disables the remaining rules.
pub fn adjust_rating<S: AsRef<str>>(base: i64, lines: &[S], ctx: &ConditionContext) -> i64 {
    let mut total = 0;
    for line in lines {
        let line = line.as_ref();
        match RatingRule::parse(line, ctx.catalogue) {
            Ok(rule) => total += rule_delta(&rule, ctx),
            Err(err) if err.is_other_grammar() => trace!(line, "not a rating rule"),
            Err(err) => warn!(%err, "skipping rating rule"),
        }
    }
    base + total
}

/// Adjust a skill's base rating using pre-parsed rules.
pub fn apply_rating_rules(base: i64, rules: &[RatingRule], ctx: &ConditionContext) -> i64 {
    base + rules.iter().map(|rule| rule_delta(rule, ctx)).sum::<i64>()
}

fn rule_delta(rule: &RatingRule, ctx: &ConditionContext) -> i64 {
    if ConditionEvaluator::evaluate(&rule.condition, ctx) {
        debug!(delta = rule.delta(), user = %ctx.user.id, "rating rule fired");
        rule.delta()
    } else {
        0
    }
}

impl SkillRules {
    /// See [`apply_rating_rules`].
    pub fn adjust_rating(&self, base: i64, ctx: &ConditionContext) -> i64 {
        apply_rating_rules(base, &self.rating, ctx)
    }
}
