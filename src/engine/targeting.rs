//! Target weight adjustment.
//!
//! Target rules reweight already-legal candidates. A scaling rule multiplies
//! the weight of every matching candidate; an exclusive (`only`) rule zeroes
//! every candidate that does not match. Rules apply in source order to a
//! running weight list, so a later `only` can zero a weight an earlier rule
//! boosted.

use tracing::{trace, warn};

use crate::core::Battler;
use crate::eval::{ConditionContext, ConditionEvaluator, GroupStats};
use crate::rules::{SkillRules, TargetRule};

/// A candidate paired with its selection weight.
pub type Weighted<'b> = (&'b Battler, f64);

/// Adjust candidate weights using a skill's raw rule lines.
///
/// A missing base weight counts as 1.0. Lines of other grammars are ignored;
/// lines that fail to parse are logged and skipped.
pub fn adjust_target_weights<'b, S: AsRef<str>>(
    candidates: &[&'b Battler],
    base_weights: &[f64],
    lines: &[S],
    ctx: &ConditionContext,
) -> Vec<Weighted<'b>> {
    let mut weights = initial_weights(candidates, base_weights);
    for line in lines {
        let line = line.as_ref();
        match TargetRule::parse(line, ctx.catalogue) {
            Ok(rule) => apply_rule(&rule, candidates, &mut weights, ctx),
            Err(err) if err.is_other_grammar() => trace!(line, "not a target rule"),
            Err(err) => warn!(%err, "skipping target rule"),
        }
    }
    candidates.iter().copied().zip(weights).collect()
}

/// Adjust candidate weights using pre-parsed rules.
pub fn apply_target_rules<'b>(
    candidates: &[&'b Battler],
    base_weights: &[f64],
    rules: &[TargetRule],
    ctx: &ConditionContext,
) -> Vec<Weighted<'b>> {
    let mut weights = initial_weights(candidates, base_weights);
    for rule in rules {
        apply_rule(rule, candidates, &mut weights, ctx);
    }
    candidates.iter().copied().zip(weights).collect()
}

fn initial_weights(candidates: &[&Battler], base_weights: &[f64]) -> Vec<f64> {
    (0..candidates.len())
        .map(|i| base_weights.get(i).copied().unwrap_or(1.0))
        .collect()
}

fn apply_rule(
    rule: &TargetRule,
    candidates: &[&Battler],
    weights: &mut [f64],
    ctx: &ConditionContext,
) {
    let condition = &rule.condition;
    let property = condition.property.as_ref();
    let stats = GroupStats::of(property, candidates.iter().copied());
    let multiplier = rule.multiplier(ctx.config);

    for (candidate, weight) in candidates.iter().zip(weights.iter_mut()) {
        let holds = ConditionEvaluator::test_battler(
            &condition.comparison,
            property,
            candidate,
            stats,
            ctx,
        );
        match (holds, rule.is_exclusive()) {
            (true, false) => *weight *= multiplier,
            (false, true) => *weight = 0.0,
            _ => continue,
        }
        trace!(candidate = %candidate.id, weight = *weight, "target weight changed");
    }
}

impl SkillRules {
    /// See [`apply_target_rules`].
    pub fn adjust_target_weights<'b>(
        &self,
        candidates: &[&'b Battler],
        base_weights: &[f64],
        ctx: &ConditionContext,
    ) -> Vec<Weighted<'b>> {
        apply_target_rules(candidates, base_weights, &self.targeting, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Battlefield, BattlerId, Registry, StateId, Team};

    fn weights(result: &[Weighted]) -> Vec<f64> {
        result.iter().map(|(_, w)| *w).collect()
    }

    #[test]
    fn test_scale_matching_candidates() {
        let a = Battler::new(BattlerId(1), Team::Party).with_hp(2, 6);
        let b = Battler::new(BattlerId(2), Team::Party).with_hp(5, 6);
        let c = Battler::new(BattlerId(3), Team::Party).with_hp(0, 6);
        let field = Battlefield::new();
        let user = Battler::new(BattlerId(9), Team::Troop);
        let ctx = ConditionContext::new(&user, &field);

        let lines = ["target 3x .hp low"];
        let result = adjust_target_weights(&[&a, &b, &c], &[1.0, 1.0, 1.0], &lines, &ctx);
        assert_eq!(weights(&result), vec![1.0, 1.0, 3.0]);
        assert_eq!(result[2].0.id, BattlerId(3));
    }

    #[test]
    fn test_exclusive_zeroes_non_matching() {
        let reg = Registry::new().with_state(StateId(4), "Poisoned");
        let a = Battler::new(BattlerId(1), Team::Party).with_state(StateId(4));
        let b = Battler::new(BattlerId(2), Team::Party);
        let field = Battlefield::new();
        let user = Battler::new(BattlerId(9), Team::Troop);
        let ctx = ConditionContext::new(&user, &field).with_catalogue(&reg);

        let lines = ["target only .state is Poisoned"];
        let result = adjust_target_weights(&[&a, &b], &[3.0, 2.0], &lines, &ctx);
        assert_eq!(weights(&result), vec![3.0, 0.0]);
    }

    #[test]
    fn test_later_exclusive_overrides_boost() {
        let a = Battler::new(BattlerId(1), Team::Party).with_hp(10, 100);
        let b = Battler::new(BattlerId(2), Team::Party).with_hp(90, 100);
        let field = Battlefield::new();
        let user = Battler::new(BattlerId(9), Team::Troop);
        let ctx = ConditionContext::new(&user, &field);

        let lines = ["target .hp lowest", "target only .hp high"];
        let result = adjust_target_weights(&[&a, &b], &[1.0, 1.0], &lines, &ctx);
        assert_eq!(weights(&result), vec![0.0, 1.0]);

        let reversed = ["target only .hp high", "target .hp lowest"];
        let result = adjust_target_weights(&[&a, &b], &[1.0, 1.0], &reversed, &ctx);
        assert_eq!(weights(&result), vec![0.0, 1.0]);
    }

    #[test]
    fn test_missing_base_weights_default_to_one() {
        let a = Battler::new(BattlerId(1), Team::Party).with_hp(1, 10);
        let b = Battler::new(BattlerId(2), Team::Party).with_hp(9, 10);
        let field = Battlefield::new();
        let user = Battler::new(BattlerId(9), Team::Troop);
        let ctx = ConditionContext::new(&user, &field);

        let result = adjust_target_weights(&[&a, &b], &[4.0], &["target .hp lowest"], &ctx);
        assert_eq!(weights(&result), vec![8.0, 1.0]);
    }

    #[test]
    fn test_compiled_matches_raw() {
        let a = Battler::new(BattlerId(1), Team::Party).with_hp(1, 10).with_attr("def", 3);
        let b = Battler::new(BattlerId(2), Team::Party).with_hp(9, 10).with_attr("def", 8);
        let field = Battlefield::new();
        let user = Battler::new(BattlerId(9), Team::Troop);
        let reg = Registry::new();
        let ctx = ConditionContext::new(&user, &field);

        let lines = [
            "target 1.5x .def highest",
            "boost 2 when self.hp low",
            "target .hp below 50%",
        ];
        let rules = SkillRules::compile(&lines, &reg).unwrap();
        let raw = adjust_target_weights(&[&a, &b], &[1.0, 1.0], &lines, &ctx);
        let compiled = rules.adjust_target_weights(&[&a, &b], &[1.0, 1.0], &ctx);

        assert_eq!(weights(&raw), weights(&compiled));
        assert_eq!(weights(&raw), vec![2.0, 1.5]);
    }
}
