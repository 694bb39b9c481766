//! Rule line grammars.
//!
//! ```text
//! boost 3 when enemy.hp low
//! nerf 2 when switch 5 is on
//! target 3x .hp lowest
//! target only .state is Poisoned
//! target is not dead
//! ```
//!
//! Lines are parsed into [`RatingRule`] or [`TargetRule`]. A skill's lines
//! can be compiled once into [`SkillRules`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AiConfig, Catalogue};

use super::condition::{Condition, TargetCondition};
use super::error::{AuthoringError, RuleError};

static RE_RATING_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(boost|nerf)\b").unwrap());

static RE_RATING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(boost|nerf)\s+(\d+)\s+when\b\s*(.+)$").unwrap());

static RE_TARGET_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^target\b").unwrap());

static RE_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^target\b\s*(?:(only)\b|(\d+(?:\.\d+)?)\s*x\b)?\s*(.*)$").unwrap()
});

/// Which way a rating rule moves the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Boost,
    Nerf,
}

/// `boost|nerf <n> when <condition>`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingRule {
    pub direction: Direction,
    pub magnitude: u32,
    pub condition: Condition,
}

impl RatingRule {
    /// Parse one rule line.
    ///
    /// Lines that do not start with `boost` or `nerf` fail with
    /// [`RuleError::NotARule`].
    pub fn parse(line: &str, catalogue: &dyn Catalogue) -> Result<Self, RuleError> {
        let line = line.trim();
        if !RE_RATING_HEAD.is_match(line) {
            return Err(RuleError::NotARule { expected: "rating", line: line.to_string() });
        }

        let caps = RE_RATING
            .captures(line)
            .ok_or_else(|| RuleError::Malformed(line.to_string()))?;
        let direction = if caps[1].eq_ignore_ascii_case("boost") {
            Direction::Boost
        } else {
            Direction::Nerf
        };
        let magnitude = caps[2]
            .parse()
            .map_err(|_| RuleError::Malformed(line.to_string()))?;
        let condition = Condition::parse(&caps[3], catalogue)?;

        Ok(Self { direction, magnitude, condition })
    }

    /// Signed score change when the condition holds.
    #[must_use]
    pub fn delta(&self) -> i64 {
        let magnitude = i64::from(self.magnitude);
        match self.direction {
            Direction::Boost => magnitude,
            Direction::Nerf => -magnitude,
        }
    }
}

/// What a target rule does to a candidate's weight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TargetEffect {
    /// Multiply matching candidates. `None` uses the configured default.
    Scale(Option<f64>),
    /// Zero every candidate that does not match.
    Exclusive,
}

/// `target [<n>x | only] [.<property>] <comparison>`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetRule {
    pub effect: TargetEffect,
    pub condition: TargetCondition,
}

impl TargetRule {
    /// Parse one rule line.
    ///
    /// Lines that do not start with `target` fail with [`RuleError::NotARule`].
    pub fn parse(line: &str, catalogue: &dyn Catalogue) -> Result<Self, RuleError> {
        let line = line.trim();
        if !RE_TARGET_HEAD.is_match(line) {
            return Err(RuleError::NotARule { expected: "target", line: line.to_string() });
        }

        let caps = RE_TARGET
            .captures(line)
            .ok_or_else(|| RuleError::Malformed(line.to_string()))?;
        let effect = if caps.get(1).is_some() {
            TargetEffect::Exclusive
        } else if let Some(m) = caps.get(2) {
            let multiplier: f64 = m
                .as_str()
                .parse()
                .map_err(|_| RuleError::Malformed(line.to_string()))?;
            if multiplier <= 0.0 {
                return Err(RuleError::Malformed(line.to_string()));
            }
            TargetEffect::Scale(Some(multiplier))
        } else {
            TargetEffect::Scale(None)
        };
        let condition = TargetCondition::parse(caps.get(3).map_or("", |m| m.as_str()), catalogue)?;

        Ok(Self { effect, condition })
    }

    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        matches!(self.effect, TargetEffect::Exclusive)
    }

    /// Multiplier applied to matching candidates; 1.0 for exclusive rules.
    #[must_use]
    pub fn multiplier(&self, config: &AiConfig) -> f64 {
        match self.effect {
            TargetEffect::Scale(multiplier) => multiplier.unwrap_or(config.default_multiplier),
            TargetEffect::Exclusive => 1.0,
        }
    }
}

/// One parsed line of either grammar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    Rating(RatingRule),
    Target(TargetRule),
}

impl Rule {
    pub fn parse(line: &str, catalogue: &dyn Catalogue) -> Result<Self, RuleError> {
        match RatingRule::parse(line, catalogue) {
            Err(err) if err.is_other_grammar() => {
                TargetRule::parse(line, catalogue).map(Rule::Target).map_err(|err| {
                    if err.is_other_grammar() {
                        RuleError::Malformed(line.trim().to_string())
                    } else {
                        err
                    }
                })
            }
            result => result.map(Rule::Rating),
        }
    }
}

/// A skill's rules, parsed once.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillRules {
    pub rating: Vec<RatingRule>,
    pub targeting: Vec<TargetRule>,
}

impl SkillRules {
    /// Parse every line, keeping source order within each grammar.
    ///
    /// Unknown status-effect names abort compilation. Lines that match
    /// neither grammar, or whose condition cannot be parsed, are skipped.
    pub fn compile<S: AsRef<str>>(
        lines: &[S],
        catalogue: &dyn Catalogue,
    ) -> Result<Self, AuthoringError> {
        let mut rules = SkillRules::default();
        for line in lines {
            let line = line.as_ref();
            match Rule::parse(line, catalogue) {
                Ok(Rule::Rating(rule)) => rules.rating.push(rule),
                Ok(Rule::Target(rule)) => rules.targeting.push(rule),
                Err(RuleError::Authoring(err)) => return Err(err),
                Err(err) => warn!(%err, "skipping skill-ai line"),
            }
        }
        debug!(
            rating = rules.rating.len(),
            targeting = rules.targeting.len(),
            "compiled skill rules"
        );
        Ok(rules)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rating.is_empty() && self.targeting.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Registry, StateId};
    use crate::rules::comparison::{Comparison, Named};
    use crate::rules::condition::Property;

    fn registry() -> Registry {
        Registry::new().with_state(StateId(4), "Poisoned")
    }

    #[test]
    fn test_parse_boost() {
        let rule = RatingRule::parse("Boost 3 when enemy.hp low", &registry()).unwrap();
        assert_eq!(rule.direction, Direction::Boost);
        assert_eq!(rule.magnitude, 3);
        assert_eq!(rule.delta(), 3);
    }

    #[test]
    fn test_parse_nerf() {
        let rule = RatingRule::parse("nerf   12   WHEN self.mp zero", &registry()).unwrap();
        assert_eq!(rule.delta(), -12);
    }

    #[test]
    fn test_rating_grammar_errors() {
        let reg = registry();
        assert!(RatingRule::parse("target .hp low", &reg).unwrap_err().is_other_grammar());
        assert_eq!(
            RatingRule::parse("boost lots when self.hp low", &reg),
            Err(RuleError::Malformed("boost lots when self.hp low".into()))
        );
        assert_eq!(
            RatingRule::parse("boost 2 when boss.hp low", &reg),
            Err(RuleError::Condition("boss.hp low".into()))
        );
    }

    #[test]
    fn test_parse_target_multiplier() {
        let rule = TargetRule::parse("target 3x .hp low", &registry()).unwrap();
        assert_eq!(rule.effect, TargetEffect::Scale(Some(3.0)));
        assert_eq!(rule.condition.property, Some(Property::Hp));
        assert_eq!(rule.condition.comparison, Comparison::Named(Named::Low));
        assert_eq!(rule.multiplier(&AiConfig::DEFAULT), 3.0);

        let rule = TargetRule::parse("target 1.5X.hp lowest", &registry()).unwrap();
        assert_eq!(rule.effect, TargetEffect::Scale(Some(1.5)));
    }

    #[test]
    fn test_parse_target_default_and_only() {
        let rule = TargetRule::parse("target .hp highest", &registry()).unwrap();
        assert_eq!(rule.effect, TargetEffect::Scale(None));
        assert_eq!(rule.multiplier(&AiConfig::DEFAULT), 2.0);

        let rule = TargetRule::parse("TARGET only .state is poisoned", &registry()).unwrap();
        assert!(rule.is_exclusive());
        assert_eq!(rule.multiplier(&AiConfig::DEFAULT), 1.0);
    }

    #[test]
    fn test_target_rejects_zero_multiplier() {
        assert_eq!(
            TargetRule::parse("target 0x .hp low", &registry()),
            Err(RuleError::Malformed("target 0x .hp low".into()))
        );
    }

    #[test]
    fn test_rule_dispatch() {
        let reg = registry();
        assert!(matches!(Rule::parse("boost 1 when ally is dead", &reg), Ok(Rule::Rating(_))));
        assert!(matches!(Rule::parse("target is not dead", &reg), Ok(Rule::Target(_))));
        assert!(matches!(Rule::parse("target not dead", &reg), Ok(Rule::Target(_))));
        assert!(matches!(Rule::parse("nerf 2 when enemy not dead", &reg), Ok(Rule::Rating(_))));
        assert_eq!(
            Rule::parse("// remember to tune", &reg),
            Err(RuleError::Malformed("// remember to tune".into()))
        );
    }

    #[test]
    fn test_compile_skips_malformed_lines() {
        let lines = [
            "boost 2 when self.hp low",
            "boost two when self.hp low",
            "target 2x .hp lowest",
            "gibberish",
            "nerf 1 when switch 3 is on",
        ];
        let rules = SkillRules::compile(&lines, &registry()).unwrap();
        assert_eq!(rules.rating.len(), 2);
        assert_eq!(rules.targeting.len(), 1);
        assert_eq!(rules.rating[1].delta(), -1);
    }

    #[test]
    fn test_compile_skips_negated_named_predicate() {
        let lines = ["boost 1 when self.hp is not low", "boost 2 when self.hp max"];
        let rules = SkillRules::compile(&lines, &registry()).unwrap();
        assert_eq!(rules.rating.len(), 1);
        assert_eq!(rules.rating[0].delta(), 2);
    }

    #[test]
    fn test_compile_fails_on_unknown_state() {
        let lines = ["target only .state is Petrified"];
        assert_eq!(
            SkillRules::compile(&lines, &registry()),
            Err(AuthoringError::UnknownState("Petrified".into()))
        );
    }
}
