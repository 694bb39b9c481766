//! Comparison AST and parser.
//!
//! A comparison is the predicate half of a condition: everything after the
//! subject. It is tested against a [`Sample`], which carries the subject's
//! value together with its maximum and the group extremes.
//!
//! ## Grammar
//!
//! Tried in order, keywords case-insensitive:
//!
//! 1. named predicate, optional `is`: `zero` `low` `high` `max` `lowest` `highest`
//! 2. inequality: `<` `<=` `=` `==` `!=` `>=` `>` `below` `under` `above`
//!    `over` `equals` `not equals`, then an integer, `N%`, or `variable N`
//! 3. membership: `is` / `is not`, then `dead`, `on`, `off`, an id, or a
//!    status-effect name (`is not low` and friends are rejected)
//! 4. bare `dead` / `not dead`
//! 5. empty text: truthiness

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{AiConfig, Catalogue, CounterId, Gauge, GlobalStore, StateId};

use super::error::{AuthoringError, RuleError};

static RE_NAMED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:is\s+)?(zero|low|high|max|lowest|highest)$").unwrap()
});

static RE_INEQUALITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(<=|>=|==|!=|<|>|=|below|under|above|over|not\s+equals?|equals?)\s*(.+)$")
        .unwrap()
});

static RE_OPERAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(-?\d+(?:\.\d+)?)\s*(%)?|(?:variable|var)\s*(\d+))$").unwrap()
});

static RE_MEMBERSHIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^is(\s+not)?\s+(.+)$").unwrap());

static RE_BARE_DEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(not\s+)?dead$").unwrap());

/// Predicates that need no operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Named {
    Zero,
    Low,
    High,
    Max,
    Lowest,
    Highest,
}

/// Inequality operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Below,
    AtMost,
    Equal,
    NotEqual,
    AtLeast,
    Above,
}

impl CmpOp {
    fn parse(token: &str) -> Option<Self> {
        let token = token.to_ascii_lowercase();
        let op = match token.split_whitespace().collect::<Vec<_>>().as_slice() {
            ["<"] | ["below"] | ["under"] => CmpOp::Below,
            ["<="] => CmpOp::AtMost,
            ["="] | ["=="] | ["equal"] | ["equals"] => CmpOp::Equal,
            ["!="] | ["not", "equal"] | ["not", "equals"] => CmpOp::NotEqual,
            [">="] => CmpOp::AtLeast,
            [">"] | ["above"] | ["over"] => CmpOp::Above,
            _ => return None,
        };
        Some(op)
    }

    /// Apply the operator to two numbers.
    #[must_use]
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CmpOp::Below => lhs < rhs,
            CmpOp::AtMost => lhs <= rhs,
            CmpOp::Equal => lhs == rhs,
            CmpOp::NotEqual => lhs != rhs,
            CmpOp::AtLeast => lhs >= rhs,
            CmpOp::Above => lhs > rhs,
        }
    }
}

/// Right-hand side of an inequality.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Plain number.
    Number(f64),
    /// Percentage of the subject's maximum.
    Percent(f64),
    /// Current value of a global counter.
    Counter(CounterId),
}

/// Right-hand side of an `is` / `is not` test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    /// Numeric id (a status effect id when the subject is `.state`).
    Id(u32),
    /// `on` / `off`.
    Flag(bool),
    /// Status effect resolved from its name.
    State(StateId),
}

/// Parsed predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Comparison {
    /// No comparison text: the value itself must be truthy.
    Truthy,
    Named(Named),
    Compare { op: CmpOp, operand: Operand },
    Is { negated: bool, target: Membership },
    /// `is dead`: reads aliveness, never the property.
    Dead,
    /// `is not dead`.
    Alive,
}

/// The value a comparison looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    Number(f64),
    Flag(bool),
    States(&'a FxHashSet<StateId>),
}

impl Value<'_> {
    /// Numeric reading: flags are 0/1, status sets count their members.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Flag(on) => f64::from(u8::from(*on)),
            Value::States(states) => states.len() as f64,
        }
    }

    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Flag(on) => *on,
            Value::States(states) => !states.is_empty(),
        }
    }
}

/// Everything a comparison may consult about one subject.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample<'a> {
    pub value: Value<'a>,
    /// Maximum of a resource, `None` for bare attributes and globals.
    pub max: Option<f64>,
    pub group_min: Option<f64>,
    pub group_max: Option<f64>,
    /// Aliveness of the subject, `None` for globals.
    pub alive: Option<bool>,
}

impl<'a> Sample<'a> {
    /// A sample with no maximum, group, or aliveness facet.
    #[must_use]
    pub fn bare(value: Value<'a>) -> Self {
        Self {
            value,
            max: None,
            group_min: None,
            group_max: None,
            alive: None,
        }
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_group(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.group_min = min;
        self.group_max = max;
        self
    }

    #[must_use]
    pub fn with_alive(mut self, alive: bool) -> Self {
        self.alive = Some(alive);
        self
    }

    /// Maximum usable for percentages.
    fn usable_max(&self) -> Option<f64> {
        self.max.filter(|m| *m > 0.0)
    }

    fn percent(&self) -> Option<f64> {
        self.max
            .and_then(|max| Gauge::new(self.value.as_number(), max).percent())
    }
}

impl Comparison {
    /// Parse comparison text. Status-effect names go through `catalogue`.
    pub fn parse(text: &str, catalogue: &dyn Catalogue) -> Result<Self, RuleError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Comparison::Truthy);
        }

        if let Some(caps) = RE_NAMED.captures(text) {
            let named = match caps[1].to_ascii_lowercase().as_str() {
                "zero" => Named::Zero,
                "low" => Named::Low,
                "high" => Named::High,
                "max" => Named::Max,
                "lowest" => Named::Lowest,
                _ => Named::Highest,
            };
            return Ok(Comparison::Named(named));
        }

        if let Some(caps) = RE_INEQUALITY.captures(text) {
            let op = CmpOp::parse(&caps[1]).ok_or_else(|| RuleError::Comparison(text.to_string()))?;
            let operand = parse_operand(caps[2].trim())
                .ok_or_else(|| RuleError::Comparison(text.to_string()))?;
            return Ok(Comparison::Compare { op, operand });
        }

        if let Some(caps) = RE_MEMBERSHIP.captures(text) {
            let negated = caps.get(1).is_some();
            let target = caps[2].trim();
            // Named predicates cannot be negated; never read them as status names
            if RE_NAMED.is_match(target) {
                return Err(RuleError::Comparison(text.to_string()));
            }
            return parse_membership(negated, target, catalogue);
        }

        if let Some(caps) = RE_BARE_DEAD.captures(text) {
            return Ok(if caps.get(1).is_some() { Comparison::Alive } else { Comparison::Dead });
        }

        Err(RuleError::Comparison(text.to_string()))
    }

    /// True for `dead` / `not dead`, which read aliveness instead of a value.
    #[must_use]
    pub fn is_aliveness(&self) -> bool {
        matches!(self, Comparison::Dead | Comparison::Alive)
    }

    /// Test a sample.
    ///
    /// Predicates that need a maximum fall back to the absolute thresholds
    /// in `config` when the sample has none.
    pub fn test(&self, sample: &Sample, globals: &dyn GlobalStore, config: &AiConfig) -> bool {
        let value = sample.value.as_number();
        match self {
            Comparison::Truthy => sample.value.is_truthy(),

            Comparison::Named(Named::Zero) => value == 0.0,

            Comparison::Named(Named::Low) => match sample.percent() {
                Some(percent) => percent < config.low_percent,
                None => value < config.low_absolute,
            },

            Comparison::Named(Named::High) => match sample.percent() {
                Some(percent) => percent > config.high_percent,
                None => value > config.high_absolute,
            },

            Comparison::Named(Named::Max) => match sample.usable_max() {
                Some(max) => value >= max,
                None => value >= config.high_absolute,
            },

            Comparison::Named(Named::Lowest) => sample.group_min.is_some_and(|min| value <= min),

            Comparison::Named(Named::Highest) => sample.group_max.is_some_and(|max| value >= max),

            Comparison::Compare { op, operand } => {
                let rhs = match operand {
                    Operand::Number(n) => *n,
                    Operand::Percent(p) => match sample.usable_max() {
                        Some(max) => max * p / 100.0,
                        None => *p,
                    },
                    Operand::Counter(id) => globals.counter(*id) as f64,
                };
                op.holds(value, rhs)
            }

            Comparison::Is { negated, target } => {
                let matched = membership(sample.value, *target);
                matched != *negated
            }

            Comparison::Dead => sample.alive == Some(false),

            Comparison::Alive => sample.alive == Some(true),
        }
    }
}

fn parse_operand(text: &str) -> Option<Operand> {
    let caps = RE_OPERAND.captures(text)?;
    if let Some(counter) = caps.get(3) {
        return counter.as_str().parse().ok().map(|id| Operand::Counter(CounterId::new(id)));
    }
    let number: f64 = caps.get(1)?.as_str().parse().ok()?;
    if caps.get(2).is_some() {
        Some(Operand::Percent(number))
    } else {
        Some(Operand::Number(number))
    }
}

fn parse_membership(
    negated: bool,
    target: &str,
    catalogue: &dyn Catalogue,
) -> Result<Comparison, RuleError> {
    let lowered = target.to_ascii_lowercase();
    let target = match lowered.as_str() {
        "dead" => {
            return Ok(if negated { Comparison::Alive } else { Comparison::Dead });
        }
        "on" => Membership::Flag(true),
        "off" => Membership::Flag(false),
        _ => {
            if let Ok(id) = target.parse::<u32>() {
                Membership::Id(id)
            } else {
                let state = catalogue
                    .state_id(target)
                    .ok_or_else(|| AuthoringError::UnknownState(target.to_string()))?;
                Membership::State(state)
            }
        }
    };
    Ok(Comparison::Is { negated, target })
}

fn membership(value: Value, target: Membership) -> bool {
    match (value, target) {
        (Value::States(states), Membership::Id(id)) => states.contains(&StateId::new(id)),
        (Value::States(states), Membership::State(state)) => states.contains(&state),
        (Value::States(states), Membership::Flag(on)) => states.is_empty() != on,
        (Value::Number(n), Membership::Id(id)) => n == f64::from(id),
        (Value::Number(n), Membership::State(state)) => n == f64::from(state.raw()),
        (Value::Number(n), Membership::Flag(on)) => (n != 0.0) == on,
        (Value::Flag(flag), Membership::Id(id)) => flag == (id != 0),
        (Value::Flag(flag), Membership::Flag(on)) => flag == on,
        (Value::Flag(_), Membership::State(_)) => false,
    }
}
