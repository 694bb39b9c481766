//! Condition AST and parser.
//!
//! A condition names a subject (a battler group or a global store) and the
//! comparison its value must satisfy:
//!
//! ```text
//! all ally.hp max          every living friend at full HP
//! enemy.state is Poisoned  at least one living foe poisoned
//! self.mp below 50%        the acting battler under half MP
//! ally is dead             at least one friend dead
//! switch 12 is on          global flag 12 set
//! variable 3 above 10      global counter 3 greater than 10
//! ```
//!
//! Target rules use a reduced form without a subject: `[.property] comparison`,
//! evaluated against each candidate in turn.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::{Catalogue, CounterId, FlagId, Side};

use super::comparison::Comparison;
use super::error::RuleError;

static RE_BATTLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        concat!(
            r"(?i)^(?:(all)\s+)?",
            r"(self|user|allies|ally|friends|friend|enemies|enemy|foes|foe)\b",
            r"\s*(?:\.\s*(\w+))?\s*(.*)$",
        ),
    )
    .unwrap()
});

static RE_FLAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^switch\s*(\d+)\b\s*(.*)$").unwrap());

static RE_COUNTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:variable|var)\s*(\d+)\b\s*(.*)$").unwrap());

static RE_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\.\s*(\w+))?\s*(.*)$").unwrap());

/// Which battler attribute a condition reads.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// Hit points, with a maximum.
    Hp,
    /// Magic points, with a maximum.
    Mp,
    /// The set of active status effects.
    State,
    /// Any other attribute, lowercase, without a maximum.
    Attribute(String),
}

impl Property {
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "hp" => Property::Hp,
            "mp" => Property::Mp,
            "state" | "states" => Property::State,
            _ => Property::Attribute(name),
        }
    }
}

/// Battler groups a rating condition can quantify over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlerScope {
    /// The acting battler alone.
    User,
    /// At least one member of the group.
    Any(Side),
    /// Every member of the group.
    All(Side),
}

/// What a condition reads.
///
/// Global stores are scalars, so only battler subjects carry a property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Subject {
    Battlers {
        scope: BattlerScope,
        /// `None` only for the bare `dead` / `not dead` form.
        property: Option<Property>,
    },
    Flag(FlagId),
    Counter(CounterId),
}

/// Parsed rating condition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub subject: Subject,
    pub comparison: Comparison,
}

impl Condition {
    /// Parse the clause after `when`.
    pub fn parse(clause: &str, catalogue: &dyn Catalogue) -> Result<Self, RuleError> {
        let clause = clause.trim();

        if let Some(caps) = RE_BATTLER.captures(clause) {
            let all = caps.get(1).is_some();
            let scope = match caps[2].to_ascii_lowercase().as_str() {
                "self" | "user" => BattlerScope::User,
                "allies" | "ally" | "friends" | "friend" if all => {
                    BattlerScope::All(Side::Friendly)
                }
                "allies" | "ally" | "friends" | "friend" => BattlerScope::Any(Side::Friendly),
                _ if all => BattlerScope::All(Side::Hostile),
                _ => BattlerScope::Any(Side::Hostile),
            };
            let property = caps.get(3).map(|m| Property::parse(m.as_str()));
            let comparison = Comparison::parse(&caps[4], catalogue)?;
            if property.is_none() && !comparison.is_aliveness() {
                return Err(RuleError::Condition(clause.to_string()));
            }
            return Ok(Self {
                subject: Subject::Battlers { scope, property },
                comparison,
            });
        }

        if let Some(caps) = RE_FLAG.captures(clause) {
            let id = parse_id(&caps[1], clause)?;
            return Ok(Self {
                subject: Subject::Flag(FlagId::new(id)),
                comparison: Comparison::parse(&caps[2], catalogue)?,
            });
        }

        if let Some(caps) = RE_COUNTER.captures(clause) {
            let id = parse_id(&caps[1], clause)?;
            return Ok(Self {
                subject: Subject::Counter(CounterId::new(id)),
                comparison: Comparison::parse(&caps[2], catalogue)?,
            });
        }

        Err(RuleError::Condition(clause.to_string()))
    }
}

/// Parsed target clause: the candidate is the implicit subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetCondition {
    pub property: Option<Property>,
    pub comparison: Comparison,
}

impl TargetCondition {
    /// Parse the clause after `target [Nx | only]`.
    ///
    /// Without a property the clause must be an aliveness test; an empty
    /// clause means "is not dead".
    pub fn parse(clause: &str, catalogue: &dyn Catalogue) -> Result<Self, RuleError> {
        let clause = clause.trim();
        let caps = RE_TARGET
            .captures(clause)
            .ok_or_else(|| RuleError::Condition(clause.to_string()))?;

        let property = caps.get(1).map(|m| Property::parse(m.as_str()));
        let rest = caps.get(2).map_or("", |m| m.as_str());

        let comparison = match (&property, rest.trim().is_empty()) {
            (None, true) => Comparison::Alive,
            _ => Comparison::parse(rest, catalogue)?,
        };
        if property.is_none() && !comparison.is_aliveness() {
            return Err(RuleError::Condition(clause.to_string()));
        }
        Ok(Self { property, comparison })
    }
}

fn parse_id(digits: &str, clause: &str) -> Result<u32, RuleError> {
    digits
        .parse()
        .map_err(|_| RuleError::Condition(clause.to_string()))
}
