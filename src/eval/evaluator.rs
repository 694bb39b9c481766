//! Condition evaluation against a battle snapshot.
//!
//! Group conditions quantify over the resolved group: `any` needs one
//! member to match, `all` needs every member. Group extremes for `lowest`
//! and `highest` are computed once per evaluation, not per member.

use tracing::trace;

use crate::core::{Battler, Gauge, Roster};
use crate::rules::{BattlerScope, Comparison, Condition, Property, Sample, Subject, Value};

use super::context::ConditionContext;

/// Minimum and maximum of a property across a group.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroupStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl GroupStats {
    /// Scan a group once. Empty without a property or without members.
    pub fn of<'b>(
        property: Option<&Property>,
        members: impl IntoIterator<Item = &'b Battler>,
    ) -> Self {
        let Some(property) = property else {
            return Self::default();
        };
        members
            .into_iter()
            .map(|battler| numeric_value(battler, property))
            .fold(Self::default(), |stats, value| Self {
                min: Some(stats.min.map_or(value, |min| min.min(value))),
                max: Some(stats.max.map_or(value, |max| max.max(value))),
            })
    }
}

/// Numeric reading of a property. Missing attributes read as zero.
#[must_use]
pub fn numeric_value(battler: &Battler, property: &Property) -> f64 {
    match property {
        Property::Hp => battler.hp().current,
        Property::Mp => battler.mp().current,
        Property::State => battler.states().len() as f64,
        Property::Attribute(name) => battler.attribute(name).unwrap_or(0.0),
    }
}

/// Build the sample a comparison sees for one battler.
///
/// Without a property the value is the battler's aliveness.
#[must_use]
pub fn sample<'b>(
    battler: &'b Battler,
    property: Option<&Property>,
    stats: GroupStats,
) -> Sample<'b> {
    let sample = match property {
        None => Sample::bare(Value::Flag(battler.is_alive())),
        Some(Property::Hp) => gauge_sample(battler.hp()),
        Some(Property::Mp) => gauge_sample(battler.mp()),
        Some(Property::State) => Sample::bare(Value::States(battler.states())),
        Some(property @ Property::Attribute(_)) => {
            Sample::bare(Value::Number(numeric_value(battler, property)))
        }
    };
    sample
        .with_group(stats.min, stats.max)
        .with_alive(battler.is_alive())
}

fn gauge_sample<'b>(gauge: Gauge) -> Sample<'b> {
    Sample::bare(Value::Number(gauge.current)).with_max(gauge.max)
}

/// Evaluator for parsed conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a rating condition holds.
    pub fn evaluate(condition: &Condition, ctx: &ConditionContext) -> bool {
        let result = match &condition.subject {
            Subject::Battlers { scope, property } => {
                Self::evaluate_group(*scope, property.as_ref(), &condition.comparison, ctx)
            }
            Subject::Flag(id) => {
                let value = Value::Flag(ctx.globals.flag(*id));
                condition.comparison.test(&Sample::bare(value), ctx.globals, ctx.config)
            }
            Subject::Counter(id) => {
                let value = Value::Number(ctx.globals.counter(*id) as f64);
                condition.comparison.test(&Sample::bare(value), ctx.globals, ctx.config)
            }
        };
        trace!(?condition, result, "evaluated condition");
        result
    }

    /// Test one battler against a comparison, given precomputed group stats.
    pub fn test_battler(
        comparison: &Comparison,
        property: Option<&Property>,
        battler: &Battler,
        stats: GroupStats,
        ctx: &ConditionContext,
    ) -> bool {
        comparison.test(&sample(battler, property, stats), ctx.globals, ctx.config)
    }

    fn evaluate_group(
        scope: BattlerScope,
        property: Option<&Property>,
        comparison: &Comparison,
        ctx: &ConditionContext,
    ) -> bool {
        // Aliveness tests must see the dead; everything else only the living.
        let roster = if comparison.is_aliveness() {
            Roster::All
        } else {
            Roster::Living
        };
        let members = match scope {
            BattlerScope::User => vec![ctx.user],
            BattlerScope::Any(side) | BattlerScope::All(side) => {
                ctx.field.group(ctx.user, side, roster)
            }
        };
        let stats = GroupStats::of(property, members.iter().copied());
        let matches =
            |battler: &&Battler| Self::test_battler(comparison, property, battler, stats, ctx);

        match scope {
            BattlerScope::All(_) => members.iter().all(matches),
            BattlerScope::User | BattlerScope::Any(_) => members.iter().any(matches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Battlefield, BattlerId, CounterId, FlagId, Globals, Registry, StateId, Team,
    };

    fn registry() -> Registry {
        Registry::new().with_state(StateId(4), "Poisoned")
    }

    fn eval(clause: &str, user: BattlerId, field: &Battlefield, globals: &Globals) -> bool {
        let reg = registry();
        let condition = Condition::parse(clause, &reg).unwrap();
        let user = field.get(user).unwrap();
        let ctx = ConditionContext::new(user, field)
            .with_globals(globals)
            .with_catalogue(&reg);
        ConditionEvaluator::evaluate(&condition, &ctx)
    }

    fn troop() -> Battlefield {
        Battlefield::new()
            .with(Battler::new(BattlerId(1), Team::Troop).with_hp(30, 30).with_mp(2, 10))
            .with(Battler::new(BattlerId(2), Team::Troop).with_hp(10, 40).with_state(StateId(4)))
            .with(Battler::new(BattlerId(3), Team::Troop).with_hp(0, 20).dead())
            .with(Battler::new(BattlerId(10), Team::Party).with_hp(50, 50).with_attr("atk", 12))
            .with(Battler::new(BattlerId(11), Team::Party).with_hp(5, 50).with_attr("atk", 20))
    }

    #[test]
    fn test_group_stats() {
        let field = troop();
        let user = field.get(BattlerId(10)).unwrap();
        let party = field.group(user, crate::core::Side::Friendly, Roster::Living);
        let stats = GroupStats::of(Some(&Property::Attribute("atk".into())), party);
        assert_eq!(stats, GroupStats { min: Some(12.0), max: Some(20.0) });

        let party = field.team(Team::Party, Roster::All);
        assert_eq!(GroupStats::of(None, party), GroupStats::default());
    }

    #[test]
    fn test_self_scope() {
        let field = troop();
        let globals = Globals::new();
        assert!(eval("self.mp low", BattlerId(1), &field, &globals));
        assert!(!eval("self.hp low", BattlerId(1), &field, &globals));
        assert!(eval("user.hp max", BattlerId(1), &field, &globals));
    }

    #[test]
    fn test_any_and_all() {
        let field = troop();
        let globals = Globals::new();
        // Living allies of 1: {1: 30/30, 2: 10/40}
        assert!(eval("ally.hp low", BattlerId(1), &field, &globals));
        assert!(!eval("all ally.hp low", BattlerId(1), &field, &globals));
        assert!(eval("ally.state is Poisoned", BattlerId(1), &field, &globals));
        assert!(!eval("all allies.state is Poisoned", BattlerId(1), &field, &globals));
    }

    #[test]
    fn test_dead_members_only_count_for_aliveness() {
        let field = troop();
        let globals = Globals::new();
        // The dead slime at 0/20 HP is not considered for `zero`
        assert!(!eval("ally.hp zero", BattlerId(1), &field, &globals));
        assert!(eval("ally is dead", BattlerId(1), &field, &globals));
        assert!(eval("enemy is not dead", BattlerId(1), &field, &globals));
        assert!(!eval("all ally is not dead", BattlerId(1), &field, &globals));
        assert!(!eval("enemy is dead", BattlerId(1), &field, &globals));
    }

    #[test]
    fn test_lowest_against_group() {
        let field = troop();
        let globals = Globals::new();
        // Hostile group of the party: 1 (30) and 2 (10)
        assert!(eval("enemy.hp lowest", BattlerId(10), &field, &globals));
        assert!(!eval("all enemy.hp lowest", BattlerId(10), &field, &globals));
        assert!(eval("self.atk lowest", BattlerId(10), &field, &globals));
    }

    #[test]
    fn test_all_ally_hp_max_single_member() {
        let at_max = Battlefield::new().with(Battler::new(BattlerId(1), Team::Troop).with_hp(8, 8));
        let below = Battlefield::new().with(Battler::new(BattlerId(1), Team::Troop).with_hp(7, 8));
        let globals = Globals::new();

        assert!(eval("all ally.hp max", BattlerId(1), &at_max, &globals));
        assert!(!eval("all ally.hp max", BattlerId(1), &below, &globals));
    }

    #[test]
    fn test_global_flag() {
        let field = troop();
        let globals = Globals::new().with_flag(FlagId(5), true);
        assert!(eval("switch 5 is on", BattlerId(1), &field, &globals));
        assert!(eval("switch 5", BattlerId(1), &field, &globals));
        assert!(eval("switch 6 is off", BattlerId(1), &field, &globals));
        assert!(!eval("switch 6", BattlerId(1), &field, &globals));
    }

    #[test]
    fn test_global_counter_composes_with_comparison() {
        let field = troop();
        let globals = Globals::new()
            .with_counter(CounterId(3), 12)
            .with_counter(CounterId(4), 12);
        assert!(eval("variable 3 above 10", BattlerId(1), &field, &globals));
        assert!(!eval("variable 3 below 10", BattlerId(1), &field, &globals));
        assert!(eval("var 3 = var 4", BattlerId(1), &field, &globals));
        assert!(!eval("variable 9", BattlerId(1), &field, &globals));
    }

    #[test]
    fn test_counter_operand_against_battler() {
        let field = troop();
        let globals = Globals::new().with_counter(CounterId(1), 15);
        assert!(eval("enemy.atk above variable 1", BattlerId(1), &field, &globals));
        assert!(!eval("all enemy.atk above variable 1", BattlerId(1), &field, &globals));
    }
}
