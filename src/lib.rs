//! # skill-ai
//!
//! Author-written rules for how non-player combatants pick skills and
//! targets in a turn-based battle engine.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: The battle loop, skill execution and data loading
//!    stay in the host. The host calls in with a snapshot and applies the
//!    returned numbers with its own selection algorithm.
//!
//! 2. **Explicit Collaborators**: Global flags, counters and name catalogues
//!    are passed in through [`ConditionContext`], never looked up globally.
//!
//! 3. **Parse Once**: Rule text is extracted at data-load time into a
//!    [`RuleCache`] and can be compiled into [`SkillRules`].
//!
//! ## Rule Text
//!
//! ```text
//! <skill-ai Fire I>
//! boost 3 when all enemy.hp high
//! nerf 5 when self.mp below 20%
//! target 2x .hp lowest
//! target only .state is not Burning
//! </skill-ai>
//! ```
//!
//! ## Modules
//!
//! - `core`: ids, battler snapshots, groups, globals, catalogues, config, RNG
//! - `rules`: rule block extraction, condition/comparison parsing, rule AST
//! - `eval`: condition evaluation against a battle snapshot
//! - `engine`: rating adjustment, target weighting, weighted selection
//!
//! ## Example
//!
//! ```
//! use skill_ai::{
//!     adjust_rating, adjust_target_weights, select_weighted, AiRng, Battler, BattlerId,
//!     Battlefield, ConditionContext, Registry, RuleCache, SkillId, Team,
//! };
//!
//! let registry = Registry::new().with_skill(SkillId::new(3), "Bite");
//! let note = "<skill-ai Bite>\nboost 4 when enemy.hp low\ntarget 3x .hp low\n</skill-ai>";
//! let cache = RuleCache::parse(note, &registry).unwrap();
//!
//! let field = Battlefield::new()
//!     .with(Battler::new(BattlerId::new(1), Team::Troop).with_hp(30, 30))
//!     .with(Battler::new(BattlerId::new(10), Team::Party).with_hp(40, 40))
//!     .with(Battler::new(BattlerId::new(11), Team::Party).with_hp(3, 40));
//!
//! let wolf = field.get(BattlerId::new(1)).unwrap();
//! let ctx = ConditionContext::new(wolf, &field).with_catalogue(&registry);
//! let lines = cache.lines(SkillId::new(3));
//!
//! assert_eq!(adjust_rating(5, lines, &ctx), 9);
//!
//! let candidates = field.group(wolf, skill_ai::Side::Hostile, skill_ai::Roster::Living);
//! let weighted = adjust_target_weights(&candidates, &[1.0, 1.0], lines, &ctx);
//! assert_eq!(weighted[1].1, 3.0);
//!
//! let mut rng = AiRng::new(42);
//! let target = select_weighted(&weighted, &mut rng).unwrap();
//! assert!(target.is_alive());
//! ```

pub mod core;
pub mod rules;
pub mod eval;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    AiConfig, AiRng, AiRngState,
    Battler, BattlerId, Battlefield, Gauge, Roster, Side, Team,
    Catalogue, EmptyCatalogue, Registry,
    CounterId, FlagId, GlobalStore, Globals, NoGlobals,
    SkillId, StateId,
};

pub use crate::rules::{
    AuthoringError, RuleError,
    CompiledRuleCache, RuleCache, SkillRules,
    Condition, TargetCondition, Comparison, Property,
    RatingRule, TargetRule, Rule,
};

pub use crate::eval::{ConditionContext, ConditionEvaluator, GroupStats};

pub use crate::engine::{
    adjust_rating, apply_rating_rules,
    adjust_target_weights, apply_target_rules, Weighted,
    select_weighted, select_weighted_index,
};
