//! Read-only battler snapshots.
//!
//! The host engine converts its live combatants into [`Battler`] snapshots
//! at decision time. Rules only ever read these snapshots.
//!
//! ## Example
//!
//! ```
//! use skill_ai::core::{Battler, BattlerId, Gauge, StateId, Team};
//!
//! let slime = Battler::new(BattlerId::new(1), Team::Troop)
//!     .with_hp(12, 20)
//!     .with_attr("atk", 9)
//!     .with_state(StateId::new(4));
//!
//! assert_eq!(slime.hp(), Gauge::new(12.0, 20.0));
//! assert_eq!(slime.attribute("ATK"), Some(9.0));
//! assert!(slime.has_state(StateId::new(4)));
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::ids::{BattlerId, StateId};

/// Which side of the battle a battler fights on.
///
/// Friendly and hostile groups are always relative to the acting battler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The player's party.
    Party,
    /// The enemy troop.
    Troop,
}

impl Team {
    /// The opposing team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::Party => Team::Troop,
            Team::Troop => Team::Party,
        }
    }
}

/// A resource with a current value and a maximum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub current: f64,
    pub max: f64,
}

impl Gauge {
    #[must_use]
    pub const fn new(current: f64, max: f64) -> Self {
        Self { current, max }
    }

    /// Current value as a percentage of the maximum.
    ///
    /// `None` when the maximum is not positive; callers fall back to
    /// absolute thresholds.
    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        (self.max > 0.0).then(|| self.current / self.max * 100.0)
    }
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Snapshot of one combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Battler {
    pub id: BattlerId,
    pub team: Team,
    pub alive: bool,
    hp: Gauge,
    mp: Gauge,
    /// Bare numeric attributes, keyed by lowercase name.
    attributes: FxHashMap<String, f64>,
    states: FxHashSet<StateId>,
}

impl Battler {
    /// Create a living battler with empty resources.
    pub fn new(id: BattlerId, team: Team) -> Self {
        Self {
            id,
            team,
            alive: true,
            hp: Gauge::default(),
            mp: Gauge::default(),
            attributes: FxHashMap::default(),
            states: FxHashSet::default(),
        }
    }

    /// Set hit points (builder pattern).
    #[must_use]
    pub fn with_hp(mut self, current: impl Into<f64>, max: impl Into<f64>) -> Self {
        self.hp = Gauge::new(current.into(), max.into());
        self
    }

    /// Set magic points (builder pattern).
    #[must_use]
    pub fn with_mp(mut self, current: impl Into<f64>, max: impl Into<f64>) -> Self {
        self.mp = Gauge::new(current.into(), max.into());
        self
    }

    /// Set a bare attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<f64>) -> Self {
        self.attributes.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Add an active status effect (builder pattern).
    #[must_use]
    pub fn with_state(mut self, state: StateId) -> Self {
        self.states.insert(state);
        self
    }

    /// Mark as dead (builder pattern).
    #[must_use]
    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }

    #[must_use]
    pub fn hp(&self) -> Gauge {
        self.hp
    }

    #[must_use]
    pub fn mp(&self) -> Gauge {
        self.mp
    }

    /// Look up a bare attribute by case-insensitive name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<f64> {
        if let Some(value) = self.attributes.get(name) {
            return Some(*value);
        }
        self.attributes.get(&name.to_ascii_lowercase()).copied()
    }

    #[must_use]
    pub fn states(&self) -> &FxHashSet<StateId> {
        &self.states
    }

    #[must_use]
    pub fn has_state(&self, state: StateId) -> bool {
        self.states.contains(&state)
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}
