//! Battlefield snapshot and group resolution.
//!
//! A [`Battlefield`] holds every battler in the current battle. Friendly and
//! hostile groups are resolved relative to a given battler's [`Team`].

use serde::{Deserialize, Serialize};

use super::battler::{Battler, Team};
use super::ids::BattlerId;

/// A group relative to the acting battler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The acting battler's own team.
    Friendly,
    /// The opposing team.
    Hostile,
}

/// Which members of a group to include.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Roster {
    /// Only members that are still alive.
    Living,
    /// Every member, dead or alive.
    All,
}

/// Every battler taking part in a battle.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Battlefield {
    battlers: Vec<Battler>,
}

impl Battlefield {
    /// Create an empty battlefield.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a battler (builder pattern).
    #[must_use]
    pub fn with(mut self, battler: Battler) -> Self {
        self.battlers.push(battler);
        self
    }

    /// Add a battler.
    pub fn add(&mut self, battler: Battler) {
        self.battlers.push(battler);
    }

    /// Get a battler by id.
    #[must_use]
    pub fn get(&self, id: BattlerId) -> Option<&Battler> {
        self.battlers.iter().find(|b| b.id == id)
    }

    /// All battlers on a team, in insertion order.
    pub fn team(&self, team: Team, roster: Roster) -> impl Iterator<Item = &Battler> {
        self.battlers
            .iter()
            .filter(move |b| b.team == team && (roster == Roster::All || b.is_alive()))
    }

    /// Members of `side` as seen from `viewer`.
    #[must_use]
    pub fn group(&self, viewer: &Battler, side: Side, roster: Roster) -> Vec<&Battler> {
        let team = match side {
            Side::Friendly => viewer.team,
            Side::Hostile => viewer.team.opponent(),
        };
        self.team(team, roster).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.battlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.battlers.is_empty()
    }
}
