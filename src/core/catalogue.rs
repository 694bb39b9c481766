//! Name lookup for skills and status effects.
//!
//! Rule text may name a skill or a status effect instead of giving its id.
//! The host resolves names through [`Catalogue`]; [`Registry`] is an
//! in-memory implementation.
//!
//! ## Example
//!
//! ```
//! use skill_ai::core::{Catalogue, Registry, SkillId, StateId};
//!
//! let mut registry = Registry::new();
//! registry.register_skill(SkillId::new(9), "Fire I");
//! registry.register_state(StateId::new(4), "Poisoned");
//!
//! assert_eq!(registry.skill_id("fire i"), Some(SkillId::new(9)));
//! assert_eq!(registry.state_id("POISONED"), Some(StateId::new(4)));
//! ```

use super::ids::{SkillId, StateId};

/// Case-insensitive name resolution for skills and status effects.
pub trait Catalogue {
    /// Canonical id of the first skill whose name matches, ignoring case.
    fn skill_id(&self, name: &str) -> Option<SkillId>;

    /// Canonical id of the first status effect whose name matches, ignoring case.
    fn state_id(&self, name: &str) -> Option<StateId>;
}

/// Catalogue that knows no names.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyCatalogue;

impl Catalogue for EmptyCatalogue {
    fn skill_id(&self, _name: &str) -> Option<SkillId> {
        None
    }

    fn state_id(&self, _name: &str) -> Option<StateId> {
        None
    }
}

/// Registry of skill and status-effect names.
///
/// Names keep their registration order so that "first match wins" holds
/// when two entries share a name.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    skills: Vec<(SkillId, String)>,
    states: Vec<(StateId, String)>,
}

impl Registry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a skill name.
    ///
    /// Panics if the id is already registered.
    pub fn register_skill(&mut self, id: SkillId, name: impl Into<String>) {
        if self.skills.iter().any(|(existing, _)| *existing == id) {
            panic!("Skill with ID {:?} already registered", id);
        }
        self.skills.push((id, name.into()));
    }

    /// Register a status-effect name.
    ///
    /// Panics if the id is already registered.
    pub fn register_state(&mut self, id: StateId, name: impl Into<String>) {
        if self.states.iter().any(|(existing, _)| *existing == id) {
            panic!("State with ID {:?} already registered", id);
        }
        self.states.push((id, name.into()));
    }

    /// Register a skill (builder pattern).
    #[must_use]
    pub fn with_skill(mut self, id: SkillId, name: impl Into<String>) -> Self {
        self.register_skill(id, name);
        self
    }

    /// Register a status effect (builder pattern).
    #[must_use]
    pub fn with_state(mut self, id: StateId, name: impl Into<String>) -> Self {
        self.register_state(id, name);
        self
    }
}

fn first_match<Id: Copy>(entries: &[(Id, String)], name: &str) -> Option<Id> {
    let name = name.trim();
    entries
        .iter()
        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(name))
        .map(|(id, _)| *id)
}

impl Catalogue for Registry {
    fn skill_id(&self, name: &str) -> Option<SkillId> {
        first_match(&self.skills, name)
    }

    fn state_id(&self, name: &str) -> Option<StateId> {
        first_match(&self.states, name)
    }
}
