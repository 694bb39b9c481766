//! Explicit collaborators for rule evaluation.

use crate::core::{
    AiConfig, Battler, Battlefield, Catalogue, EmptyCatalogue, GlobalStore, NoGlobals,
};

static NO_GLOBALS: NoGlobals = NoGlobals;
static EMPTY_CATALOGUE: EmptyCatalogue = EmptyCatalogue;
static DEFAULT_CONFIG: AiConfig = AiConfig::DEFAULT;

/// Everything a rule may read while a decision is made.
///
/// Built fresh per decision from the host's current battle snapshot.
pub struct ConditionContext<'a> {
    /// The battler choosing a skill.
    pub user: &'a Battler,
    /// Every battler in the fight.
    pub field: &'a Battlefield,
    /// Global flags and counters.
    pub globals: &'a dyn GlobalStore,
    /// Status-effect names used by rule text.
    pub catalogue: &'a dyn Catalogue,
    pub config: &'a AiConfig,
}

impl<'a> ConditionContext<'a> {
    /// Create a context with no globals, no catalogue, and default thresholds.
    pub fn new(user: &'a Battler, field: &'a Battlefield) -> Self {
        Self {
            user,
            field,
            globals: &NO_GLOBALS,
            catalogue: &EMPTY_CATALOGUE,
            config: &DEFAULT_CONFIG,
        }
    }

    /// Provide the global flag and counter store.
    #[must_use]
    pub fn with_globals(mut self, globals: &'a dyn GlobalStore) -> Self {
        self.globals = globals;
        self
    }

    /// Provide the name catalogue.
    #[must_use]
    pub fn with_catalogue(mut self, catalogue: &'a dyn Catalogue) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// Override the thresholds.
    #[must_use]
    pub fn with_config(mut self, config: &'a AiConfig) -> Self {
        self.config = config;
        self
    }
}

impl std::fmt::Debug for ConditionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionContext")
            .field("user", &self.user.id)
            .field("battlers", &self.field.len())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
