//! Opaque identifiers consumed by the rule engine.
//!
//! The host engine owns the catalogues behind these ids. The rule engine
//! never interprets them beyond equality and hashing.
//!
//! ```
//! use skill_ai::core::{SkillId, StateId};
//!
//! let fire = SkillId::new(12);
//! assert_eq!(fire.raw(), 12);
//! assert_eq!(format!("{}", StateId::new(4)), "State(4)");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new id.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw id value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

opaque_id!(
    /// Canonical skill identifier from the host's skill catalogue.
    SkillId,
    "Skill"
);

opaque_id!(
    /// Canonical status-effect identifier from the host's state catalogue.
    StateId,
    "State"
);

opaque_id!(
    /// Identity of a battler in the current battle.
    BattlerId,
    "Battler"
);

opaque_id!(
    /// Global boolean flag (a "switch").
    FlagId,
    "Flag"
);

opaque_id!(
    /// Global numeric counter (a "variable").
    CounterId,
    "Counter"
);
