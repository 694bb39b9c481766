//! Core types: ids, battler snapshots, groups, global stores, catalogues,
//! configuration and RNG.
//!
//! Everything here is a read-only view of the host engine's battle. Rules
//! consume these types but never mutate them.

pub mod ids;
pub mod battler;
pub mod field;
pub mod globals;
pub mod catalogue;
pub mod config;
pub mod rng;

pub use ids::{BattlerId, CounterId, FlagId, SkillId, StateId};
pub use battler::{Battler, Gauge, Team};
pub use field::{Battlefield, Roster, Side};
pub use globals::{GlobalStore, Globals, NoGlobals};
pub use catalogue::{Catalogue, EmptyCatalogue, Registry};
pub use config::AiConfig;
pub use rng::{AiRng, AiRngState};
