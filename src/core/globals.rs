//! Global flag and counter stores.
//!
//! Rules can read game-wide switches and variables. The host provides them
//! through [`GlobalStore`]; [`Globals`] is a plain in-memory implementation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ids::{CounterId, FlagId};

/// Read access to game-wide flags and counters.
pub trait GlobalStore {
    /// Current state of a flag. Unknown flags read as off.
    fn flag(&self, id: FlagId) -> bool;

    /// Current value of a counter. Unknown counters read as zero.
    fn counter(&self, id: CounterId) -> i64;
}

/// In-memory flag and counter values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Globals {
    flags: FxHashMap<FlagId, bool>,
    counters: FxHashMap<CounterId, i64>,
}

impl Globals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag (builder pattern).
    #[must_use]
    pub fn with_flag(mut self, id: FlagId, on: bool) -> Self {
        self.set_flag(id, on);
        self
    }

    /// Set a counter (builder pattern).
    #[must_use]
    pub fn with_counter(mut self, id: CounterId, value: i64) -> Self {
        self.set_counter(id, value);
        self
    }

    pub fn set_flag(&mut self, id: FlagId, on: bool) {
        self.flags.insert(id, on);
    }

    pub fn set_counter(&mut self, id: CounterId, value: i64) {
        self.counters.insert(id, value);
    }
}

impl GlobalStore for Globals {
    fn flag(&self, id: FlagId) -> bool {
        self.flags.get(&id).copied().unwrap_or(false)
    }

    fn counter(&self, id: CounterId) -> i64 {
        self.counters.get(&id).copied().unwrap_or(0)
    }
}

/// Store with every flag off and every counter at zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGlobals;

impl GlobalStore for NoGlobals {
    fn flag(&self, _id: FlagId) -> bool {
        false
    }

    fn counter(&self, _id: CounterId) -> i64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let globals = Globals::new();
        assert!(!globals.flag(FlagId(1)));
        assert_eq!(globals.counter(CounterId(1)), 0);
    }

    #[test]
    fn test_set_values() {
        let mut globals = Globals::new().with_flag(FlagId(3), true);
        globals.set_counter(CounterId(2), -4);

        assert!(globals.flag(FlagId(3)));
        assert_eq!(globals.counter(CounterId(2)), -4);
    }
}
