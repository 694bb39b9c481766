//! Decision-time algorithms that consume evaluated conditions.
//!
//! - [`adjust_rating`]: fold `boost`/`nerf` rules into a skill rating
//! - [`adjust_target_weights`]: fold `target` rules into candidate weights
//! - [`select_weighted`]: draw one candidate proportionally to its weight
//!
//! None of these return errors. Bad rule lines are logged and skipped, and
//! degenerate selections return `None` for the host to handle.

mod rating;
mod selector;
mod targeting;

pub use rating::{adjust_rating, apply_rating_rules};
pub use selector::{index_at, select_weighted, select_weighted_index};
pub use targeting::{adjust_target_weights, apply_target_rules, Weighted};
