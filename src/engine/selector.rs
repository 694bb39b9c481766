//! Weighted random selection.
//!
//! One uniform draw over `[0, total)`, then each weight is subtracted from
//! the draw in list order; the first candidate at which the remainder drops
//! to zero or below is chosen.
//!
//! Because the test is `<= 0`, a draw landing exactly on a boundary picks
//! the candidate whose weight just exhausted it, and a draw of exactly 0.0
//! picks the first candidate even if its weight is zero.
//!
//! ```
//! use skill_ai::core::AiRng;
//! use skill_ai::engine::select_weighted;
//!
//! let mut rng = AiRng::new(7);
//! let pairs = [("slime", 0.0), ("bat", 0.0), ("goblin", 5.0)];
//! assert_eq!(select_weighted(&pairs, &mut rng), Some(&"goblin"));
//! ```

use rand::Rng;

/// Draw one candidate with probability proportional to its weight.
///
/// Returns `None` when there are no candidates or every weight is zero;
/// the host must then fall back to its own targeting.
pub fn select_weighted<'a, T, R: Rng + ?Sized>(
    pairs: &'a [(T, f64)],
    rng: &mut R,
) -> Option<&'a T> {
    let weights: Vec<f64> = pairs.iter().map(|(_, weight)| *weight).collect();
    select_weighted_index(&weights, rng).map(|index| &pairs[index].0)
}

/// Index variant of [`select_weighted`].
pub fn select_weighted_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total = total_weight(weights);
    if total <= 0.0 {
        return None;
    }
    index_at(weights, rng.gen::<f64>() * total)
}

/// Walk the weights with a fixed draw.
///
/// Exposed so hosts can replay a recorded draw.
#[must_use]
pub fn index_at(weights: &[f64], draw: f64) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let mut remainder = draw;
    for (index, weight) in weights.iter().enumerate() {
        remainder -= clamp(*weight);
        if remainder <= 0.0 {
            return Some(index);
        }
    }

    // Floating point edge case - return the last positive weight
    weights.iter().rposition(|w| clamp(*w) > 0.0)
}

fn total_weight(weights: &[f64]) -> f64 {
    weights.iter().map(|w| clamp(*w)).sum()
}

/// Negative and NaN weights count as zero.
fn clamp(weight: f64) -> f64 {
    weight.max(0.0)
}
