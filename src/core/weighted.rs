/// Weighted selection by cumulative scan.
use thiserror::Error;

use crate::core::rng::SeededRng;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    #[error("cannot select from an empty set")]
    EmptyInput,
    #[error("invalid weight {weight} at position {index}")]
    InvalidWeight { index: usize, weight: f64 },
    #[error("weights sum to zero")]
    ZeroTotalWeight,
    #[error("weights sum past the largest representable value")]
    WeightOverflow,
}

/// Pick one item with probability proportional to `weight_of(item)`.
///
/// Scans in declared order and returns the first item whose cumulative
/// weight exceeds `next_f64() * total`. Consumes exactly one draw, and none
/// at all when the preconditions fail.
pub fn pick<'a, T, F>(items: &'a [T], weight_of: F, rng: &mut SeededRng) -> Result<&'a T, SelectError>
where
    F: Fn(&T) -> f64,
{
    if items.is_empty() {
        return Err(SelectError::EmptyInput);
    }

    let mut total = 0.0;
    for (index, item) in items.iter().enumerate() {
        let weight = weight_of(item);
        if !weight.is_finite() || weight < 0.0 {
            return Err(SelectError::InvalidWeight { index, weight });
        }
        total += weight;
    }
    if !total.is_finite() {
        return Err(SelectError::WeightOverflow);
    }
    if total <= 0.0 {
        return Err(SelectError::ZeroTotalWeight);
    }

    let r = rng.next_f64() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (index, item) in items.iter().enumerate() {
        let weight = weight_of(item);
        if weight > 0.0 {
            last_positive = index;
        }
        cumulative += weight;
        if cumulative > r {
            return Ok(item);
        }
    }

    // Rounding can leave r a hair above the final cumulative sum.
    Ok(&items[last_positive])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(pairs: &[(&'static str, f64)]) -> Vec<(&'static str, f64)> {
        pairs.to_vec()
    }

    #[test]
    fn empty_input_errors() {
        let mut rng = SeededRng::from_seed_str("w");
        let items: Vec<(&str, f64)> = Vec::new();
        assert_eq!(
            pick(&items, |i| i.1, &mut rng).unwrap_err(),
            SelectError::EmptyInput
        );
    }

    #[test]
    fn negative_weight_errors_without_drawing() {
        let mut rng = SeededRng::from_seed_str("w");
        let items = weighted(&[("a", 1.0), ("b", -2.0)]);
        assert!(matches!(
            pick(&items, |i| i.1, &mut rng),
            Err(SelectError::InvalidWeight { index: 1, .. })
        ));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn nan_weight_errors() {
        let mut rng = SeededRng::from_seed_str("w");
        let items = weighted(&[("a", f64::NAN)]);
        assert!(matches!(
            pick(&items, |i| i.1, &mut rng),
            Err(SelectError::InvalidWeight { index: 0, .. })
        ));
    }

    #[test]
    fn all_zero_weights_error() {
        let mut rng = SeededRng::from_seed_str("w");
        let items = weighted(&[("a", 0.0), ("b", 0.0)]);
        assert_eq!(
            pick(&items, |i| i.1, &mut rng).unwrap_err(),
            SelectError::ZeroTotalWeight
        );
    }

    #[test]
    fn overflowing_total_errors_without_drawing() {
        let mut rng = SeededRng::from_seed_str("w");
        let items = weighted(&[("a", 1e308), ("b", 1e308)]);
        assert_eq!(
            pick(&items, |i| i.1, &mut rng).unwrap_err(),
            SelectError::WeightOverflow
        );
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn zero_weight_item_never_chosen() {
        let mut rng = SeededRng::from_seed_str("zero");
        let items = weighted(&[("never", 0.0), ("always", 3.0), ("also_never", 0.0)]);
        for _ in 0..1_000 {
            assert_eq!(pick(&items, |i| i.1, &mut rng).unwrap().0, "always");
        }
    }

    #[test]
    fn consumes_exactly_one_draw() {
        let mut rng = SeededRng::from_seed_str("w");
        let items = weighted(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        pick(&items, |i| i.1, &mut rng).unwrap();
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn frequency_tracks_weights() {
        let mut rng = SeededRng::from_seed_str("freq");
        let items = weighted(&[("heavy", 90.0), ("light", 10.0)]);
        let heavy = (0..10_000)
            .filter(|_| pick(&items, |i| i.1, &mut rng).unwrap().0 == "heavy")
            .count();
        assert!(
            (8_700..=9_300).contains(&heavy),
            "expected ~9000 heavy picks, got {}",
            heavy
        );
    }
}
