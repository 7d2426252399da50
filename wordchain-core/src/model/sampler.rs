use std::collections::HashMap;
use std::hash::Hash;

use rand::Rng;

/// Draws one key from a weight map using weighted random sampling.
///
/// The probability of selecting a key is `weight / total` where `total`
/// is the sum of all weights in the map.
///
/// This function performs:
/// - an O(n) scan over the entries
/// - a cumulative subtraction to select a bucket
///
/// A single call iterates the map exactly once, so the cumulative sums are
/// consistent regardless of the map's iteration order.
///
/// Returns `None` if the map is empty or every weight is zero. A zero
/// weight contributes nothing to `total` and can never be selected.
pub(crate) fn pick_weighted<'a, K, R>(weights: &'a HashMap<K, usize>, rng: &mut R) -> Option<&'a K>
where
	K: Eq + Hash,
	R: Rng,
{
	let total: usize = weights.values().sum();
	if total == 0 {
		return None;
	}

	let mut r = rng.random_range(0..total);

	let mut fallback: Option<&K> = None;
	for (item, weight) in weights {
		if r < *weight {
			return Some(item);
		}
		r -= *weight;
		if *weight > 0 {
			fallback = Some(item);
		}
	}

	// Fallback: should not happen, but kept for safety.
	fallback
}
