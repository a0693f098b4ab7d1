//! Enumerates the atomic conditions usable in a search round.
use fixedbitset::FixedBitSet;
use rayon::prelude::*;

use std::sync::Arc;

use super::Antecedent;
use crate::{Dataset, Weights};


/// Returns one [`Antecedent`] per distinct value of each discrete feature,
/// observed among the alive examples.
/// 
/// Features are visited in declaration order, and
/// the values of a feature in order of first appearance.
/// Continuous features are skipped.
/// 
/// Time complexity: `O(m * n)`, where
/// - `m` is the number of examples and
/// - `n` is the number of features.
pub fn selectors(dataset: &Dataset, weights: &Weights)
    -> Vec<Arc<Antecedent>>
{
    dataset.features()
        .par_iter()
        .enumerate()
        .map(|(k, feature)| {
            let Some((levels, codes)) = feature.discrete() else {
                return Vec::new();
            };
            let mut seen = FixedBitSet::with_capacity(levels.len());
            weights.alive()
                .ones()
                .filter_map(|i| {
                    let c = codes[i];
                    if seen.put(c as usize) { return None; }
                    let value = &levels[c as usize];
                    Some(Arc::new(Antecedent::new(k, feature.name(), c, value)))
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}
