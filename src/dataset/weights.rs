//! The per-example weight table updated by the learner.
use fixedbitset::FixedBitSet;

use super::dataset_struct::PositiveClass;
use crate::constants::{ALMOST_ZERO, INITIAL_WEIGHT};


/// Struct `Weights` keeps the state of each example
/// that changes while learning subgroups.
/// 
/// - `weight[i]` is the weight on the `i`-th example,
/// - `update_count[i]` is the number of accepted rules
///   that have updated the `i`-th example, and
/// - `alive` is the set of examples not removed by covering.
/// 
/// Examples are identified by their row index in [`Dataset`](crate::Dataset),
/// so removing an example never shifts the others.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    weight: Vec<f64>,
    update_count: Vec<u32>,
    alive: FixedBitSet,
}


impl Weights {
    /// Construct the initial state for `n_sample` examples.
    /// Each weight is `1.0`, and each update count is `0`.
    pub fn uniform(n_sample: usize) -> Self {
        let mut alive = FixedBitSet::with_capacity(n_sample);
        alive.insert_range(..);
        Self {
            weight: vec![INITIAL_WEIGHT; n_sample],
            update_count: vec![0; n_sample],
            alive,
        }
    }


    /// Returns the number of rows, removed ones included.
    pub fn len(&self) -> usize {
        self.weight.len()
    }


    /// Returns `true` if `self` has no rows.
    pub fn is_empty(&self) -> bool {
        self.weight.is_empty()
    }


    /// Returns the weight on the `i`-th example.
    #[inline]
    pub fn weight(&self, i: usize) -> f64 {
        self.weight[i]
    }


    /// Returns the number of accepted rules
    /// that have updated the `i`-th example.
    #[inline]
    pub fn update_count(&self, i: usize) -> u32 {
        self.update_count[i]
    }


    /// Returns `true` if the `i`-th example is not removed.
    #[inline]
    pub fn is_alive(&self, i: usize) -> bool {
        self.alive.contains(i)
    }


    /// Returns the set of examples not removed.
    pub fn alive(&self) -> &FixedBitSet {
        &self.alive
    }


    /// Returns the number of examples not removed.
    pub fn n_alive(&self) -> usize {
        self.alive.count_ones(..)
    }


    /// Returns the sum of weights over the alive examples.
    pub fn total_weight(&self) -> f64 {
        self.weight_of(&self.alive)
    }


    /// Returns the sum of weights over `rows`.
    /// `rows` must be a subset of `self.alive()`.
    #[inline]
    pub fn weight_of(&self, rows: &FixedBitSet) -> f64 {
        rows.ones()
            .map(|i| self.weight[i])
            .sum::<f64>()
    }


    /// Returns the sum of weights over the alive positive examples.
    pub fn positive_weight(&self, positive: &PositiveClass) -> f64 {
        self.alive.ones()
            .filter(|&i| positive.contains(i))
            .map(|i| self.weight[i])
            .sum::<f64>()
    }


    /// Returns `true` if every alive positive example
    /// has weight below [`ALMOST_ZERO`].
    /// This holds trivially if no positive example is alive.
    pub fn positives_exhausted(&self, positive: &PositiveClass) -> bool {
        self.alive.ones()
            .filter(|&i| positive.contains(i))
            .all(|i| self.weight[i] < ALMOST_ZERO)
    }


    pub(crate) fn set_weight(&mut self, i: usize, weight: f64) {
        self.weight[i] = weight;
    }


    pub(crate) fn increment(&mut self, i: usize) {
        self.update_count[i] += 1;
    }


    pub(crate) fn remove(&mut self, i: usize) {
        self.alive.set(i, false);
    }
}
