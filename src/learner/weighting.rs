//! Defines the updates applied to the examples covered by an accepted rule.
use fixedbitset::FixedBitSet;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{
    PositiveClass,
    Weights,
    common::checkers,
    error::ConfigError,
};


/// How the learner updates the examples covered by an accepted rule.
/// 
/// Let `t` be the number of accepted rules
/// that have updated a covered positive example so far.
/// 
/// - `Covering` removes every covered example,
///   positive or negative (the covering of CN2).
/// - `Multiplicative(gamma)` sets the weight of
///   each covered positive example to `gamma^t`.
/// - `Additive` sets the weight of
///   each covered positive example to `1 / (t + 1)`.
/// 
/// The decaying policies increment `t` of each covered positive example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Weighting {
    /// Remove the covered examples.
    Covering,
    /// Multiplicative weights with the decay factor `gamma` in `(0, 1)`.
    Multiplicative(f64),
    /// Additive weights.
    Additive,
}


impl Weighting {
    /// Check the parameter.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Multiplicative(gamma) => checkers::gamma(gamma),
            Self::Covering | Self::Additive => Ok(()),
        }
    }


    /// Returns the weights after accepting a rule covering `covered`.
    /// `covered` must be a subset of `weights.alive()`.
    /// 
    /// The given `weights` is left untouched.
    pub fn apply(
        &self,
        weights: &Weights,
        covered: &FixedBitSet,
        positive: &PositiveClass,
    ) -> Weights
    {
        let mut next = weights.clone();
        match *self {
            Self::Covering => {
                // Removed rows keep their update count.
                covered.ones()
                    .for_each(|i| { next.remove(i); });
            },
            Self::Multiplicative(gamma) => {
                covered.ones()
                    .filter(|&i| positive.contains(i))
                    .for_each(|i| {
                        let t = next.update_count(i) as i32;
                        next.set_weight(i, gamma.powi(t));
                        next.increment(i);
                    });
            },
            Self::Additive => {
                covered.ones()
                    .filter(|&i| positive.contains(i))
                    .for_each(|i| {
                        let t = next.update_count(i) as f64;
                        next.set_weight(i, 1f64 / (t + 1f64));
                        next.increment(i);
                    });
            },
        }
        next
    }
}


impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Covering => write!(f, "Covering"),
            Self::Multiplicative(gamma) => {
                write!(f, "Multiplicative (gamma = {gamma})")
            },
            Self::Additive => write!(f, "Additive"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;
    use std::io::BufReader;

    // Rows 0, 1 are positive and row 2 is negative.
    fn setup() -> (PositiveClass, FixedBitSet) {
        let csv = "A,T\nx,Yes\nx,Yes\nx,No\ny,No\n";
        let dataset = Dataset::from_reader(BufReader::new(csv.as_bytes()), true)
            .unwrap()
            .set_target("T")
            .unwrap();
        let positive = dataset.positive_class("Yes").unwrap();
        let mut covered = FixedBitSet::with_capacity(4);
        covered.insert_range(0..3);
        (positive, covered)
    }

    #[test]
    fn multiplicative_decays_by_update_count() {
        let (positive, covered) = setup();
        let weighting = Weighting::Multiplicative(0.5);

        let w0 = Weights::uniform(4);
        let w1 = weighting.apply(&w0, &covered, &positive);
        assert_eq!(w1.weight(0), 1.0);
        assert_eq!(w1.update_count(0), 1);

        let w2 = weighting.apply(&w1, &covered, &positive);
        assert_eq!(w2.weight(0), 0.5);
        assert_eq!(w2.update_count(0), 2);

        let w3 = weighting.apply(&w2, &covered, &positive);
        assert_eq!(w3.weight(1), 0.25);

        // Negative examples are untouched.
        assert_eq!(w3.weight(2), 1.0);
        assert_eq!(w3.update_count(2), 0);
        assert_eq!(w3.n_alive(), 4);

        // The old table is not modified.
        assert_eq!(w0, Weights::uniform(4));
    }

    #[test]
    fn additive_decays_harmonically() {
        let (positive, covered) = setup();
        let weighting = Weighting::Additive;

        let mut weights = Weights::uniform(4);
        let mut history = Vec::new();
        for _ in 0..4 {
            weights = weighting.apply(&weights, &covered, &positive);
            history.push(weights.weight(0));
        }
        assert_eq!(history, vec![1.0, 0.5, 1.0 / 3.0, 0.25]);
        assert!(history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn covering_removes_every_covered_row() {
        let (positive, covered) = setup();
        let weights = Weighting::Covering
            .apply(&Weights::uniform(4), &covered, &positive);
        assert_eq!(weights.n_alive(), 1);
        assert!(weights.is_alive(3));
        assert!((0..4).all(|i| weights.update_count(i) == 0));
    }

    #[test]
    fn gamma_out_of_range() {
        assert!(Weighting::Multiplicative(1.0).validate().is_err());
        assert!(Weighting::Multiplicative(0.3).validate().is_ok());
        assert!(Weighting::Additive.validate().is_ok());
    }
}
