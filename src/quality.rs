//! Defines the weighted relative accuracy (WRAcc).
//! 
//! For a rule `Cond -> Class`,
//! ```txt
//! WRAcc = (n(Cond) / N) * (n(Class & Cond) / n(Cond) - n(Class) / N),
//! ```
//! where each `n(.)` is the sum of weights over the alive examples
//! satisfying the argument, and `N` is the total weight.
//! WRAcc lies in `[-0.25, 0.25]`.
use fixedbitset::FixedBitSet;

use crate::{
    Dataset,
    PositiveClass,
    Rule,
    Weights,
};


/// The weights `N` and `n(Class)`
/// that do not depend on the rule.
/// Computed once per search round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    /// Sum of weights over the alive examples.
    pub total: f64,
    /// Sum of weights over the alive positive examples.
    pub positive: f64,
}


impl Background {
    /// Compute the background weights.
    pub fn new(weights: &Weights, positive: &PositiveClass) -> Self {
        Self {
            total: weights.total_weight(),
            positive: weights.positive_weight(positive),
        }
    }
}


/// Returns the WRAcc of the rule covering `coverage`.
/// Returns `0` if the covered weight is `0`.
/// 
/// Time complexity: `O(m)`, where `m` is the number of examples.
pub fn wracc(
    coverage: &FixedBitSet,
    weights: &Weights,
    positive: &PositiveClass,
    background: &Background,
) -> f64
{
    let (n_cond, n_cond_class) = coverage.ones()
        .fold((0f64, 0f64), |(cond, cond_class), i| {
            let w = weights.weight(i);
            if positive.contains(i) {
                (cond + w, cond_class + w)
            } else {
                (cond + w, cond_class)
            }
        });

    if n_cond == 0f64 {
        return 0f64;
    }

    let total = background.total;
    (n_cond / total) * (n_cond_class / n_cond - background.positive / total)
}


impl Rule {
    /// Computes the WRAcc of `self` on the current weights
    /// and stores it in `self`.
    pub fn score(
        &mut self,
        dataset: &Dataset,
        weights: &Weights,
        positive: &PositiveClass,
        background: &Background,
    ) -> f64
    {
        let coverage = self.coverage(dataset, weights);
        let value = wracc(&coverage, weights, positive, background);
        self.set_wracc(value);
        value
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;
    use std::sync::Arc;
    use crate::rule::selectors;

    // 5 rows with `A = x` are positive, 5 rows with `A = y` are negative.
    fn separable() -> Dataset {
        let mut csv = String::from("A,T\n");
        (0..5).for_each(|_| csv.push_str("x,Yes\n"));
        (0..5).for_each(|_| csv.push_str("y,No\n"));
        Dataset::from_reader(BufReader::new(csv.as_bytes()), true)
            .unwrap()
            .set_target("T")
            .unwrap()
    }

    #[test]
    fn perfect_rule_scores_quarter() {
        let dataset = separable();
        let positive = dataset.positive_class("Yes").unwrap();
        let weights = Weights::uniform(10);
        let background = Background::new(&weights, &positive);
        assert_eq!(background, Background { total: 10.0, positive: 5.0 });

        let sels = selectors(&dataset, &weights);
        let mut x = Rule::from_antecedent(&sels[0]);
        let mut y = Rule::from_antecedent(&sels[1]);
        assert_eq!(x.score(&dataset, &weights, &positive, &background), 0.25);
        assert_eq!(y.score(&dataset, &weights, &positive, &background), -0.25);
    }

    #[test]
    fn empty_coverage_scores_zero() {
        let dataset = separable();
        let positive = dataset.positive_class("Yes").unwrap();
        let mut weights = Weights::uniform(10);
        (0..5).for_each(|i| weights.remove(i));
        let background = Background::new(&weights, &positive);

        let x = Arc::new(crate::Antecedent::new(0, "A", 0, "x"));
        let mut rule = Rule::from_antecedent(&x);
        let value = rule.score(&dataset, &weights, &positive, &background);
        assert_eq!(value, 0f64);
    }

    #[test]
    fn zero_weight_coverage_scores_zero() {
        let dataset = separable();
        let positive = dataset.positive_class("Yes").unwrap();
        let mut weights = Weights::uniform(10);
        (0..5).for_each(|i| weights.set_weight(i, 0f64));
        let background = Background::new(&weights, &positive);

        let x = Arc::new(crate::Antecedent::new(0, "A", 0, "x"));
        let mut rule = Rule::from_antecedent(&x);
        assert_eq!(rule.score(&dataset, &weights, &positive, &background), 0f64);
    }
}
