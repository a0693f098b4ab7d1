use fixedbitset::FixedBitSet;
use serde::{Serialize, Deserialize};

use std::fmt;
use std::sync::Arc;

use super::{Antecedent, RuleList};
use crate::{Dataset, Weights};


/// A conjunction of [`Antecedent`]s with its quality.
/// 
/// The quality is the WRAcc at the time the rule was scored.
/// Once the rule is accepted by the learner, the value is frozen,
/// even though the example weights change afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rule {
    antecedents: Vec<Arc<Antecedent>>,
    wracc: f64,
}


impl Rule {
    /// Construct an empty rule that covers every example.
    pub fn new() -> Self {
        Self::default()
    }


    /// Construct a rule of a single antecedent.
    pub fn from_antecedent(antecedent: &Arc<Antecedent>) -> Self {
        Self {
            antecedents: vec![Arc::clone(antecedent)],
            wracc: 0f64,
        }
    }


    /// Returns a copy of `self` with `antecedent` appended.
    /// The copy inherits the quality of `self`
    /// until it is scored again.
    pub fn specialize(&self, antecedent: &Arc<Antecedent>) -> Self {
        let mut antecedents = Vec::with_capacity(self.antecedents.len() + 1);
        antecedents.extend(self.antecedents.iter().cloned());
        antecedents.push(Arc::clone(antecedent));
        Self { antecedents, wracc: self.wracc }
    }


    /// Returns the antecedents in order of construction.
    pub fn antecedents(&self) -> &[Arc<Antecedent>] {
        &self.antecedents[..]
    }


    /// Returns the number of antecedents.
    pub fn len(&self) -> usize {
        self.antecedents.len()
    }


    /// Returns `true` if `self` has no antecedent.
    pub fn is_empty(&self) -> bool {
        self.antecedents.is_empty()
    }


    /// Returns the WRAcc of `self` at the time it was scored.
    #[inline]
    pub fn wracc(&self) -> f64 {
        self.wracc
    }


    #[inline]
    pub(crate) fn set_wracc(&mut self, wracc: f64) {
        self.wracc = wracc;
    }


    /// Returns `true` if two antecedents test the same feature.
    pub fn has_repeated_feature(&self) -> bool {
        self.antecedents.iter()
            .enumerate()
            .any(|(k, a)| {
                self.antecedents[..k].iter()
                    .any(|b| a.feature_index() == b.feature_index())
            })
    }


    /// Returns `true` if `self` and `other` have the same antecedents,
    /// regardless of their order.
    pub fn same_antecedents(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.antecedents.iter()
                .all(|a| other.antecedents.contains(a))
    }


    /// A rule is valid iff
    /// 1. no two antecedents test the same feature, and
    /// 2. no rule in `rules` has the same antecedents.
    pub fn is_valid(&self, rules: &RuleList) -> bool {
        !self.has_repeated_feature() && !rules.contains_equivalent(self)
    }


    /// Returns the sorted `(feature, level)` pairs of `self`.
    pub(crate) fn key(&self) -> Vec<(usize, u32)> {
        let mut key = self.antecedents.iter()
            .map(|a| a.key())
            .collect::<Vec<_>>();
        key.sort_unstable();
        key
    }


    /// Returns the alive examples that satisfy every antecedent.
    pub fn coverage(&self, dataset: &Dataset, weights: &Weights)
        -> FixedBitSet
    {
        let mut rows = weights.alive().clone();
        self.antecedents.iter()
            .for_each(|a| {
                rows.intersect_with(
                    dataset.level_rows(a.feature_index(), a.level())
                );
            });
        rows
    }
}


impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.antecedents.is_empty() {
            return write!(f, "TRUE");
        }
        let line = self.antecedents.iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" AND ");
        write!(f, "{line}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ant(k: usize, level: u32) -> Arc<Antecedent> {
        let feature = format!("f{k}");
        let value = format!("v{level}");
        Arc::new(Antecedent::new(k, feature, level, value))
    }

    #[test]
    fn repeated_feature_is_invalid() {
        let rule = Rule::from_antecedent(&ant(0, 0))
            .specialize(&ant(0, 1));
        assert!(rule.has_repeated_feature());
        assert!(!rule.is_valid(&RuleList::new()));

        let rule = Rule::from_antecedent(&ant(0, 0))
            .specialize(&ant(0, 0));
        assert!(!rule.is_valid(&RuleList::new()));
    }

    #[test]
    fn order_does_not_matter() {
        let ab = Rule::from_antecedent(&ant(0, 0)).specialize(&ant(1, 2));
        let ba = Rule::from_antecedent(&ant(1, 2)).specialize(&ant(0, 0));
        assert!(ab.same_antecedents(&ba));
        assert_eq!(ab.key(), ba.key());

        let mut rules = RuleList::new();
        rules.push(Rule::from_antecedent(&ant(0, 0)));
        assert!(!rules.contains_equivalent(&ab));
        assert!(ab.is_valid(&rules));

        rules.push(ba);
        assert!(rules.contains_equivalent(&ab));
        assert!(!ab.is_valid(&rules));
    }

    #[test]
    fn display_conjunction() {
        let rule = Rule::from_antecedent(&ant(0, 0)).specialize(&ant(1, 2));
        assert_eq!(rule.to_string(), "f0 = v0 AND f1 = v2");
    }
}
