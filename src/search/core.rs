//! Provides `RuleSearch` trait.

use crate::{
    PositiveClass,
    Rule,
    RuleList,
    Weights,
};


/// The trait [`RuleSearch`] defines the standard framework
/// of a rule searcher.
/// In each round, a learner such as [`Cn2Sd`](crate::Cn2Sd)
/// calls [`RuleSearch::produce`] with the current weights, and
/// accepts or rejects the returned rule.
/// 
/// # Required Methods
/// - [`RuleSearch::name`]
/// - [`RuleSearch::produce`]
/// - [`RuleSearch::info`] ... optional.
pub trait RuleSearch {
    /// Returns the name of the searcher.
    fn name(&self) -> &str;


    /// Returns the information of the searcher as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Returns the best rule for the current `weights`,
    /// excluding the rules in `rules`.
    /// Returns `None` if no valid rule exists.
    fn produce(
        &self,
        positive: &PositiveClass,
        weights: &Weights,
        rules: &RuleList,
    ) -> Option<Rule>;
}
