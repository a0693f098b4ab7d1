//! Provides `SubgroupLearner` trait.

use crate::{
    RuleList,
    RuleSearch,
    SubgroupError,
};

use std::ops::ControlFlow;


/// The state of a learner.
/// A learner is `Running` until its stop condition holds,
/// and never leaves `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// The learner accepts more rules.
    Running,
    /// The stop condition holds.
    Stopped,
}


/// The trait [`SubgroupLearner`] defines the standard framework
/// of subgroup discovery by weighted covering.
/// Here, the **standard framework** is defined as
/// a repeated game between **Learner** and **Searcher**
/// of the following form:
///
/// In each round `t = 1, 2, ...`,
/// 1. Searcher returns the best rule with respect to
///    the current example weights.
/// 2. Learner accepts the rule if its quality is high enough,
///    and updates the example weights.
///
/// # Required Methods
/// - [`SubgroupLearner::name`]
/// - [`SubgroupLearner::preprocess`]
/// - [`SubgroupLearner::step`]
/// - [`SubgroupLearner::postprocess`]
/// - [`SubgroupLearner::info`] ... optional.
///
/// # Provided Methods
/// - [`SubgroupLearner::run`]
pub trait SubgroupLearner {
    /// Returns the name of the learner.
    fn name(&self) -> &str;


    /// Returns the information of the learner as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// A main function that runs the learner.
    /// Every configuration error is reported
    /// before the first round.
    fn run<S>(&mut self, searcher: &S) -> Result<RuleList, SubgroupError>
        where S: RuleSearch,
    {
        self.preprocess()?;

        let _ = (1..).try_for_each(|iter| {
            self.step(searcher, iter)
        });

        Ok(self.postprocess())
    }


    /// Pre-processing for `self`.
    /// Validates the configuration and initializes the weights.
    fn preprocess(&mut self) -> Result<(), SubgroupError>;


    /// A round of search-then-update.
    /// This method returns
    /// `ControlFlow::Continue(())` while the learner is running,
    /// `ControlFlow::Break(terminated_iter)` otherwise.
    /// 
    /// [`SubgroupLearner::preprocess`] must be called
    /// before the first round.
    /// Without it, the learner stops at once
    /// with an empty rule list.
    fn step<S>(&mut self, searcher: &S, iteration: usize)
        -> ControlFlow<usize>
        where S: RuleSearch;


    /// Post-processing.
    /// This method returns the accepted rules.
    fn postprocess(&mut self) -> RuleList;
}
