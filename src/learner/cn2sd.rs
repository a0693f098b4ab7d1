//! Provides [`Cn2Sd`] by Lavrač et al., 2004.
use crate::{
    Dataset,
    PositiveClass,
    RuleList,
    RuleSearch,
    SubgroupError,
    SubgroupLearner,
    Weights,
    Weighting,
    DriverState,

    common::checkers,
    constants::{DEFAULT_GAMMA, DEFAULT_MIN_WRACC},
    error::ConfigError,
    research::Research,
};

use std::ops::ControlFlow;


/// Defines `CN2-SD`.
/// This struct is based on the paper:
/// [Subgroup Discovery with CN2-SD](https://jmlr.org/papers/v5/lavrac04a.html)
/// by Nada Lavrač, Branko Kavšek, Peter Flach, and Ljupčo Todorovski.
/// 
/// In each round, `Cn2Sd` asks the searcher for the best rule
/// and accepts it if its WRAcc is at least `min_wracc`.
/// An accepted rule updates the weights on the examples it covers
/// (see [`Weighting`]).
/// 
/// `Cn2Sd` stops when
/// - the searcher returns no rule,
/// - the best rule has WRAcc below `min_wracc`, or
/// - every positive example has weight below
///   [`ALMOST_ZERO`](crate::constants::ALMOST_ZERO).
/// 
/// # Example
/// The following code shows a small example
/// for running [`Cn2Sd`].
/// 
/// ```no_run
/// use subgroups::prelude::*;
/// 
/// // Read the dataset from the CSV file.
/// // We use the column named `Survived` as the label.
/// let has_header = true;
/// let dataset = Dataset::from_csv("titanic.csv", has_header)
///     .unwrap()
///     .set_target("Survived")
///     .unwrap();
/// 
/// let searcher = BeamSearchBuilder::new(&dataset)
///     .max_candidates(5)
///     .build()
///     .unwrap();
/// 
/// let mut learner = Cn2Sd::init(&dataset)
///     .positive_class("Yes")
///     .min_wracc(0.01)
///     .weighting(Weighting::Additive);
/// 
/// let rules = learner.run(&searcher).unwrap();
/// for rule in rules.iter() {
///     println!("{rule}: {}", rule.wracc());
/// }
/// ```
pub struct Cn2Sd<'a> {
    // Training dataset
    dataset: &'a Dataset,

    // Label of the positive class and its rows.
    positive_class: Option<String>,
    positive: Option<PositiveClass>,

    // Acceptance threshold on WRAcc
    min_wracc: f64,

    // Update rule for covered examples
    weighting: Weighting,

    // Weights on examples.
    weights: Weights,

    // Accepted rules.
    rules: RuleList,

    state: DriverState,

    // Optional. If this value is `Some(it)`,
    // the algorithm terminates after `it` iterations.
    force_quit_at: Option<usize>,

    // Terminated iteration.
    terminated: usize,
}


impl<'a> Cn2Sd<'a> {
    /// Initialize the `Cn2Sd`.
    /// By default, `Cn2Sd` sets the parameters as follows;
    /// ```text
    /// min_wracc: DEFAULT_MIN_WRACC == 0.001,
    /// weighting: Weighting::Multiplicative(DEFAULT_GAMMA == 0.1),
    /// ```
    /// The positive class has no default.
    pub fn init(dataset: &'a Dataset) -> Self {
        let n_sample = dataset.shape().0;

        Self {
            dataset,

            positive_class: None,
            positive: None,

            min_wracc: DEFAULT_MIN_WRACC,
            weighting: Weighting::Multiplicative(DEFAULT_GAMMA),

            weights: Weights::uniform(n_sample),
            rules: RuleList::new(),

            state: DriverState::Running,
            force_quit_at: None,
            terminated: usize::MAX,
        }
    }


    /// Set the label of the positive class.
    pub fn positive_class<S: ToString>(mut self, label: S) -> Self {
        self.positive_class = Some(label.to_string());
        self
    }


    /// Set the minimum WRAcc of an accepted rule.
    pub fn min_wracc(mut self, min_wracc: f64) -> Self {
        self.min_wracc = min_wracc;
        self
    }


    /// Set the update rule for covered examples.
    pub fn weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }


    /// Force quits after `it` iterations.
    /// The resulting rule list is a prefix of the one
    /// obtained without this option.
    pub fn force_quit_at(mut self, it: usize) -> Self {
        self.force_quit_at = Some(it);
        self
    }


    /// Returns the current state.
    pub fn state(&self) -> DriverState {
        self.state
    }


    /// Returns the current weights on examples.
    pub fn weights(&self) -> &Weights {
        &self.weights
    }


    /// Returns the rules accepted so far.
    pub fn rules(&self) -> &RuleList {
        &self.rules
    }


    /// Returns the iteration at which `self` stopped.
    /// Returns `None` while running.
    pub fn terminated(&self) -> Option<usize> {
        match self.state {
            DriverState::Running => None,
            DriverState::Stopped => Some(self.terminated),
        }
    }


    #[inline]
    fn stop(&mut self, iteration: usize) -> ControlFlow<usize> {
        self.state = DriverState::Stopped;
        self.terminated = iteration;
        ControlFlow::Break(iteration)
    }
}


impl SubgroupLearner for Cn2Sd<'_> {
    fn name(&self) -> &str {
        "CN2-SD"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_sample, n_feature) = self.dataset.shape();
        let quit = if let Some(it) = self.force_quit_at {
            format!("At round {it}")
        } else {
            "-".to_string()
        };
        let label = self.positive_class.as_deref()
            .unwrap_or("-")
            .to_string();
        let info = Vec::from([
            ("# of examples", format!("{n_sample}")),
            ("# of features", format!("{n_feature}")),
            ("Positive class", label),
            ("Min. WRAcc", format!("{}", self.min_wracc)),
            ("Weighting", format!("{}", self.weighting)),
            ("Force quit", quit),
        ]);
        Some(info)
    }


    fn preprocess(&mut self) -> Result<(), SubgroupError> {
        checkers::min_wracc(self.min_wracc)?;
        self.weighting.validate()?;

        let label = self.positive_class.as_ref()
            .ok_or(ConfigError::PositiveClassNotSet)?;
        self.positive = Some(self.dataset.positive_class(label)?);

        let n_sample = self.dataset.shape().0;
        self.weights = Weights::uniform(n_sample);
        self.rules = RuleList::new();
        self.state = DriverState::Running;
        self.terminated = usize::MAX;

        Ok(())
    }


    fn step<S>(&mut self, searcher: &S, iteration: usize)
        -> ControlFlow<usize>
        where S: RuleSearch,
    {
        if self.state == DriverState::Stopped {
            return ControlFlow::Break(self.terminated);
        }

        if self.force_quit_at.is_some_and(|it| it < iteration) {
            return self.stop(iteration - 1);
        }

        // `preprocess` has not been called.
        let Some(positive) = self.positive.as_ref() else {
            return self.stop(iteration);
        };

        let best = searcher.produce(positive, &self.weights, &self.rules);

        let accepted = match best {
            Some(rule) if rule.wracc() >= self.min_wracc => {
                let covered = rule.coverage(self.dataset, &self.weights);
                self.weights = self.weighting
                    .apply(&self.weights, &covered, positive);
                self.rules.push(rule);
                true
            },
            _ => false,
        };

        if !accepted || self.weights.positives_exhausted(positive) {
            return self.stop(iteration);
        }

        ControlFlow::Continue(())
    }


    fn postprocess(&mut self) -> RuleList {
        self.rules.clone()
    }
}


impl Research for Cn2Sd<'_> {
    fn current_rules(&self) -> &RuleList {
        &self.rules
    }


    fn current_weights(&self) -> &Weights {
        &self.weights
    }


    fn remaining_positive_weight(&self) -> f64 {
        self.positive.as_ref()
            .map(|p| self.weights.positive_weight(p))
            .unwrap_or(0f64)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::BeamSearchBuilder;
    use std::io::BufReader;

    fn dataset() -> Dataset {
        let mut csv = String::from("A,T\n");
        (0..5).for_each(|_| csv.push_str("x,Yes\n"));
        (0..5).for_each(|_| csv.push_str("y,No\n"));
        Dataset::from_reader(BufReader::new(csv.as_bytes()), true)
            .unwrap()
            .set_target("T")
            .unwrap()
    }

    #[test]
    fn missing_positive_class_is_a_config_error() {
        let data = dataset();
        let searcher = BeamSearchBuilder::new(&data).build().unwrap();
        let err = Cn2Sd::init(&data).run(&searcher).unwrap_err();
        assert!(matches!(
            err, SubgroupError::Config(ConfigError::PositiveClassNotSet)
        ));
    }

    #[test]
    fn absent_positive_class_is_a_config_error() {
        let data = dataset();
        let searcher = BeamSearchBuilder::new(&data).build().unwrap();
        let mut learner = Cn2Sd::init(&data).positive_class("Maybe");
        let err = learner.run(&searcher).unwrap_err();
        assert!(err.is_config());
        assert!(learner.rules().is_empty());
    }

    #[test]
    fn bad_gamma_is_reported_before_any_round() {
        let data = dataset();
        let searcher = BeamSearchBuilder::new(&data).build().unwrap();
        let mut learner = Cn2Sd::init(&data)
            .positive_class("Yes")
            .weighting(Weighting::Multiplicative(1.5));
        let err = learner.run(&searcher).unwrap_err();
        assert!(matches!(err, SubgroupError::Config(ConfigError::Gamma(_))));
        assert_eq!(learner.state(), DriverState::Running);
    }

    #[test]
    fn stopped_state_is_absorbing() {
        let data = dataset();
        let searcher = BeamSearchBuilder::new(&data).build().unwrap();
        let mut learner = Cn2Sd::init(&data)
            .positive_class("Yes")
            .weighting(Weighting::Covering);
        let rules = learner.run(&searcher).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(learner.state(), DriverState::Stopped);
        assert_eq!(learner.terminated(), Some(1));

        let flow = learner.step(&searcher, 2);
        assert_eq!(flow, ControlFlow::Break(1));
        assert_eq!(learner.rules().len(), 1);
    }

    #[test]
    fn step_needs_preprocess() {
        let data = dataset();
        let searcher = BeamSearchBuilder::new(&data).build().unwrap();
        let mut learner = Cn2Sd::init(&data)
            .positive_class("Yes")
            .weighting(Weighting::Covering);

        let flow = learner.step(&searcher, 1);
        assert_eq!(flow, ControlFlow::Break(1));
        assert_eq!(learner.state(), DriverState::Stopped);
        assert!(learner.rules().is_empty());

        // `preprocess` restarts the learner.
        learner.preprocess().unwrap();
        assert_eq!(learner.state(), DriverState::Running);
        let flow = learner.step(&searcher, 1);
        assert_eq!(flow, ControlFlow::Break(1));
        assert_eq!(learner.rules().len(), 1);
    }

    #[test]
    fn force_quit_caps_the_rounds() {
        let data = dataset();
        let searcher = BeamSearchBuilder::new(&data).build().unwrap();
        let mut learner = Cn2Sd::init(&data)
            .positive_class("Yes")
            .min_wracc(-1.0)
            .weighting(Weighting::Additive)
            .force_quit_at(1);
        let rules = learner.run(&searcher).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(learner.terminated(), Some(1));
    }
}
