use crate::{Dataset, SubgroupError};
use crate::common::checkers;
use crate::constants::DEFAULT_MAX_CANDIDATES;
use super::BeamSearch;


/// A struct that builds [`BeamSearch`].
/// `BeamSearchBuilder` keeps parameters for constructing `BeamSearch`.
/// 
/// # Example
/// 
/// ```no_run
/// use subgroups::prelude::*;
/// 
/// # let dataset = Dataset::from_csv("titanic.csv", true).unwrap();
/// let searcher = BeamSearchBuilder::new(&dataset)
///     .max_candidates(5)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct BeamSearchBuilder<'a> {
    dataset: &'a Dataset,
    max_candidates: usize,
    dedup_candidates: bool,
}


impl<'a> BeamSearchBuilder<'a> {
    /// Construct a new instance of [`BeamSearchBuilder`].
    /// By default, [`BeamSearchBuilder`] sets the parameters as follows;
    /// ```text
    /// max_candidates: DEFAULT_MAX_CANDIDATES == 2,
    /// dedup_candidates: false,
    /// ```
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            dedup_candidates: false,
        }
    }


    /// Set the beam width,
    /// i.e., the number of rules specialized in the next round.
    pub fn max_candidates(mut self, width: usize) -> Self {
        self.max_candidates = width;
        self
    }


    /// If `true`, a candidate whose antecedents equal
    /// an earlier candidate of the same round is dropped
    /// before scoring.
    /// Default is `false`, which keeps both copies in the beam.
    pub fn dedup_candidates(mut self, flag: bool) -> Self {
        self.dedup_candidates = flag;
        self
    }


    /// Build a `BeamSearch`.
    /// This method consumes `self`.
    /// Returns a configuration error if the beam width is `0`.
    pub fn build(self) -> Result<BeamSearch<'a>, SubgroupError> {
        checkers::beam_width(self.max_candidates)?;

        let beam = BeamSearch::new(
            self.dataset, self.max_candidates, self.dedup_candidates
        );
        Ok(beam)
    }
}
