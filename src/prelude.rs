//! Exports the standard structs and traits for subgroup discovery.
//! 
pub use crate::dataset::{
    Dataset,
    DatasetReader,
    Feature,
    PositiveClass,
    Weights,
};


pub use crate::rule::{
    Antecedent,
    Rule,
    RuleList,
};


pub use crate::search::{
    // Searcher trait
    RuleSearch,

    BeamSearch,
    BeamSearchBuilder,
};


pub use crate::learner::{
    // Learner trait
    SubgroupLearner,

    Cn2Sd,
    DriverState,
    Weighting,
};


pub use crate::research::Logger;


pub use crate::error::{
    SubgroupError,
    ConfigError,
};
