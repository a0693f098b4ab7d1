#![warn(missing_docs)]

//! 
//! A crate that discovers subgroups with the CN2-SD algorithm.
//! 
//! A **subgroup** is a conjunctive rule over categorical features,
//! e.g., `sex = female AND class = first`,
//! whose covered examples are over-represented
//! in a designated positive class.
//! 
//! The crate is organized as a repeated game between
//! a **learner** and a **rule searcher**, in the same way as
//! a boosting algorithm alternates with its weak learner:
//! 
//! 1. The searcher ([`BeamSearch`]) returns the best rule
//!    w.r.t. the weighted relative accuracy (WRAcc)
//!    on the current example weights.
//! 2. The learner ([`Cn2Sd`]) accepts the rule
//!    and updates the example weights
//!    by one of the [`Weighting`] policies.
//! 
//! The game terminates when no rule attains the minimum WRAcc,
//! or when the positive examples are almost exhausted.
//! 
//! # Example
//! ```no_run
//! use subgroups::prelude::*;
//! 
//! let dataset = DatasetReader::default()
//!     .file("/path/to/titanic.csv")
//!     .has_header(true)
//!     .target_feature("Survived")
//!     .read()
//!     .unwrap();
//! 
//! let searcher = BeamSearchBuilder::new(&dataset)
//!     .max_candidates(5)
//!     .build()
//!     .unwrap();
//! 
//! let mut learner = Cn2Sd::init(&dataset)
//!     .positive_class("Yes")
//!     .min_wracc(0.01)
//!     .weighting(Weighting::Multiplicative(0.5));
//! 
//! let rules = learner.run(&searcher).unwrap();
//! println!("{rules}");
//! ```

pub mod constants;
pub mod error;
pub mod common;
pub mod dataset;
pub mod rule;
pub mod quality;
pub mod search;
pub mod learner;
pub mod research;
pub mod prelude;


pub use error::{
    SubgroupError,
    ConfigError,
};

pub use dataset::{
    Dataset,
    DatasetReader,
    Feature,
    PositiveClass,
    Weights,
};

pub use rule::{
    Antecedent,
    Rule,
    RuleList,
};

pub use quality::Background;

pub use search::{
    RuleSearch,
    BeamSearch,
    BeamSearchBuilder,
};

pub use learner::{
    SubgroupLearner,
    Cn2Sd,
    DriverState,
    Weighting,
};
