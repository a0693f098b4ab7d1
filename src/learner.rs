//! Provides `SubgroupLearner` trait, the CN2-SD learner, and
//! the weighting policies applied to accepted rules.

mod core;
mod weighting;
mod cn2sd;


/// SubgroupLearner trait
pub use self::core::{
    SubgroupLearner,
    DriverState,
};

pub use self::weighting::Weighting;
pub use self::cn2sd::Cn2Sd;
