//! This directory provides some features for research.
//! Measure the followings of the learner per round
//! - Accepted rule and its WRAcc
//! - Number of remaining examples
//! - Remaining positive weight
//! - Running time

/// Defines a struct that runs a learner with logging.
pub mod logger;

pub use logger::{
    Logger,
    Research,
};
