//! The files in `search/` directory defines
//! `RuleSearch` trait and the beam search.

/// Provides RuleSearch trait.
pub mod core;

/// Defines the beam search.
pub mod beam_search;


pub use self::core::RuleSearch;

pub use self::beam_search::{
    BeamSearch,
    BeamSearchBuilder,
};
