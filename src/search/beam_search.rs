//! Defines the beam search of CN2.
mod builder;
mod beam;

pub use builder::BeamSearchBuilder;
pub use beam::BeamSearch;
