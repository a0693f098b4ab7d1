//! Constants shared across the crate.

/// A positive example whose weight is below this value
/// is regarded as exhausted by the stop condition.
pub const ALMOST_ZERO: f64 = 0.1;

/// Initial weight of every example.
pub const INITIAL_WEIGHT: f64 = 1f64;

/// Default beam width of [`BeamSearch`](crate::BeamSearch).
pub const DEFAULT_MAX_CANDIDATES: usize = 2;
/// Default acceptance threshold of [`Cn2Sd`](crate::Cn2Sd).
pub const DEFAULT_MIN_WRACC: f64 = 0.001;
/// Default decay factor for [`Weighting::Multiplicative`](crate::Weighting).
pub const DEFAULT_GAMMA: f64 = 0.1;

pub(crate) const BUFFER_SIZE: usize = 256;
