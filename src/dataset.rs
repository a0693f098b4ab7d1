//! Struct `Dataset` represents a batch of labeled categorical examples,
//! and struct `Weights` keeps the per-example weights
//! that the learner updates.

// Provides feature struct.
pub(crate) mod feature;
// Provides dataset struct.
pub(crate) mod dataset_struct;
// Provides a struct that reads a file.
pub(crate) mod reader;
// Provides the weight table.
pub(crate) mod weights;


pub use reader::DatasetReader;
pub use dataset_struct::{Dataset, PositiveClass};
pub use feature::Feature;
pub use weights::Weights;
