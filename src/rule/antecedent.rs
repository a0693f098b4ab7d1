use serde::{Serialize, Deserialize};

use std::fmt;
use std::hash::{Hash, Hasher};


/// An equality test `feature = value` on a discrete feature.
/// 
/// Two antecedents are equal iff they test the same level
/// of the same feature.
/// The names are kept only for printing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Antecedent {
    feature_index: usize,
    feature: String,
    level: u32,
    value: String,
}


impl Antecedent {
    /// Construct a new antecedent
    /// that tests `level` of the `feature_index`-th feature.
    pub fn new<S, T>(feature_index: usize, feature: S, level: u32, value: T)
        -> Self
        where S: ToString,
              T: ToString,
    {
        Self {
            feature_index,
            feature: feature.to_string(),
            level,
            value: value.to_string(),
        }
    }


    /// Returns the index of the tested feature in
    /// [`Dataset::features`](crate::Dataset::features).
    #[inline]
    pub fn feature_index(&self) -> usize {
        self.feature_index
    }


    /// Returns the name of the tested feature.
    pub fn feature(&self) -> &str {
        &self.feature
    }


    /// Returns the level code of the tested value.
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }


    /// Returns the tested value.
    pub fn value(&self) -> &str {
        &self.value
    }


    #[inline]
    pub(crate) fn key(&self) -> (usize, u32) {
        (self.feature_index, self.level)
    }
}


impl PartialEq for Antecedent {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}


impl Eq for Antecedent {}


impl Hash for Antecedent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}


impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.feature, self.value)
    }
}
