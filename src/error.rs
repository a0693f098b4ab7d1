//! Defines the errors returned by this crate.
//! 
//! Two categories exist.
//! [`ConfigError`] reports a wrong user input
//! (e.g., the target column does not exist),
//! and is detected before the learner starts any round.
//! The other variants of [`SubgroupError`] report
//! a failure in reading the input.
use std::io;
use polars::prelude::PolarsError;


/// Errors caused by an invalid configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The target column does not exist in the dataset.
    #[error("the target column `{0}` does not exist")]
    MissingTargetColumn(String),

    /// The positive class is not a level of the target column.
    #[error(
        "the positive class `{class}` is not in the levels \
        of the target column `{column}`"
    )]
    PositiveClassAbsent {
        /// Requested positive class.
        class: String,
        /// Name of the target column.
        column: String,
    },

    /// The input file is not given to the reader.
    #[error("the file name for csv is not set")]
    FileNotSet,

    /// The dataset has no target column.
    #[error("the target column is not specified. use `Dataset::set_target`")]
    TargetNotSet,

    /// The target column holds real values.
    #[error("the target column `{0}` is continuous")]
    ContinuousTarget(String),

    /// The positive class is not given to the learner.
    #[error("the positive class is not specified")]
    PositiveClassNotSet,

    /// The beam width must be positive.
    #[error("the beam width must be positive. got {0}")]
    BeamWidth(usize),

    /// The decay factor must lie in `(0, 1)`.
    #[error("gamma must be in (0, 1). got {0}")]
    Gamma(f64),

    /// The acceptance threshold must be finite.
    #[error("min_wracc must be finite. got {0}")]
    MinWracc(f64),
}


/// Errors returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum SubgroupError {
    /// Invalid user input.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to read a file.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Failed to read a `polars::DataFrame`.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// Failed to (de)serialize a rule list.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The input table is malformed.
    #[error("malformed input at line {line}: {reason}")]
    Malformed {
        /// Line number (1-indexed, header included).
        line: usize,
        /// What went wrong.
        reason: String,
    },
}


impl SubgroupError {
    /// Returns `true` if `self` is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_distinguished() {
        let err = SubgroupError::from(ConfigError::TargetNotSet);
        assert!(err.is_config());

        let err = SubgroupError::Malformed { line: 3, reason: "x".into() };
        assert!(!err.is_config());
    }

    #[test]
    fn message_names_the_column() {
        let err = ConfigError::PositiveClassAbsent {
            class: "Maybe".into(),
            column: "Survived".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Maybe"));
        assert!(msg.contains("Survived"));
    }
}
