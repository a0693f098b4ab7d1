use std::path::Path;

use super::dataset_struct::Dataset;
use crate::error::{ConfigError, SubgroupError};


/// A struct that returns [`Dataset`].
/// Using this struct, one can read a CSV format file to [`Dataset`]
/// with its target column set.
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use subgroups::DatasetReader;
/// let filename = "/path/to/csv/file.csv";
/// let dataset = DatasetReader::default()
///     .file(filename)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct DatasetReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
}


impl<P, S> DatasetReader<P, S> {
    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }
}


impl<P, S> DatasetReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> DatasetReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for target label.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}


impl<P, S> DatasetReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments,
    /// and returns `Result<Dataset, SubgroupError>`.
    /// This method consumes `self.`
    /// 
    /// Returns a configuration error
    /// if the file name or the target column is not set.
    pub fn read(self) -> Result<Dataset, SubgroupError> {
        let file = self.file
            .ok_or(ConfigError::FileNotSet)?;
        let target = self.target
            .ok_or(ConfigError::TargetNotSet)?;

        Dataset::from_csv(file, self.has_header)?
            .set_target(target)
    }
}
