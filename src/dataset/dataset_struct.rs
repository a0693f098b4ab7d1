use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::collections::HashMap;
use std::ops::Index;

use fixedbitset::FixedBitSet;
use polars::prelude::*;
use rayon::prelude::*;

use super::feature::*;
use crate::constants::BUFFER_SIZE;
use crate::error::{ConfigError, SubgroupError};


/// Struct `Dataset` holds a batch of examples
/// described by categorical features.
/// 
/// `Dataset` is immutable once the target column is set.
/// The weights updated by the learner live in [`Weights`](crate::Weights),
/// which refers to the examples by their row index.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Option<Feature>,
    // `level_rows[k][c]` is the set of rows
    // whose `k`-th feature takes the level `c`.
    pub(super) level_rows: Vec<Vec<FixedBitSet>>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


/// The rows that belong to the positive class.
/// Construct this struct by [`Dataset::positive_class`].
#[derive(Debug, Clone)]
pub struct PositiveClass {
    label: String,
    mask: FixedBitSet,
}


impl PositiveClass {
    /// Returns the label of the positive class.
    pub fn label(&self) -> &str {
        &self.label
    }


    /// Returns `true` if the `i`-th example is positive.
    #[inline]
    pub fn contains(&self, i: usize) -> bool {
        self.mask.contains(i)
    }


    /// Returns the set of positive rows.
    pub fn rows(&self) -> &FixedBitSet {
        &self.mask
    }
}


impl Dataset {
    /// Construct a new `Dataset` from features of equal length.
    /// This method does not set the target column.
    pub fn from_features(features: Vec<Feature>)
        -> Result<Self, SubgroupError>
    {
        let n_sample = features.first()
            .map(|feat| feat.len())
            .unwrap_or(0);
        if let Some(feat) = features.iter().find(|f| f.len() != n_sample) {
            return Err(SubgroupError::Malformed {
                line: 0,
                reason: format!(
                    "column `{}` has {} rows, expected {n_sample}",
                    feat.name(), feat.len()
                ),
            });
        }

        let mut dataset = Self {
            name_to_index: HashMap::new(),
            features,
            target: None,
            level_rows: Vec::new(),
            n_sample,
            n_feature: 0,
        };
        dataset.reindex();
        Ok(dataset)
    }


    /// Convert `polars::DataFrame` into `Dataset`.
    /// This method takes the ownership for the given `data`.
    /// 
    /// **Do not forget** to call [`Dataset::set_target`] to
    /// assign the class label.
    pub fn from_dataframe(data: DataFrame) -> Result<Self, SubgroupError> {
        let features = data.get_columns()
            .par_iter()
            .map(Feature::from_series)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_features(features)
    }


    /// Read a CSV format file to [`Dataset`] type.
    /// This method returns `Err` if the file does not exist.
    /// 
    /// If the CSV file does not have the header row,
    /// this method assigns a default name for each column:
    /// `Feat. [1]`, `Feat. [2]`, ..., `Feat. [n]`.
    /// 
    /// **Do not forget** to call [`Dataset::set_target`] to
    /// assign the class label.
    pub fn from_csv<P>(file: P, has_header: bool)
        -> Result<Self, SubgroupError>
        where P: AsRef<Path>,
    {
        // Open the given `file`.
        let file = File::open(file)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, has_header)
    }


    /// Read a CSV from [`BufReader`].
    /// Cells are separated by `,` and trimmed.
    /// Empty lines are skipped.
    pub fn from_reader<R>(reader: BufReader<R>, has_header: bool)
        -> Result<Self, SubgroupError>
        where R: Read,
    {
        let mut lines = reader.lines();

        let mut names = None;
        if has_header {
            if let Some(line) = lines.next() {
                let header = line?.split(',')
                    .map(|x| x.trim().to_string())
                    .collect::<Vec<_>>();
                names = Some(header);
            }
        }

        let offset = if has_header { 2 } else { 1 };
        let mut columns: Vec<Vec<String>> = names.as_ref()
            .map(|names| vec![Vec::with_capacity(BUFFER_SIZE); names.len()])
            .unwrap_or_default();

        for (i, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let cells = line.split(',')
                .map(|x| x.trim().to_string())
                .collect::<Vec<_>>();

            // The first row determines the width of a headerless file.
            if names.is_none() && columns.is_empty() {
                columns = vec![Vec::with_capacity(BUFFER_SIZE); cells.len()];
            }

            if cells.len() != columns.len() {
                return Err(SubgroupError::Malformed {
                    line: i + offset,
                    reason: format!(
                        "expected {} fields, got {}",
                        columns.len(), cells.len()
                    ),
                });
            }

            columns.iter_mut()
                .zip(cells)
                .for_each(|(column, cell)| { column.push(cell); });
        }

        let names = names.unwrap_or_else(|| {
            (1..=columns.len()).map(|i| format!("Feat. [{i}]"))
                .collect()
        });

        let features = names.into_par_iter()
            .zip(columns)
            .map(|(name, cells)| Feature::from_cells(name, cells))
            .collect::<Vec<_>>();

        Self::from_features(features)
    }


    /// Set the feature of name `target` to the target column.
    /// The old target column will be dropped.
    /// 
    /// Returns [`ConfigError::MissingTargetColumn`]
    /// if no feature is named `target`.
    pub fn set_target<S: AsRef<str>>(mut self, target: S)
        -> Result<Self, SubgroupError>
    {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| {
                ConfigError::MissingTargetColumn(target.to_string())
            })?;

        if !self.features[pos].is_discrete() {
            let err = ConfigError::ContinuousTarget(target.to_string());
            return Err(err.into());
        }

        self.target = Some(self.features.remove(pos));
        self.reindex();

        Ok(self)
    }


    /// Returns the rows of the positive class `label`.
    /// 
    /// Returns a configuration error if the target column is not set,
    /// or `label` is not a value of the target column.
    pub fn positive_class<S: AsRef<str>>(&self, label: S)
        -> Result<PositiveClass, ConfigError>
    {
        let label = label.as_ref();
        let target = self.target.as_ref()
            .ok_or(ConfigError::TargetNotSet)?;
        let code = target.code_of(label)
            .ok_or_else(|| ConfigError::PositiveClassAbsent {
                class: label.to_string(),
                column: target.name().to_string(),
            })?;

        let mut mask = FixedBitSet::with_capacity(self.n_sample);
        if let Some((_, codes)) = target.discrete() {
            codes.iter()
                .enumerate()
                .filter(|&(_, &c)| c == code)
                .for_each(|(i, _)| { mask.insert(i); });
        }

        Ok(PositiveClass { label: label.to_string(), mask })
    }


    /// Returns the target column.
    pub fn target(&self) -> Option<&Feature> {
        self.target.as_ref()
    }


    /// Returns the name of the target column.
    pub fn target_name(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.name())
    }


    /// Returns a slice of the features.
    /// The target column is excluded.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature named `name`.
    pub fn feature<S: AsRef<str>>(&self, name: S) -> Option<&Feature> {
        self.name_to_index.get(name.as_ref())
            .map(|&k| &self.features[k])
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the rows whose `feature_index`-th feature
    /// takes the level `level`.
    #[inline]
    pub(crate) fn level_rows(&self, feature_index: usize, level: u32)
        -> &FixedBitSet
    {
        &self.level_rows[feature_index][level as usize]
    }


    /// Returns the `idx`-th instance `(x, y)` as text.
    /// `y` is `None` if the target column is not set.
    pub fn at(&self, idx: usize) -> (Vec<String>, Option<String>) {
        let x = self.features.iter()
            .map(|feat| feat.value_at(idx))
            .collect::<Vec<_>>();
        let y = self.target.as_ref()
            .map(|t| t.value_at(idx));

        (x, y)
    }


    fn reindex(&mut self) {
        self.n_feature = self.features.len();
        self.name_to_index = self.features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();

        let n_sample = self.n_sample;
        self.level_rows = self.features.par_iter()
            .map(|feat| {
                let Some((levels, codes)) = feat.discrete() else {
                    return Vec::new();
                };
                let mut rows = vec![
                    FixedBitSet::with_capacity(n_sample);
                    levels.len()
                ];
                codes.iter()
                    .enumerate()
                    .for_each(|(i, &c)| { rows[c as usize].insert(i); });
                rows
            })
            .collect::<Vec<_>>();
    }
}


impl<S> Index<S> for Dataset
    where S: AsRef<str>
{
    type Output = Feature;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name)
            .unwrap_or_else(|| panic!("The feature `{name}` does not exist"));
        &self.features[k]
    }
}
