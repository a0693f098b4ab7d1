use polars::prelude::*;
use std::collections::HashMap;

use crate::error::SubgroupError;


/// A column of the input table.
/// 
/// Discrete columns keep the table of distinct values (`levels`)
/// in order of first appearance,
/// and one level code per example (`codes`).
/// `levels[codes[i] as usize]` is the value of the `i`-th example.
#[derive(Debug, Clone)]
pub enum Feature {
    /// Nominal values such as `male`, `female`.
    Categorical {
        /// Feature name
        name: String,
        /// Distinct values in order of first appearance.
        levels: Vec<String>,
        /// Level code of each example.
        codes: Vec<u32>,
    },
    /// Integer-coded values such as `1`, `2`, `3`.
    Integer {
        /// Feature name
        name: String,
        /// Distinct values in order of first appearance.
        levels: Vec<String>,
        /// Level code of each example.
        codes: Vec<u32>,
    },
    /// Real values.
    /// Continuous features never produce selectors;
    /// discretize them before building a [`Dataset`](crate::Dataset).
    Continuous {
        /// Feature name
        name: String,
        /// Feature values.
        vals: Vec<f64>,
    },
}


/// Assigns level codes to values in order of first appearance.
#[derive(Default)]
struct LevelTable {
    index: HashMap<String, u32>,
    levels: Vec<String>,
}


impl LevelTable {
    fn code<S: AsRef<str>>(&mut self, value: S) -> u32 {
        let value = value.as_ref();
        if let Some(&code) = self.index.get(value) {
            return code;
        }
        let code = self.levels.len() as u32;
        self.levels.push(value.to_string());
        self.index.insert(value.to_string(), code);
        code
    }


    fn encode<I, S>(values: I) -> (Vec<String>, Vec<u32>)
        where I: IntoIterator<Item = S>,
              S: AsRef<str>,
    {
        let mut table = Self::default();
        let codes = values.into_iter()
            .map(|v| table.code(v))
            .collect::<Vec<_>>();
        (table.levels, codes)
    }
}


impl Feature {
    /// Build a feature from the raw cells of a text table.
    /// 
    /// - If every cell is an integer, the feature is [`Feature::Integer`].
    /// - Else if every cell is a real number,
    ///   the feature is [`Feature::Continuous`].
    /// - Otherwise, the feature is [`Feature::Categorical`].
    pub fn from_cells<T: ToString>(name: T, cells: Vec<String>) -> Self {
        let name = name.to_string();

        let integers = cells.iter()
            .map(|c| c.parse::<i64>().ok())
            .collect::<Option<Vec<_>>>();
        if let Some(ints) = integers {
            let (levels, codes) = LevelTable::encode(
                ints.into_iter().map(|i| i.to_string())
            );
            return Self::Integer { name, levels, codes };
        }

        let reals = cells.iter()
            .map(|c| c.parse::<f64>().ok())
            .collect::<Option<Vec<_>>>();
        if let Some(vals) = reals {
            return Self::Continuous { name, vals };
        }

        let (levels, codes) = LevelTable::encode(cells);
        Self::Categorical { name, levels, codes }
    }


    /// Convert `polars::Series` into `Feature`.
    /// Float columns become [`Feature::Continuous`],
    /// integer columns become [`Feature::Integer`], and
    /// the others are casted to strings
    /// and become [`Feature::Categorical`].
    pub fn from_series(series: &Series) -> Result<Self, SubgroupError> {
        let name = series.name().to_string();
        let null_error = |i: usize| SubgroupError::Malformed {
            line: i + 1,
            reason: format!("null value in column `{name}`"),
        };

        let dtype = series.dtype();
        let feature = if dtype.is_float() {
            let series = series.cast(&DataType::Float64)?;
            let vals = series.f64()?
                .into_iter()
                .enumerate()
                .map(|(i, v)| v.ok_or_else(|| null_error(i)))
                .collect::<Result<Vec<_>, _>>()?;
            Self::Continuous { name: name.clone(), vals }
        } else if dtype.is_integer() {
            let series = series.cast(&DataType::Int64)?;
            let cells = series.i64()?
                .into_iter()
                .enumerate()
                .map(|(i, v)| v.map(|v| v.to_string()).ok_or_else(|| null_error(i)))
                .collect::<Result<Vec<_>, _>>()?;
            let (levels, codes) = LevelTable::encode(cells);
            Self::Integer { name: name.clone(), levels, codes }
        } else {
            let series = series.cast(&DataType::Utf8)?;
            let cells = series.utf8()?
                .into_iter()
                .enumerate()
                .map(|(i, v)| v.ok_or_else(|| null_error(i)))
                .collect::<Result<Vec<_>, _>>()?;
            let (levels, codes) = LevelTable::encode(cells);
            Self::Categorical { name: name.clone(), levels, codes }
        };
        Ok(feature)
    }


    /// Get the feature name.
    pub fn name(&self) -> &str {
        match self {
            Self::Categorical { name, .. } => name,
            Self::Integer     { name, .. } => name,
            Self::Continuous  { name, .. } => name,
        }
    }


    /// Returns the number of items in this feature.
    pub fn len(&self) -> usize {
        match self {
            Self::Categorical { codes, .. } => codes.len(),
            Self::Integer     { codes, .. } => codes.len(),
            Self::Continuous  { vals,  .. } => vals.len(),
        }
    }


    /// Returns `true` if the number of examples is equals to `0`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns `true` if this feature is usable for selectors.
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::Continuous { .. })
    }


    /// Returns the pair of the level table and the level codes.
    /// Returns `None` for a continuous feature.
    pub fn discrete(&self) -> Option<(&[String], &[u32])> {
        match self {
            Self::Categorical { levels, codes, .. }
            | Self::Integer   { levels, codes, .. } => {
                Some((&levels[..], &codes[..]))
            },
            Self::Continuous { .. } => None,
        }
    }


    /// Returns the distinct values of this feature.
    pub fn levels(&self) -> Option<&[String]> {
        self.discrete().map(|(levels, _)| levels)
    }


    /// Returns the level code of `value`.
    pub fn code_of<S: AsRef<str>>(&self, value: S) -> Option<u32> {
        let value = value.as_ref();
        self.levels()?
            .iter()
            .position(|level| level == value)
            .map(|k| k as u32)
    }


    /// Returns the textual value of the `i`-th example.
    pub fn value_at(&self, i: usize) -> String {
        match self {
            Self::Categorical { levels, codes, .. }
            | Self::Integer   { levels, codes, .. } => {
                levels[codes[i] as usize].clone()
            },
            Self::Continuous { vals, .. } => vals[i].to_string(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn cells(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn infer_integer() {
        let feat = Feature::from_cells("pclass", cells(&["3", "1", "3", "2"]));
        assert!(matches!(feat, Feature::Integer { .. }));
        assert_eq!(feat.levels().unwrap(), &["3", "1", "2"]);
    }

    #[test]
    fn infer_continuous() {
        let feat = Feature::from_cells("fare", cells(&["7.25", "71.3", "8"]));
        assert!(matches!(feat, Feature::Continuous { .. }));
        assert!(!feat.is_discrete());
        assert!(feat.levels().is_none());
    }

    #[test]
    fn levels_in_first_appearance_order() {
        let feat = Feature::from_cells(
            "sex", cells(&["male", "female", "male", "child"])
        );
        let (levels, codes) = feat.discrete().unwrap();
        assert_eq!(levels, &["male", "female", "child"]);
        assert_eq!(codes, &[0, 1, 0, 2]);
        assert_eq!(feat.code_of("child"), Some(2));
        assert_eq!(feat.code_of("dog"), None);
        assert_eq!(feat.value_at(3), "child");
    }
}
