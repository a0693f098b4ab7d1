use serde::{Serialize, Deserialize};

use std::fmt;
use std::ops::Deref;

use super::Rule;
use crate::error::SubgroupError;


/// The ordered list of rules accepted by the learner.
/// Rules are appended only; the order is the acceptance order.
/// 
/// You can read/write this struct by `Serde` trait.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleList {
    rules: Vec<Rule>,
}


impl RuleList {
    /// Construct an empty list.
    pub fn new() -> Self {
        Self::default()
    }


    /// Append an accepted rule.
    pub(crate) fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }


    /// Returns the rules in acceptance order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules[..]
    }


    /// Returns the last accepted rule.
    pub fn last(&self) -> Option<&Rule> {
        self.rules.last()
    }


    /// Returns `true` if a rule with the same antecedents
    /// as `rule` is in `self`.
    pub fn contains_equivalent(&self, rule: &Rule) -> bool {
        self.rules.iter().any(|r| r.same_antecedents(rule))
    }


    /// Serialize `self` to a JSON string.
    pub fn to_json(&self) -> Result<String, SubgroupError> {
        Ok(serde_json::to_string(self)?)
    }


    /// Deserialize a JSON string written by [`RuleList::to_json`].
    pub fn from_json<S: AsRef<str>>(json: S) -> Result<Self, SubgroupError> {
        Ok(serde_json::from_str(json.as_ref())?)
    }
}


impl Deref for RuleList {
    type Target = [Rule];
    fn deref(&self) -> &Self::Target {
        &self.rules[..]
    }
}


impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rule list:")?;
        for (k, rule) in self.rules.iter().enumerate() {
            writeln!(f, "[{k:>3}] {rule}  (WRAcc = {:.5})", rule.wracc())?;
        }
        Ok(())
    }
}
