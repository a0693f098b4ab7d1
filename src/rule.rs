//! Defines the atomic conditions (`Antecedent`),
//! their conjunctions (`Rule`), and
//! the ordered output of the learner (`RuleList`).

mod antecedent;
mod rule_struct;
mod rule_list;
mod selector;


pub use antecedent::Antecedent;
pub use rule_struct::Rule;
pub use rule_list::RuleList;
pub use selector::selectors;
