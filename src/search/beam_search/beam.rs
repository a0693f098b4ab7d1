use rayon::prelude::*;
use fixedbitset::FixedBitSet;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::{
    Antecedent,
    Dataset,
    PositiveClass,
    Rule,
    RuleList,
    RuleSearch,
    Weights,
    quality::Background,
    rule,
};


/// The beam search of CN2.
/// 
/// Starting from the rules of a single antecedent,
/// each round specializes every rule in the beam by every selector,
/// scores the valid specializations by WRAcc, and
/// keeps the best `max_candidates` of them as the next beam.
/// The search terminates when a round yields no valid rule, and
/// returns the best rule over all rounds.
/// 
/// Construct this struct by [`BeamSearchBuilder`](super::BeamSearchBuilder).
#[derive(Debug, Clone)]
pub struct BeamSearch<'a> {
    dataset: &'a Dataset,
    max_candidates: usize,
    dedup_candidates: bool,
}


impl<'a> BeamSearch<'a> {
    pub(super) fn new(
        dataset: &'a Dataset,
        max_candidates: usize,
        dedup_candidates: bool,
    ) -> Self
    {
        Self { dataset, max_candidates, dedup_candidates }
    }


    /// Returns the beam width.
    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }


    /// The rules of a single antecedent.
    fn seed(&self, selectors: &[Arc<Antecedent>], rules: &RuleList)
        -> Vec<Rule>
    {
        selectors.iter()
            .map(Rule::from_antecedent)
            .filter(|rule| rule.is_valid(rules))
            .collect()
    }


    /// The full cross product of `beam` and `selectors`.
    fn specialize(
        &self,
        beam: &[Rule],
        selectors: &[Arc<Antecedent>],
        rules: &RuleList,
    ) -> Vec<Rule>
    {
        beam.iter()
            .flat_map(|rule| {
                selectors.iter().map(move |sel| rule.specialize(sel))
            })
            .filter(|rule| rule.is_valid(rules))
            .collect()
    }


    /// Drops a candidate whose antecedents appeared earlier in the round.
    fn dedup(candidates: &mut Vec<Rule>) {
        let mut seen = HashSet::with_capacity(candidates.len());
        candidates.retain(|rule| seen.insert(rule.key()));
    }


    /// Scores each candidate on the current weights.
    /// Each score only reads `weights`, so the order of evaluation
    /// does not change the result.
    fn score(
        &self,
        candidates: &mut [Rule],
        positive: &PositiveClass,
        weights: &Weights,
        background: &Background,
    )
    {
        candidates.par_iter_mut()
            .for_each(|rule| {
                rule.score(self.dataset, weights, positive, background);
            });
    }


    /// Keep the best `self.max_candidates` candidates.
    /// 
    /// Removing the worst candidate one at a time,
    /// the first one among ties,
    /// removes the `n - max_candidates` smallest scores
    /// in ascending order with ties broken by position.
    /// A stable sort finds exactly these candidates.
    /// The survivors keep their relative order.
    fn trim(&self, candidates: &mut Vec<Rule>) {
        let n = candidates.len();
        if n <= self.max_candidates { return; }

        let mut order = (0..n).collect::<Vec<usize>>();
        order.sort_by(|&i, &j| {
            let (a, b) = (candidates[i].wracc(), candidates[j].wracc());
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        });

        let mut worst = FixedBitSet::with_capacity(n);
        order.into_iter()
            .take(n - self.max_candidates)
            .for_each(|i| { worst.insert(i); });

        let mut k = 0;
        candidates.retain(|_| {
            let keep = !worst.contains(k);
            k += 1;
            keep
        });
    }


    /// Runs the beam search and returns the best rule.
    /// `inspect` receives the beam of each round after trimming.
    fn search<F>(
        &self,
        positive: &PositiveClass,
        weights: &Weights,
        rules: &RuleList,
        mut inspect: F,
    ) -> Option<Rule>
        where F: FnMut(&[Rule]),
    {
        let selectors = rule::selectors(self.dataset, weights);
        let background = Background::new(weights, positive);

        let mut best: Option<Rule> = None;
        let mut beam: Vec<Rule> = Vec::new();
        let mut first = true;
        loop {
            let mut candidates = if first {
                self.seed(&selectors, rules)
            } else {
                self.specialize(&beam, &selectors, rules)
            };
            first = false;

            if self.dedup_candidates {
                Self::dedup(&mut candidates);
            }

            self.score(&mut candidates, positive, weights, &background);

            // Candidates are compared in generation order.
            // A later candidate wins only if strictly better.
            for rule in candidates.iter() {
                let better = best.as_ref()
                    .map_or(true, |b| rule.wracc() > b.wracc());
                if better {
                    best = Some(rule.clone());
                }
            }

            self.trim(&mut candidates);

            if candidates.is_empty() { break; }
            inspect(&candidates);
            beam = candidates;
        }

        best
    }
}


impl RuleSearch for BeamSearch<'_> {
    fn name(&self) -> &str {
        "Beam Search"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Beam width", format!("{}", self.max_candidates)),
            ("Dedup candidates", format!("{}", self.dedup_candidates)),
        ]);
        Some(info)
    }


    fn produce(
        &self,
        positive: &PositiveClass,
        weights: &Weights,
        rules: &RuleList,
    ) -> Option<Rule>
    {
        self.search(positive, weights, rules, |_| {})
    }
}


impl fmt::Display for BeamSearch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "----------\n\
            # Beam Search\n\n\
            - Beam width: {}\n\
            - Dedup candidates: {}\n\
            ----------",
            self.max_candidates,
            self.dedup_candidates,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::BeamSearchBuilder;
    use std::io::BufReader;

    fn dataset(csv: &str) -> Dataset {
        Dataset::from_reader(BufReader::new(csv.as_bytes()), true)
            .unwrap()
            .set_target("T")
            .unwrap()
    }

    fn scored(values: &[f64]) -> Vec<Rule> {
        values.iter()
            .enumerate()
            .map(|(k, &v)| {
                let a = Arc::new(Antecedent::new(k, format!("f{k}"), 0, "v"));
                let mut rule = Rule::from_antecedent(&a);
                rule.set_wracc(v);
                rule
            })
            .collect()
    }

    fn feature_indices(rules: &[Rule]) -> Vec<usize> {
        rules.iter()
            .map(|r| r.antecedents()[0].feature_index())
            .collect()
    }

    #[test]
    fn trim_removes_first_minimum() {
        let data = dataset("A,T\nx,Yes\n");
        let beam = BeamSearchBuilder::new(&data)
            .max_candidates(3)
            .build()
            .unwrap();

        let mut candidates = scored(&[0.1, 0.0, 0.0, 0.2]);
        beam.trim(&mut candidates);
        assert_eq!(feature_indices(&candidates), vec![0, 2, 3]);

        let beam = BeamSearchBuilder::new(&data)
            .max_candidates(2)
            .build()
            .unwrap();
        let mut candidates = scored(&[0.1, 0.0, 0.0, 0.2]);
        beam.trim(&mut candidates);
        assert_eq!(feature_indices(&candidates), vec![0, 3]);
    }

    #[test]
    fn trim_keeps_small_rounds() {
        let data = dataset("A,T\nx,Yes\n");
        let beam = BeamSearchBuilder::new(&data)
            .max_candidates(5)
            .build()
            .unwrap();
        let mut candidates = scored(&[-0.1, 0.0]);
        beam.trim(&mut candidates);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn zero_beam_width_is_rejected() {
        let data = dataset("A,T\nx,Yes\n");
        let err = BeamSearchBuilder::new(&data)
            .max_candidates(0)
            .build()
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn dedup_drops_later_copies() {
        let a = Arc::new(Antecedent::new(0, "A", 0, "x"));
        let b = Arc::new(Antecedent::new(1, "B", 0, "p"));
        let ab = Rule::from_antecedent(&a).specialize(&b);
        let ba = Rule::from_antecedent(&b).specialize(&a);
        let mut candidates = vec![ab, ba, Rule::from_antecedent(&a)];
        BeamSearch::dedup(&mut candidates);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].to_string(), "A = x AND B = p");
    }

    /// Runs the search and collects the beam of each round.
    fn beams(
        data: &Dataset,
        max_candidates: usize,
        dedup: bool,
    ) -> (Option<Rule>, Vec<Vec<Rule>>)
    {
        let beam = BeamSearchBuilder::new(data)
            .max_candidates(max_candidates)
            .dedup_candidates(dedup)
            .build()
            .unwrap();
        let positive = data.positive_class("Yes").unwrap();
        let weights = Weights::uniform(data.shape().0);

        let mut rounds = Vec::new();
        let best = beam.search(&positive, &weights, &RuleList::new(), |b| {
            rounds.push(b.to_vec());
        });
        (best, rounds)
    }

    #[test]
    fn duplicates_stay_in_the_beam_by_default() {
        let data = dataset("A,B,T\nx,p,Yes\nx,q,No\ny,p,No\ny,q,Yes\n");

        let (best, rounds) = beams(&data, 10, false);
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].len(), 4);
        // `A = x AND B = p` and `B = p AND A = x` are both kept.
        let second = &rounds[1];
        assert_eq!(second.len(), 8);
        let n_pairs = (0..8)
            .flat_map(|i| (i+1..8).map(move |j| (i, j)))
            .filter(|&(i, j)| second[i].same_antecedents(&second[j]))
            .count();
        assert_eq!(n_pairs, 4);

        let (dedup_best, rounds) = beams(&data, 10, true);
        assert_eq!(rounds.len(), 2);
        let second = &rounds[1];
        assert_eq!(second.len(), 4);
        assert!(
            (0..4).all(|i| {
                (i+1..4).all(|j| !second[i].same_antecedents(&second[j]))
            })
        );

        let (best, dedup_best) = (best.unwrap(), dedup_best.unwrap());
        assert!(best.same_antecedents(&dedup_best));
        assert_eq!(best.wracc(), dedup_best.wracc());
    }

    #[test]
    fn beam_never_exceeds_its_width() {
        let levels = ["a", "b", "c"];
        let mut csv = String::from("F1,F2,F3,F4,T\n");
        for i in 0..12 {
            let label = if i % 2 == 0 { "Yes" } else { "No" };
            csv.push_str(&format!(
                "{},{},{},{},{label}\n",
                levels[i % 3],
                levels[(i / 3) % 3],
                levels[(2 * i + 1) % 3],
                levels[(i / 2) % 3],
            ));
        }
        let data = dataset(&csv);

        for width in [1, 2, 3] {
            let (best, rounds) = beams(&data, width, false);
            assert!(best.is_some());
            // One round per rule length, up to four antecedents.
            assert_eq!(rounds.len(), 4);
            for (k, beam) in rounds.iter().enumerate() {
                assert_eq!(beam.len(), width);
                assert!(beam.iter().all(|rule| rule.len() == k + 1));
            }
        }
    }

    #[test]
    fn no_selector_no_rule() {
        let data = dataset("fare,T\n1.5,Yes\n2.5,No\n");
        let beam = BeamSearchBuilder::new(&data).build().unwrap();
        let positive = data.positive_class("Yes").unwrap();
        let weights = Weights::uniform(2);
        assert!(beam.produce(&positive, &weights, &RuleList::new()).is_none());
    }
}
