use colored::Colorize;

use crate::{
    RuleList,
    RuleSearch,
    SubgroupError,
    SubgroupLearner,
    Weights,
};

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Instant;
use std::ops::ControlFlow;

const DEFAULT_ROUND: usize = 1;
const DEFAULT_TIMELIMIT_MILLIS: u128 = u128::MAX;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const HEADER: &str = "Round,Rule,WRAcc,AliveRows,PositiveWeight,Time\n";


/// Implementing this trait allows you to use [`Logger`] to
/// log learner's behavior.
pub trait Research {
    /// Returns the rules accepted so far.
    fn current_rules(&self) -> &RuleList;

    /// Returns the current weights on examples.
    fn current_weights(&self) -> &Weights;

    /// Returns the sum of weights over the alive positive examples.
    fn remaining_positive_weight(&self) -> f64;
}


/// Struct `Logger` runs a learner with a searcher,
/// and logs the accepted rule, its WRAcc,
/// the number of alive examples, the remaining positive weight,
/// and the running time for each round.
/// 
/// # Example
/// ```no_run
/// use subgroups::prelude::*;
/// 
/// # let dataset = Dataset::from_csv("titanic.csv", true).unwrap()
/// #     .set_target("Survived").unwrap();
/// let searcher = BeamSearchBuilder::new(&dataset)
///     .max_candidates(5)
///     .build()
///     .unwrap();
/// let learner = Cn2Sd::init(&dataset)
///     .positive_class("Yes");
/// 
/// let rules = Logger::new(learner, searcher)
///     .time_limit_as_secs(60)
///     .run("log.csv")
///     .unwrap();
/// ```
pub struct Logger<L, S> {
    learner: L,
    searcher: S,
    time_limit: u128,
    round: usize,
}


impl<L, S> Logger<L, S> {
    /// Create a new instance of `Logger`.
    pub fn new(learner: L, searcher: S) -> Self {
        Self {
            learner,
            searcher,
            time_limit: DEFAULT_TIMELIMIT_MILLIS,
            round: DEFAULT_ROUND,
        }
    }


    /// Returns the learner.
    pub fn learner(&self) -> &L {
        &self.learner
    }


    /// Decompose `self` into the learner and the searcher.
    pub fn into_inner(self) -> (L, S) {
        (self.learner, self.searcher)
    }
}


impl<L, S> Logger<L, S>
    where L: SubgroupLearner + Research,
          S: RuleSearch,
{
    /// Set the time limit for the learner as milliseconds.
    /// If the learner reaches this limit,
    /// breaks after the current round.
    /// The rules accepted so far are returned.
    #[inline(always)]
    pub fn time_limit_as_millis(mut self, time_limit: u128) -> Self {
        self.time_limit = time_limit;
        self
    }


    /// Set the time limit for the learner as seconds.
    #[inline(always)]
    pub fn time_limit_as_secs(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(1_000_u128);
        self
    }


    /// Set the time limit for the learner as minutes.
    #[inline(always)]
    pub fn time_limit_as_mins(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128)
            .saturating_mul(60_u128)
            .saturating_mul(1_000_u128);
        self
    }


    /// Set the interval to print the current status.
    /// By default, the method `run` prints its status every round.
    /// If you don't want to print the log,
    /// set `usize::MAX`.
    #[inline(always)]
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round.max(1);
        self
    }


    #[inline(always)]
    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "".bold().blue(),
            "ALIVE".bold().green(),
            "POS.".bold().yellow(),
            "ACC.".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "ROUND".bold().red(),
            "WRACC".bold().blue(),
            "ROWS".bold().green(),
            "WEIGHT".bold().yellow(),
            "TIME".bold().cyan(),
        );
    }


    /// print current settings.
    #[inline(always)]
    fn print_stats(&self) {
        let limit = if self.time_limit != u128::MAX {
            time_format(self.time_limit)
        } else {
            "Nothing".into()
        };
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Learner".bold(),
            self.learner.name().bold().green(),
        );
        print_info(self.learner.info());

        println!(
            "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Searcher".bold(),
            self.searcher.name().bold().green(),
        );
        print_info(self.searcher.info());

        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Time Limit".bold(),
            limit.bold().green(),
            "".bold(),
        );
    }


    #[inline(always)]
    fn print_log(&self, iter: usize, wracc: Option<f64>, time: u128) {
        let weights = self.learner.current_weights();
        let wracc = wracc
            .map(|w| format!("{w:>WIDTH$.PREC_WIDTH$}"))
            .unwrap_or_else(|| format!("{:>WIDTH$}", "-"));
        println!(
            "{} {:>WIDTH$}\t\t{}\t{:>WIDTH$}\t{:>WIDTH$.PREC_WIDTH$}\t{:>WIDTH$}",
            "[LOG]".bold().magenta(),
            iter.to_string().red(),
            wracc.blue(),
            weights.n_alive().to_string().green(),
            self.learner.remaining_positive_weight(),
            time_format(time).cyan(),
        );
    }


    /// Run the given learner with logging.
    /// Note that this method is almost the same as
    /// [`SubgroupLearner::run`].
    /// This method measures running time per round, and
    /// writes one CSV line per round to `filename`.
    /// A configuration error is returned before `filename` is created.
    pub fn run<P: AsRef<Path>>(&mut self, filename: P)
        -> Result<RuleList, SubgroupError>
    {
        // ---------------------------------------------------------------------
        // Pre-processing
        self.learner.preprocess()?;

        // Open file
        let mut file = File::create(filename)?;

        // Write header to the file
        file.write_all(HEADER.as_bytes())?;

        if self.round != usize::MAX {
            self.print_stats();
            self.print_log_header();
        }

        // Cumulative time
        let mut time_acc = 0;
        let mut write_error = None;

        // ---------------------------------------------------------------------
        // Learning step
        let _ = (1..).try_for_each(|iter| {
            let n_rules = self.learner.current_rules().len();

            // Start measuring time
            let now = Instant::now();

            let flow = self.learner.step(&self.searcher, iter);

            // Stop measuring and convert `Duration` to Milliseconds.
            let time = now.elapsed().as_millis();

            // Update the cumulative time
            time_acc += time;

            // `None` if the round accepts no rule.
            let rules = self.learner.current_rules();
            let accepted = rules.last()
                .filter(|_| rules.len() > n_rules);
            let (text, wracc) = accepted
                .map(|r| (r.to_string(), Some(r.wracc())))
                .unwrap_or_else(|| ("-".to_string(), None));

            let weights = self.learner.current_weights();
            let line = format!(
                "{iter},\"{text}\",{},{},{},{time_acc}\n",
                wracc.map(|w| w.to_string()).unwrap_or_default(),
                weights.n_alive(),
                self.learner.remaining_positive_weight(),
            );
            if let Err(e) = file.write_all(line.as_bytes()) {
                write_error = Some(e);
                return ControlFlow::Break(iter);
            }

            if iter % self.round == 0 || flow.is_break() {
                self.print_log(iter, wracc, time_acc);
            }

            if time_acc > self.time_limit {
                return ControlFlow::Break(iter);
            }

            flow
        });

        if let Some(e) = write_error {
            return Err(e.into());
        }

        let rules = self.learner.postprocess();

        if self.round != usize::MAX {
            println!("\n{rules}");
        }
        Ok(rules)
    }
}


fn print_info(info: Option<Vec<(&str, String)>>) {
    let Some(info) = info else { return; };
    let line = info.into_iter()
        .map(|(key, val)| {
            format!(
                "    + {:<STAT_WIDTH$}\t{:>width$}",
                key,
                val.bold().yellow(),
                width = STAT_WIDTH - 8
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    println!("{line}");
}


/// Format milliseconds as `hh:mm:ss.mmm`.
fn time_format(millis: u128) -> String {
    let secs = millis / 1_000;
    let (h, m, s) = (secs / 3_600, (secs / 60) % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}.{:03}", millis % 1_000)
}
