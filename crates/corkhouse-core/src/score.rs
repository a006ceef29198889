//! Score aggregation over the contribution log.
//!
//! Everything here is a pure function of the log contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::contributor::Contributor;
use crate::log::ContributionLog;

pub fn total_count(log: &ContributionLog) -> usize {
    log.len()
}

pub fn score_for(log: &ContributionLog, contributor: Contributor) -> usize {
    log.entries()
        .iter()
        .filter(|e| e.contributor == contributor)
        .count()
}

pub fn is_goal_reached(log: &ContributionLog, goal: u32) -> bool {
    total_count(log) >= goal as usize
}

/// 0.0 ..= 1.0 share of the goal collected so far.
pub fn progress_fraction(log: &ContributionLog, goal: u32) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (total_count(log) as f64 / goal as f64).min(1.0)
}

/// Per-contributor totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub scores: BTreeMap<Contributor, usize>,
    pub total: usize,
}

impl Scoreboard {
    /// Count the log in a single pass. Every contributor gets an entry,
    /// including those with zero corks.
    pub fn tally(log: &ContributionLog) -> Self {
        let mut scores: BTreeMap<Contributor, usize> =
            Contributor::ALL.into_iter().map(|c| (c, 0)).collect();
        for entry in log.entries() {
            *scores.entry(entry.contributor).or_default() += 1;
        }
        Self {
            scores,
            total: total_count(log),
        }
    }

    pub fn get(&self, contributor: Contributor) -> usize {
        self.scores.get(&contributor).copied().unwrap_or(0)
    }

    /// Contributor with the most corks, `None` on a tie.
    pub fn leader(&self) -> Option<Contributor> {
        let mut ranked: Vec<(Contributor, usize)> =
            self.scores.iter().map(|(c, n)| (*c, *n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        match ranked.as_slice() {
            [(first, a), (_, b), ..] if a > b => Some(*first),
            [(only, _)] => Some(*only),
            _ => None,
        }
    }
}
