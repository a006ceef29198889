//! Append-only contribution log.
//!
//! Every cork is its own [`Contribution`]. A batch of `n` corks submitted at
//! once shares one capture timestamp and is told apart by an index suffix on
//! the sequence id (`Markus-1718000000000-0`, `...-1`, ...).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::contributor::Contributor;

/// Largest number of corks a single submission records.
pub const MAX_BATCH: i64 = 10_000;

/// One recorded cork.
///
/// Field names on disk (`user`, `id`, `timestamp`) match the browser
/// version's local-storage export so old data can be imported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    #[serde(rename = "user")]
    pub contributor: Contributor,
    #[serde(rename = "id")]
    pub sequence_id: String,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub occurred_at: i64,
}

impl Contribution {
    fn new(contributor: Contributor, occurred_at: i64, index: u64) -> Self {
        Self {
            contributor,
            sequence_id: format!("{contributor}-{occurred_at}-{index}"),
            occurred_at,
        }
    }
}

/// Insertion-ordered sequence of contributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributionLog {
    entries: Vec<Contribution>,
}

impl ContributionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from previously persisted entries, keeping their order.
    pub fn from_entries(entries: Vec<Contribution>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Contribution] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `count` corks for `contributor`, all captured at `now_ms`.
    ///
    /// Non-positive counts are ignored and counts above [`MAX_BATCH`] are
    /// capped. If the batch's ids would clash with ids already in the log
    /// (same contributor, same millisecond), the capture time moves forward
    /// one millisecond at a time until they don't. Returns the full log
    /// after the append.
    pub fn append(&mut self, contributor: Contributor, count: i64, now_ms: i64) -> &[Contribution] {
        if count <= 0 {
            return &self.entries;
        }
        if count > MAX_BATCH {
            tracing::warn!(count, max = MAX_BATCH, "cork batch capped");
        }
        let count = count.min(MAX_BATCH) as u64;

        // Ids only clash when contributor and timestamp both match.
        let taken: HashSet<i64> = self
            .entries
            .iter()
            .filter(|e| e.contributor == contributor)
            .map(|e| e.occurred_at)
            .collect();
        let mut captured_at = now_ms;
        while taken.contains(&captured_at) && captured_at < i64::MAX {
            captured_at += 1;
        }

        self.entries.reserve(count as usize);
        for i in 0..count {
            self.entries.push(Contribution::new(contributor, captured_at, i));
        }
        &self.entries
    }

    /// Drop every entry. Only the administrative reset calls this.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries ordered by `occurred_at`; ties keep insertion order.
    pub fn sorted_by_time(&self) -> Vec<&Contribution> {
        let mut sorted: Vec<&Contribution> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.occurred_at);
        sorted
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
