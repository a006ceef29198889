use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contributor::Contributor;

/// Every session state change produces an Event.
/// Renderers use them to decide what to animate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ContributorSelected {
        contributor: Contributor,
        at: DateTime<Utc>,
    },
    ContributorDeselected {
        at: DateTime<Utc>,
    },
    CorksAdded {
        contributor: Contributor,
        count: u64,
        total: usize,
        /// Set when this batch produced a fresh estimate.
        estimate_version: Option<u64>,
        /// Set when this batch crossed the goal.
        goal_reached: bool,
        at: DateTime<Utc>,
    },
    ProgressReset {
        by: Contributor,
        discarded: usize,
        at: DateTime<Utc>,
    },
}
