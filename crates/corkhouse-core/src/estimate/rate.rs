use serde::{Deserialize, Serialize};

use super::humanize::HumanDuration;
use crate::log::ContributionLog;

/// Shortest observed window (first to last cork) that yields a rate.
pub const MIN_WINDOW_MS: i64 = 1_000;

/// Outcome of one estimate recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "remaining", rename_all = "snake_case")]
pub enum Projection {
    /// No estimate applies: goal met, or fewer than two corks.
    Clear,
    /// Not enough time observed; whatever estimate is shown stays.
    Retain,
    /// Fresh estimate of the time left.
    Projected(HumanDuration),
}

/// Project the time left until `goal` from the rate observed in `log`.
///
/// The rate is `(n - 1) / (last - first)` over the time-sorted log: the
/// number of gaps between corks divided by the observed window. The window
/// must be at least [`MIN_WINDOW_MS`], so the division is always by a
/// positive span.
pub fn recompute(log: &ContributionLog, goal: u32) -> Projection {
    let remaining = goal as i64 - log.len() as i64;
    if remaining <= 0 || log.len() < 2 {
        return Projection::Clear;
    }

    let sorted = log.sorted_by_time();
    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first.occurred_at, last.occurred_at),
        _ => return Projection::Clear,
    };
    let window_ms = last.saturating_sub(first);
    if window_ms < MIN_WINDOW_MS {
        return Projection::Retain;
    }

    let rate = (sorted.len() - 1) as f64 / window_ms as f64;
    let remaining_ms = remaining as f64 / rate;
    tracing::debug!(rate_per_ms = rate, remaining, remaining_ms, "recomputed estimate");

    Projection::Projected(HumanDuration::from_millis(remaining_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributor::Contributor;

    fn log_at(timestamps: &[i64]) -> ContributionLog {
        let mut log = ContributionLog::new();
        for (i, ts) in timestamps.iter().enumerate() {
            let who = if i % 2 == 0 { Contributor::Markus } else { Contributor::Diana };
            log.append(who, 1, *ts);
        }
        log
    }

    #[test]
    fn short_burst_projects_under_a_minute() {
        // 2 gaps over 1000 ms, 6 corks left -> 3000 ms
        let log = log_at(&[0, 500, 1_000]);
        assert_eq!(recompute(&log, 9), Projection::Projected(HumanDuration::UnderAMinute));
    }

    #[test]
    fn single_cork_clears() {
        let log = log_at(&[0]);
        assert_eq!(recompute(&log, 130), Projection::Clear);
        assert_eq!(recompute(&ContributionLog::new(), 130), Projection::Clear);
    }

    #[test]
    fn goal_met_clears() {
        let log = log_at(&[0, 60_000, 120_000]);
        assert_eq!(recompute(&log, 3), Projection::Clear);
        assert_eq!(recompute(&log, 2), Projection::Clear);
    }

    #[test]
    fn same_instant_batch_retains() {
        let mut log = ContributionLog::new();
        log.append(Contributor::Diana, 5, 0);
        assert_eq!(recompute(&log, 130), Projection::Retain);
    }

    #[test]
    fn window_just_under_a_second_retains() {
        let log = log_at(&[0, 999]);
        assert_eq!(recompute(&log, 130), Projection::Retain);
    }

    #[test]
    fn uses_time_order_not_insertion_order() {
        // one cork an hour; 10 left -> 10 hours
        let log = log_at(&[7_200_000, 0, 3_600_000]);
        assert_eq!(recompute(&log, 13), Projection::Projected(HumanDuration::Hours(10)));
    }

    #[test]
    fn slow_pace_projects_days() {
        // one cork a day, 128 left
        let log = log_at(&[0, 86_400_000]);
        assert_eq!(recompute(&log, 130), Projection::Projected(HumanDuration::Days(128)));
    }
}
