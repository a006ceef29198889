//! Read-only view model for renderers.
//!
//! The birdhouse builds itself in three stages driven by overall progress:
//! walls over the first 60 %, the roof from 60 % to 90 %, and the perch over
//! the last 10 %. Corks sit in a grid on the front wall with a little jitter
//! so they look hand-placed; the jitter comes from a seeded generator so the
//! same seed always gives the same wall.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::contributor::Contributor;
use crate::estimate::EstimateMessage;
use crate::log::{Contribution, ContributionLog};
use crate::score::{self, Scoreboard};

const WALLS_END: f64 = 0.6;
const ROOF_END: f64 = 0.9;

/// Cork diameter as a percentage of the wall width.
const CORK_DIAMETER_PCT: f64 = 11.0;
const WALL_WIDTH_PCT: f64 = 100.0;
const LEFT_MARGIN_PCT: f64 = 5.0;
/// Corks overlap: rows are packed closer than one diameter.
const ROW_PACKING: f64 = 1.8;
/// Total jitter span per axis, centred on zero.
const JITTER_PCT: f64 = 3.0;

/// How far each part of the house has been built, each 0.0 ..= 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseStages {
    pub walls: f64,
    pub roof: f64,
    pub perch: f64,
}

impl HouseStages {
    pub fn at(progress: f64) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            walls: (progress / WALLS_END).min(1.0),
            roof: ((progress - WALLS_END).max(0.0) / (ROOF_END - WALLS_END)).min(1.0),
            perch: ((progress - ROOF_END).max(0.0) / (1.0 - ROOF_END)).min(1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub contributor: Contributor,
    pub corks: usize,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressView {
    pub total: usize,
    pub goal: u32,
    /// 0.0 ..= 1.0
    pub fraction: f64,
    /// 0.0 ..= 100.0
    pub percent: f64,
    pub goal_reached: bool,
    pub scores: Vec<ScoreLine>,
    pub estimate: Option<String>,
    /// Change token: a new value means "play the estimate animation".
    pub estimate_version: u64,
    pub stages: HouseStages,
}

impl ProgressView {
    pub fn build(log: &ContributionLog, estimate: &EstimateMessage, goal: u32) -> Self {
        let fraction = score::progress_fraction(log, goal);
        let board = Scoreboard::tally(log);
        Self {
            total: board.total,
            goal,
            fraction,
            percent: fraction * 100.0,
            goal_reached: score::is_goal_reached(log, goal),
            scores: Contributor::ALL
                .into_iter()
                .map(|contributor| ScoreLine {
                    contributor,
                    corks: board.get(contributor),
                })
                .collect(),
            estimate: estimate.text().map(str::to_owned),
            estimate_version: estimate.version(),
            stages: HouseStages::at(fraction),
        }
    }
}

/// Position of one cork on the wall, in percent from the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorkSlot {
    pub index: usize,
    pub left_pct: f64,
    pub bottom_pct: f64,
}

/// Slots for `goal` corks, row by row, jittered from `seed`.
pub fn cork_layout(goal: u32, seed: u64) -> Vec<CorkSlot> {
    let columns = (WALL_WIDTH_PCT / CORK_DIAMETER_PCT).floor() as usize;
    let mut rng = Mcg128Xsl64::seed_from_u64(seed);

    (0..goal as usize)
        .map(|index| {
            let row = index / columns;
            let col = index % columns;
            let x_jitter = (rng.gen::<f64>() - 0.5) * JITTER_PCT;
            let y_jitter = (rng.gen::<f64>() - 0.5) * JITTER_PCT;
            CorkSlot {
                index,
                left_pct: col as f64 * (CORK_DIAMETER_PCT - 1.0) + x_jitter + LEFT_MARGIN_PCT,
                bottom_pct: row as f64 * (CORK_DIAMETER_PCT / ROW_PACKING) + y_jitter,
            }
        })
        .collect()
}

/// Pair corks with slots in log order. Corks beyond the last slot are
/// not placed.
pub fn placed_corks<'a>(
    log: &'a ContributionLog,
    layout: &'a [CorkSlot],
) -> Vec<(&'a Contribution, &'a CorkSlot)> {
    log.entries().iter().zip(layout.iter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{HumanDuration, Locale, Projection};

    #[test]
    fn stages_fill_in_order() {
        let start = HouseStages::at(0.0);
        assert_eq!((start.walls, start.roof, start.perch), (0.0, 0.0, 0.0));

        let half = HouseStages::at(0.3);
        assert!((half.walls - 0.5).abs() < 1e-9);
        assert_eq!(half.roof, 0.0);

        let roofing = HouseStages::at(0.75);
        assert_eq!(roofing.walls, 1.0);
        assert!((roofing.roof - 0.5).abs() < 1e-9);
        assert_eq!(roofing.perch, 0.0);

        let done = HouseStages::at(1.4);
        assert_eq!((done.walls, done.roof, done.perch), (1.0, 1.0, 1.0));
    }

    #[test]
    fn layout_is_reproducible() {
        assert_eq!(cork_layout(130, 7), cork_layout(130, 7));
        assert_ne!(cork_layout(130, 7), cork_layout(130, 8));
    }

    #[test]
    fn layout_grid_with_bounded_jitter() {
        let slots = cork_layout(20, 1);
        assert_eq!(slots.len(), 20);
        // nine columns per row
        let tenth = slots[9];
        assert!(tenth.left_pct >= LEFT_MARGIN_PCT - 1.5 && tenth.left_pct <= LEFT_MARGIN_PCT + 1.5);
        assert!(tenth.bottom_pct >= 11.0 / 1.8 - 1.5 && tenth.bottom_pct <= 11.0 / 1.8 + 1.5);
        assert!(slots.iter().all(|s| s.left_pct < WALL_WIDTH_PCT));
    }

    #[test]
    fn view_reflects_log_and_estimate() {
        let mut log = ContributionLog::new();
        log.append(Contributor::Markus, 3, 0);
        log.append(Contributor::Diana, 1, 2_000);
        let mut estimate = EstimateMessage::default();
        estimate.apply(Projection::Projected(HumanDuration::Minutes(2)), Locale::English);

        let view = ProgressView::build(&log, &estimate, 8);
        assert_eq!(view.total, 4);
        assert!((view.percent - 50.0).abs() < 1e-9);
        assert!(!view.goal_reached);
        assert_eq!(view.scores[0], ScoreLine { contributor: Contributor::Markus, corks: 3 });
        assert_eq!(view.scores[1].corks, 1);
        assert_eq!(view.estimate_version, 1);
    }

    #[test]
    fn overflow_corks_are_not_placed() {
        let mut log = ContributionLog::new();
        log.append(Contributor::Diana, 5, 0);
        let layout = cork_layout(3, 0);
        let placed = placed_corks(&log, &layout);
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[2].0.sequence_id, "Diana-0-2");
    }
}
