//! Text rendering of the birdhouse.
//!
//! Cork slots fill row by row from the bottom of the wall, nine to a row,
//! each shown by its collector's initial.

use std::collections::HashMap;

use corkhouse_core::error::Result;
use corkhouse_core::{cork_layout, placed_corks, Config, ContributionLog, HouseStages, ProgressView};

use super::open_session;

const COLUMNS: usize = 9;
const BAR_WIDTH: usize = 20;

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn stage_lines(stages: &HouseStages) -> Vec<String> {
    [("Walls", stages.walls), ("Roof", stages.roof), ("Perch", stages.perch)]
        .into_iter()
        .map(|(name, done)| format!("{name:<6} {} {:>3.0}%", bar(done), done * 100.0))
        .collect()
}

fn wall(log: &ContributionLog, goal: u32, seed: u32) -> Vec<String> {
    let layout = cork_layout(goal, u64::from(seed));
    let initials: HashMap<usize, char> = placed_corks(log, &layout)
        .into_iter()
        .map(|(cork, slot)| (slot.index, cork.contributor.initial()))
        .collect();

    let rows = layout.len().div_ceil(COLUMNS);
    (0..rows)
        .rev()
        .map(|row| {
            let cells: Vec<String> = (0..COLUMNS)
                .map(|col| row * COLUMNS + col)
                .filter(|index| *index < layout.len())
                .map(|index| initials.get(&index).copied().unwrap_or('.').to_string())
                .collect();
            format!("|{}|", cells.join(" "))
        })
        .collect()
}

pub fn render(view: &ProgressView, log: &ContributionLog, seed: u32) -> String {
    let mut out = Vec::new();
    if view.stages.roof > 0.0 {
        out.push(format!("{:^19}", "/\\"));
        out.push(format!("{:^19}", "/    \\"));
    }
    out.extend(wall(log, view.goal, seed));
    if view.stages.perch > 0.0 {
        out.push(format!("{:^19}", "-o-"));
    }
    out.push(String::new());
    out.extend(stage_lines(&view.stages));
    out.push(format!("Total  {} {}/{}", bar(view.fraction), view.total, view.goal));
    if view.goal_reached {
        out.push("The birdhouse is finished!".into());
    }
    out.join("\n")
}

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let session = open_session(&config, None)?;
    println!("{}", render(&session.view(), session.log(), config.house.layout_seed));
    Ok(())
}
