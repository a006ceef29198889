use corkhouse_core::error::Result;
use corkhouse_core::{Config, Contributor};
use serde::Serialize;

use super::{open_session, progress_line};

#[derive(Serialize)]
struct StatusReport {
    active: Option<Contributor>,
    #[serde(flatten)]
    progress: corkhouse_core::ProgressView,
}

pub fn run(who: Option<Contributor>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let session = open_session(&config, who)?;
    let view = session.view();

    if json {
        let report = StatusReport {
            active: session.active(),
            progress: view,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(active) = session.active() {
        println!("Hello, {active}!");
    }
    println!("Progress: {}", progress_line(&session));
    println!("Scores:");
    for line in &view.scores {
        println!("  {:<8} {} corks", format!("{}:", line.contributor), line.corks);
    }
    if view.total > 0 {
        match session.scoreboard().leader() {
            Some(leader) => println!("Leading: {leader}"),
            None => println!("Leading: tied"),
        }
    }
    if view.goal_reached {
        println!("The birdhouse is finished!");
    } else if let Some(text) = &view.estimate {
        println!("{text}");
    }
    Ok(())
}
