use corkhouse_core::error::Result;
use corkhouse_core::{Config, Contributor, Event, ValidationError, MAX_BATCH};

use super::{open_session, progress_line};

pub fn run(who: Option<Contributor>, count: i64) -> Result<()> {
    let who = who.ok_or(ValidationError::NoContributor)?;
    if count > MAX_BATCH {
        return Err(ValidationError::BatchTooLarge {
            count,
            max: MAX_BATCH,
        }
        .into());
    }
    let config = Config::load()?;
    let mut session = open_session(&config, Some(who))?;

    match session.add_corks(count) {
        Some(Event::CorksAdded {
            count, goal_reached, ..
        }) => {
            println!("{who} added {count} cork{}.", if count == 1 { "" } else { "s" });
            println!("{}", progress_line(&session));
            if goal_reached {
                println!("The birdhouse is finished!");
            } else if let Some(text) = session.estimate().text() {
                println!("{text}");
            }
        }
        _ => eprintln!("nothing added: the cork count must be positive"),
    }
    Ok(())
}
