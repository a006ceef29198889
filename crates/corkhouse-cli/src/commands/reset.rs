use corkhouse_core::error::Result;
use corkhouse_core::{Config, Contributor, Event, ValidationError};

use super::open_session;

pub fn run(who: Option<Contributor>, yes: bool) -> Result<()> {
    let config = Config::load()?;
    let admin = config.session.admin;
    let who = who.ok_or(ValidationError::NoContributor)?;
    if who != admin {
        return Err(ValidationError::NotAdmin { admin }.into());
    }
    if !yes {
        return Err(ValidationError::ResetNotConfirmed.into());
    }

    let mut session = open_session(&config, Some(who))?;
    match session.reset() {
        Some(Event::ProgressReset { discarded, .. }) => {
            println!("Progress reset ({discarded} corks discarded).");
            Ok(())
        }
        _ => Err(ValidationError::NotAdmin { admin }.into()),
    }
}
