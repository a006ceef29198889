use chrono::{DateTime, Local};
use corkhouse_core::error::Result;
use corkhouse_core::Config;

use super::open_session;

pub fn run(json: bool) -> Result<()> {
    let config = Config::load()?;
    let session = open_session(&config, None)?;
    let log = session.log();

    if json {
        println!("{}", serde_json::to_string_pretty(log)?);
        return Ok(());
    }

    if log.is_empty() {
        println!("No corks yet.");
        return Ok(());
    }
    for entry in log.entries() {
        let when = DateTime::from_timestamp_millis(entry.occurred_at)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| entry.occurred_at.to_string());
        println!("{when}  {:<7} {}", entry.contributor, entry.sequence_id);
    }
    Ok(())
}
