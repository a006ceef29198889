pub mod add;
pub mod config;
pub mod house;
pub mod log;
pub mod reset;
pub mod status;

use corkhouse_core::error::Result;
use corkhouse_core::{Config, Contributor, JsonFileStore, Session};

/// Open the session stored in the data directory, with `active` selected.
pub fn open_session(
    config: &Config,
    active: Option<Contributor>,
) -> Result<Session<JsonFileStore>> {
    let store = JsonFileStore::open()?;
    tracing::debug!(dir = %store.dir().display(), "opening session");
    let mut session = Session::open(store, config.settings());
    if let Some(contributor) = active {
        session.select(contributor);
    }
    Ok(session)
}

/// One-line progress summary, e.g. `45 / 130 corks (34.6%)`.
pub fn progress_line(session: &Session<JsonFileStore>) -> String {
    let view = session.view();
    format!("{} / {} corks ({:.1}%)", view.total, view.goal, view.percent)
}
