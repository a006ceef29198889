//! Session state and the handlers that mutate it.
//!
//! A [`Session`] owns everything a running counter needs: the contribution
//! log, the cached estimate, who is currently collecting and the store it
//! writes through to. Handlers run to completion one at a time; each
//! mutation is persisted right after it is applied, and persistence
//! failures are logged rather than returned.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = Session::open(JsonFileStore::open()?, config.settings());
//! session.select(Contributor::Diana);
//! session.add_corks(6);
//! println!("{:?}", session.estimate().text());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contributor::Contributor;
use crate::estimate::{recompute, EstimateMessage, Locale};
use crate::events::Event;
use crate::log::{now_ms, ContributionLog};
use crate::score::{self, Scoreboard};
use crate::storage::{PersistedState, Store};
use crate::view::ProgressView;

/// Fixed parameters a session runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub goal: u32,
    pub locale: Locale,
    /// Only this contributor may reset progress.
    pub admin: Contributor,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            goal: 130,
            locale: Locale::English,
            admin: Contributor::Markus,
        }
    }
}

pub struct Session<S: Store> {
    settings: SessionSettings,
    log: ContributionLog,
    estimate: EstimateMessage,
    active: Option<Contributor>,
    store: S,
}

impl<S: Store> Session<S> {
    /// Restore a session from `store`. Missing or unreadable state starts
    /// an empty session.
    pub fn open(store: S, settings: SessionSettings) -> Self {
        let PersistedState { log, estimate } = store.load();
        tracing::debug!(
            corks = log.len(),
            has_estimate = estimate.is_some(),
            goal = settings.goal,
            "session restored"
        );
        Self {
            settings,
            log,
            estimate: EstimateMessage::restored(estimate),
            active: None,
            store,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn goal(&self) -> u32 {
        self.settings.goal
    }

    pub fn log(&self) -> &ContributionLog {
        &self.log
    }

    pub fn estimate(&self) -> &EstimateMessage {
        &self.estimate
    }

    pub fn active(&self) -> Option<Contributor> {
        self.active
    }

    pub fn total(&self) -> usize {
        score::total_count(&self.log)
    }

    pub fn score_for(&self, contributor: Contributor) -> usize {
        score::score_for(&self.log, contributor)
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::tally(&self.log)
    }

    pub fn is_goal_reached(&self) -> bool {
        score::is_goal_reached(&self.log, self.settings.goal)
    }

    /// Snapshot for renderers.
    pub fn view(&self) -> ProgressView {
        ProgressView::build(&self.log, &self.estimate, self.settings.goal)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn select(&mut self, contributor: Contributor) -> Event {
        self.active = Some(contributor);
        Event::ContributorSelected {
            contributor,
            at: Utc::now(),
        }
    }

    /// Returns `None` when nobody was selected.
    pub fn deselect(&mut self) -> Option<Event> {
        self.active.take()?;
        Some(Event::ContributorDeselected { at: Utc::now() })
    }

    /// Add `count` corks for the active contributor, captured now.
    pub fn add_corks(&mut self, count: i64) -> Option<Event> {
        self.add_corks_at(count, now_ms())
    }

    /// Add `count` corks for the active contributor, captured at `now_ms`.
    ///
    /// Without an active contributor, or with `count <= 0`, nothing happens
    /// and `None` is returned.
    pub fn add_corks_at(&mut self, count: i64, now_ms: i64) -> Option<Event> {
        let Some(contributor) = self.active else {
            tracing::debug!(count, "ignoring corks: no active contributor");
            return None;
        };
        if count <= 0 {
            tracing::debug!(count, %contributor, "ignoring non-positive cork count");
            return None;
        }

        let was_reached = self.is_goal_reached();
        let before = self.log.len();
        let entries = self.log.append(contributor, count, now_ms);
        let added = entries.len() - before;
        let captured_at = entries.last().map_or(now_ms, |e| e.occurred_at);
        let projection = recompute(&self.log, self.settings.goal);
        let fresh = self.estimate.apply(projection, self.settings.locale);
        tracing::debug!(%contributor, added, total = self.log.len(), ?projection, "corks added");

        self.persist();

        Some(Event::CorksAdded {
            contributor,
            count: added as u64,
            total: self.log.len(),
            estimate_version: fresh.then(|| self.estimate.version()),
            goal_reached: !was_reached && self.is_goal_reached(),
            at: DateTime::from_timestamp_millis(captured_at).unwrap_or_else(Utc::now),
        })
    }

    /// Wipe the log, the estimate and persisted state.
    ///
    /// Only the configured admin may do this; for anyone else (or nobody)
    /// it is a no-op returning `None`. Asking for confirmation is the
    /// caller's job.
    pub fn reset(&mut self) -> Option<Event> {
        let by = self.active?;
        if by != self.settings.admin {
            tracing::warn!(%by, admin = %self.settings.admin, "reset refused: not the admin");
            return None;
        }

        let discarded = self.log.len();
        self.log.clear();
        self.estimate.clear();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "could not clear stored progress");
        }
        tracing::info!(%by, discarded, "progress reset");

        Some(Event::ProgressReset {
            by,
            discarded,
            at: Utc::now(),
        })
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.log, &self.estimate) {
            tracing::warn!(error = %e, "could not persist progress");
        }
    }
}
