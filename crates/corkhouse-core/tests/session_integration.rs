//! Integration tests for a session backed by the JSON file store.

use corkhouse_core::{
    recompute, Contributor, ContributionLog, Event, HumanDuration, JsonFileStore, Locale,
    MemoryStore, PersistedState, Projection, Session, SessionSettings, Store,
};
use tempfile::TempDir;

fn settings(goal: u32) -> SessionSettings {
    SessionSettings {
        goal,
        ..SessionSettings::default()
    }
}

#[test]
fn test_progress_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut first = Session::open(JsonFileStore::at(dir.path()), settings(130));
    first.select(Contributor::Markus);
    first.add_corks_at(3, 1_000);
    first.select(Contributor::Diana);
    first.add_corks_at(2, 3_600_000);
    let log_before = first.log().clone();
    let estimate_before = first.estimate().text().map(str::to_owned);
    assert!(estimate_before.is_some());
    drop(first);

    let second = Session::open(JsonFileStore::at(dir.path()), settings(130));
    assert_eq!(*second.log(), log_before);
    assert_eq!(second.estimate().text().map(str::to_owned), estimate_before);
    assert_eq!(second.active(), None, "active contributor is not persisted");
    assert_eq!(second.score_for(Contributor::Markus), 3);
    assert_eq!(second.score_for(Contributor::Diana), 2);
}

#[test]
fn test_restored_estimate_is_kept_while_window_is_too_short() {
    // Estimate text restored from disk, log of five corks all at t=0.
    let mut log = ContributionLog::new();
    log.append(Contributor::Diana, 5, 0);
    let store = MemoryStore::with_state(PersistedState {
        log,
        estimate: Some("previous estimate".into()),
    });

    let mut session = Session::open(store, settings(130));
    assert_eq!(recompute(session.log(), 130), Projection::Retain);

    session.select(Contributor::Markus);
    session.add_corks_at(1, 500);
    assert_eq!(session.estimate().text(), Some("previous estimate"));
    assert_eq!(session.estimate().version(), 0);
}

#[test]
fn test_three_corks_in_one_second_projects_under_a_minute() {
    let mut session = Session::open(MemoryStore::new(), settings(9));
    session.select(Contributor::Markus);
    session.add_corks_at(1, 0);
    session.add_corks_at(1, 500);
    session.add_corks_at(1, 1_000);

    assert_eq!(
        recompute(session.log(), 9),
        Projection::Projected(HumanDuration::UnderAMinute)
    );
    assert_eq!(
        session.estimate().text(),
        Some("At this pace the birdhouse is finished in less than a minute!")
    );
}

#[test]
fn test_german_messages() {
    let settings = SessionSettings {
        goal: 130,
        locale: Locale::German,
        admin: Contributor::Markus,
    };
    let mut session = Session::open(MemoryStore::new(), settings);
    session.select(Contributor::Diana);
    session.add_corks_at(1, 0);
    session.add_corks_at(1, 86_400_000);

    assert_eq!(
        session.estimate().text(),
        Some("Bei diesem Tempo ist das Haus in ca. 128 Tagen fertig!")
    );
}

#[test]
fn test_reset_clears_disk_and_memory() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(JsonFileStore::at(dir.path()), settings(130));
    session.select(Contributor::Markus);
    session.add_corks_at(4, 0);
    session.add_corks_at(4, 120_000);
    assert!(session.estimate().text().is_some());

    let event = session.reset();
    assert!(matches!(event, Some(Event::ProgressReset { by: Contributor::Markus, discarded: 8, .. })));
    assert_eq!(session.total(), 0);
    assert!(session.estimate().is_empty());

    let reloaded = JsonFileStore::at(dir.path()).load();
    assert_eq!(reloaded, PersistedState::default());
}

#[test]
fn test_failed_writes_do_not_block_progress() {
    let mut session = Session::open(MemoryStore::failing(), settings(130));
    session.select(Contributor::Diana);

    assert!(session.add_corks_at(2, 0).is_some());
    assert!(session.add_corks_at(2, 10_000).is_some());
    assert_eq!(session.total(), 4);
    assert!(session.estimate().text().is_some());

    session.select(Contributor::Markus);
    assert!(session.reset().is_some());
    assert_eq!(session.total(), 0);
}

#[test]
fn test_corrupt_store_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("corks.json"), "[{\"user\": \"Nobody\"}]").unwrap();

    let session = Session::open(JsonFileStore::at(dir.path()), settings(130));
    assert_eq!(session.total(), 0);
    assert!(session.estimate().is_empty());
}

#[test]
fn test_view_tracks_house_stages() {
    let mut session = Session::open(MemoryStore::new(), settings(10));
    session.select(Contributor::Markus);
    session.add_corks_at(6, 0);

    let view = session.view();
    assert_eq!(view.stages.walls, 1.0);
    assert_eq!(view.stages.roof, 0.0);
    assert!(!view.goal_reached);

    session.add_corks_at(4, 1_000);
    let view = session.view();
    assert!(view.goal_reached);
    assert_eq!(view.stages.perch, 1.0);
    assert_eq!(view.estimate, None);
}
