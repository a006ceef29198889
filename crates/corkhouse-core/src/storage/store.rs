//! Persistence gateway for the contribution log and the estimate text.
//!
//! Loading never fails: anything missing or unreadable comes back empty and
//! is logged. Saving reports errors, and the session decides to log and
//! carry on.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, StoreError};
use crate::estimate::EstimateMessage;
use crate::log::{Contribution, ContributionLog};

use super::data_dir;

const CORKS_FILE: &str = "corks.json";
const ESTIMATE_FILE: &str = "estimate.txt";

/// What a store hands back at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub log: ContributionLog,
    /// Last estimate text, if one was showing.
    pub estimate: Option<String>,
}

/// Durable home for session state.
pub trait Store {
    /// Read persisted state, falling back to empty defaults.
    fn load(&self) -> PersistedState;

    /// Replace persisted state with `log` and the estimate text.
    fn save(&mut self, log: &ContributionLog, estimate: &EstimateMessage) -> Result<(), StoreError>;

    /// Remove all persisted state.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Two files in one directory: `corks.json` and `estimate.txt`.
///
/// The files are independent, so a corrupt log does not cost the estimate
/// text and vice versa.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open the store in [`data_dir()`].
    pub fn open() -> Result<Self, ConfigError> {
        Ok(Self::at(data_dir()?))
    }

    /// Store rooted at `dir`. The directory is created on first save.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn corks_path(&self) -> PathBuf {
        self.dir.join(CORKS_FILE)
    }

    fn estimate_path(&self) -> PathBuf {
        self.dir.join(ESTIMATE_FILE)
    }

    fn read_optional(path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read stored state");
                None
            }
        }
    }

    fn load_log(&self) -> ContributionLog {
        let path = self.corks_path();
        let Some(content) = Self::read_optional(&path) else {
            return ContributionLog::new();
        };
        match serde_json::from_str::<Vec<Contribution>>(&content) {
            Ok(entries) => ContributionLog::from_entries(entries),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "stored corks are malformed, starting empty");
                ContributionLog::new()
            }
        }
    }

    fn write_atomic(path: &Path, content: &[u8]) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, path).map_err(write_err)?;
        Ok(())
    }

    fn remove_if_present(path: &Path) -> Result<(), StoreError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> PersistedState {
        let estimate = Self::read_optional(&self.estimate_path())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        PersistedState {
            log: self.load_log(),
            estimate,
        }
    }

    /// The estimate is written before the log, so a save that fails
    /// halfway never leaves a newer log next to an older estimate.
    fn save(&mut self, log: &ContributionLog, estimate: &EstimateMessage) -> Result<(), StoreError> {
        let json = serde_json::to_vec(log)?;
        Self::write_atomic(&self.estimate_path(), estimate.text().unwrap_or_default().as_bytes())?;
        Self::write_atomic(&self.corks_path(), &json)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        Self::remove_if_present(&self.corks_path())?;
        Self::remove_if_present(&self.estimate_path())?;
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: PersistedState,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `state`.
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Store whose saves and clears always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// What a fresh load would return.
    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    /// Number of successful saves and clears.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Store for MemoryStore {
    fn load(&self) -> PersistedState {
        self.state.clone()
    }

    fn save(&mut self, log: &ContributionLog, estimate: &EstimateMessage) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("memory store is read-only".into()));
        }
        self.state = PersistedState {
            log: log.clone(),
            estimate: estimate.text().map(str::to_owned),
        };
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("memory store is read-only".into()));
        }
        self.state = PersistedState::default();
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributor::Contributor;
    use crate::estimate::{HumanDuration, Locale, Projection};
    use tempfile::TempDir;

    fn sample() -> (ContributionLog, EstimateMessage) {
        let mut log = ContributionLog::new();
        log.append(Contributor::Markus, 2, 1_000);
        log.append(Contributor::Diana, 1, 500);
        let mut estimate = EstimateMessage::default();
        estimate.apply(Projection::Projected(HumanDuration::Hours(5)), Locale::English);
        (log, estimate)
    }

    #[test]
    fn missing_files_load_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::at(dir.path().join("never-created"));
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::at(dir.path());
        let (log, estimate) = sample();

        store.save(&log, &estimate).unwrap();
        let loaded = store.load();

        assert_eq!(loaded.log, log);
        assert_eq!(loaded.estimate.as_deref(), estimate.text());
    }

    #[test]
    fn corrupt_log_keeps_estimate() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::at(dir.path());
        let (log, estimate) = sample();
        store.save(&log, &estimate).unwrap();
        std::fs::write(dir.path().join(CORKS_FILE), "{not json").unwrap();

        let loaded = store.load();
        assert!(loaded.log.is_empty());
        assert_eq!(loaded.estimate.as_deref(), estimate.text());
    }

    #[test]
    fn estimate_is_written_before_log() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(CORKS_FILE)).unwrap();
        let mut store = JsonFileStore::at(dir.path());
        let (log, estimate) = sample();

        assert!(matches!(store.save(&log, &estimate), Err(StoreError::Write { .. })));
        let text = std::fs::read_to_string(dir.path().join(ESTIMATE_FILE)).unwrap();
        assert_eq!(Some(text.as_str()), estimate.text());
    }

    #[test]
    fn empty_estimate_file_is_none() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::at(dir.path());
        store.save(&ContributionLog::new(), &EstimateMessage::default()).unwrap();

        assert_eq!(store.load().estimate, None);
    }

    #[test]
    fn reads_legacy_export() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CORKS_FILE),
            r#"[{"user":"Diana","id":"Diana-1718000000000-0","timestamp":1718000000000}]"#,
        )
        .unwrap();

        let loaded = JsonFileStore::at(dir.path()).load();
        assert_eq!(loaded.log.len(), 1);
        assert_eq!(loaded.log.entries()[0].contributor, Contributor::Diana);
    }

    #[test]
    fn clear_removes_files_and_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::at(dir.path());
        let (log, estimate) = sample();
        store.save(&log, &estimate).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!dir.path().join(CORKS_FILE).exists());
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn failing_memory_store_reports_errors() {
        let mut store = MemoryStore::failing();
        let (log, estimate) = sample();
        assert!(store.save(&log, &estimate).is_err());
        assert!(store.clear().is_err());
        assert_eq!(store.writes(), 0);
    }
}
