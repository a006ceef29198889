//! # Corkhouse Core Library
//!
//! Two people collect wine corks toward a shared goal; once enough are in,
//! the birdhouse is finished. This library holds the bookkeeping behind
//! that: who added which cork when, how far along the house is, and how
//! long it will take at the current pace. The `corkhouse` CLI is a thin
//! layer over it.
//!
//! ## Architecture
//!
//! - **Contribution Log**: append-only record of timestamped corks
//! - **Scores**: per-contributor totals, pure functions of the log
//! - **Estimate**: rate-based completion projection with a change token
//! - **Storage**: JSON file persistence and TOML configuration
//! - **View**: progress snapshot and cork layout for renderers
//!
//! ## Key Components
//!
//! - [`Session`]: State object that owns the log and estimate and writes
//!   through to a [`Store`]
//! - [`ContributionLog`]: The ordered cork record
//! - [`recompute`]: The rate estimator
//! - [`Config`]: Application configuration management

pub mod contributor;
pub mod error;
pub mod estimate;
pub mod events;
pub mod log;
pub mod score;
pub mod session;
pub mod storage;
pub mod view;

pub use contributor::Contributor;
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use estimate::{recompute, EstimateMessage, HumanDuration, Locale, Projection};
pub use events::Event;
pub use log::{Contribution, ContributionLog, MAX_BATCH};
pub use score::{is_goal_reached, score_for, total_count, Scoreboard};
pub use session::{Session, SessionSettings};
pub use storage::{Config, JsonFileStore, MemoryStore, PersistedState, Store};
pub use view::{cork_layout, placed_corks, CorkSlot, HouseStages, ProgressView, ScoreLine};
