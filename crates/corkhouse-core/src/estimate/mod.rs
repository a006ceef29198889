//! Completion-time estimation.
//!
//! [`recompute`] turns the observed contribution rate into a [`Projection`],
//! [`HumanDuration`] buckets the remaining time into coarse phrases and
//! [`EstimateMessage`] caches the rendered text together with a change token
//! that renderers watch to replay their "new estimate" animation.

mod humanize;
mod message;
mod rate;

pub use humanize::{HumanDuration, Locale};
pub use message::EstimateMessage;
pub use rate::{recompute, Projection, MIN_WINDOW_MS};
