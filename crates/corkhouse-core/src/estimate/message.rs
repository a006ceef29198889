use serde::{Deserialize, Serialize};

use super::humanize::Locale;
use super::rate::Projection;

/// Cached estimate text plus a change token.
///
/// `version` only ever grows; it moves on every fresh projection even when
/// the text comes out identical, so a renderer can tell "recomputed" from
/// "unchanged". Only `text` is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateMessage {
    text: Option<String>,
    #[serde(default)]
    version: u64,
}

impl EstimateMessage {
    /// Restore persisted text. Empty text means no estimate.
    pub fn restored(text: Option<String>) -> Self {
        Self {
            text: text.filter(|t| !t.trim().is_empty()),
            version: 0,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }

    /// Fold a projection into the cached message.
    ///
    /// Returns `true` when a new estimate was produced.
    pub fn apply(&mut self, projection: Projection, locale: Locale) -> bool {
        match projection {
            Projection::Clear => {
                self.text = None;
                false
            }
            Projection::Retain => false,
            Projection::Projected(remaining) => {
                self.text = Some(remaining.message(locale));
                self.version += 1;
                true
            }
        }
    }

    /// Forget the text. The version keeps counting so a later estimate
    /// still registers as new.
    pub fn clear(&mut self) {
        self.text = None;
    }
}
