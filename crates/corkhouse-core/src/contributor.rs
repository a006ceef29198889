use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the two people collecting corks.
///
/// The set is closed: adding a third collector means adding a variant here
/// and a column wherever scores are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Contributor {
    Markus,
    Diana,
}

impl Contributor {
    /// Every contributor, in display order.
    pub const ALL: [Contributor; 2] = [Contributor::Markus, Contributor::Diana];

    pub fn name(self) -> &'static str {
        match self {
            Contributor::Markus => "Markus",
            Contributor::Diana => "Diana",
        }
    }

    /// Badge letter shown on a cork.
    pub fn initial(self) -> char {
        match self {
            Contributor::Markus => 'M',
            Contributor::Diana => 'D',
        }
    }
}

impl fmt::Display for Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Contributor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Contributor::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownContributor(wanted.to_string()))
    }
}
