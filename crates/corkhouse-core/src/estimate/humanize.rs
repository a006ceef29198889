use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;

/// Remaining time, bucketed the way people say it out loud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "count", rename_all = "snake_case")]
pub enum HumanDuration {
    Days(u64),
    AboutADay,
    Hours(u64),
    AboutAnHour,
    Minutes(u64),
    UnderAMinute,
}

impl HumanDuration {
    /// Bucket a duration in milliseconds.
    ///
    /// Thresholds are strict: more than 1.5 days counts in days, more than
    /// 0.8 days is "a day", then the same pattern for hours, then whole
    /// minutes above one minute. Counts round to the nearest integer.
    pub fn from_millis(ms: f64) -> Self {
        let minutes = ms / MS_PER_MINUTE;
        let hours = ms / MS_PER_HOUR;
        let days = ms / MS_PER_DAY;

        if days > 1.5 {
            HumanDuration::Days(days.round() as u64)
        } else if days > 0.8 {
            HumanDuration::AboutADay
        } else if hours > 1.5 {
            HumanDuration::Hours(hours.round() as u64)
        } else if hours > 0.8 {
            HumanDuration::AboutAnHour
        } else if minutes > 1.0 {
            HumanDuration::Minutes(minutes.round() as u64)
        } else {
            HumanDuration::UnderAMinute
        }
    }

    /// The duration phrase alone, e.g. "about 3 days".
    pub fn phrase(self, locale: Locale) -> String {
        match locale {
            Locale::English => match self {
                HumanDuration::Days(n) => format!("about {n} days"),
                HumanDuration::AboutADay => "about a day".into(),
                HumanDuration::Hours(n) => format!("about {n} hours"),
                HumanDuration::AboutAnHour => "about an hour".into(),
                HumanDuration::Minutes(n) => format!("about {n} minutes"),
                HumanDuration::UnderAMinute => "less than a minute".into(),
            },
            Locale::German => match self {
                HumanDuration::Days(n) => format!("ca. {n} Tagen"),
                HumanDuration::AboutADay => "ca. einem Tag".into(),
                HumanDuration::Hours(n) => format!("ca. {n} Stunden"),
                HumanDuration::AboutAnHour => "ca. einer Stunde".into(),
                HumanDuration::Minutes(n) => format!("ca. {n} Minuten"),
                HumanDuration::UnderAMinute => "weniger als einer Minute".into(),
            },
        }
    }

    /// Full sentence shown under the progress bar.
    pub fn message(self, locale: Locale) -> String {
        let phrase = self.phrase(locale);
        match locale {
            Locale::English => format!("At this pace the birdhouse is finished in {phrase}!"),
            Locale::German => format!("Bei diesem Tempo ist das Haus in {phrase} fertig!"),
        }
    }
}

/// Language for estimate messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::German => "de",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "de" | "german" | "deutsch" => Ok(Locale::German),
            other => Err(ValidationError::UnknownLocale(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_follow_thresholds() {
        let cases = [
            (259_200_000.0, HumanDuration::Days(3)),
            (138_240_000.0, HumanDuration::Days(2)),
            (129_600_000.0, HumanDuration::AboutADay),
            (70_000_000.0, HumanDuration::AboutADay),
            (69_120_000.0, HumanDuration::Hours(19)),
            (5_760_000.0, HumanDuration::Hours(2)),
            (5_400_000.0, HumanDuration::AboutAnHour),
            (3_240_000.0, HumanDuration::AboutAnHour),
            (2_880_000.0, HumanDuration::Minutes(48)),
            (150_000.0, HumanDuration::Minutes(3)),
            (60_000.0, HumanDuration::UnderAMinute),
            (3_000.0, HumanDuration::UnderAMinute),
        ];
        for (ms, expected) in cases {
            assert_eq!(HumanDuration::from_millis(ms), expected, "{ms} ms");
        }
    }

    #[test]
    fn renders_both_locales() {
        let d = HumanDuration::Days(4);
        assert_eq!(
            d.message(Locale::English),
            "At this pace the birdhouse is finished in about 4 days!"
        );
        assert_eq!(
            d.message(Locale::German),
            "Bei diesem Tempo ist das Haus in ca. 4 Tagen fertig!"
        );
        assert_eq!(
            HumanDuration::UnderAMinute.phrase(Locale::German),
            "weniger als einer Minute"
        );
    }

    #[test]
    fn locale_codes_round_trip() {
        assert_eq!("DE".parse::<Locale>(), Ok(Locale::German));
        assert_eq!(Locale::English.to_string(), "en");
        assert!("fr".parse::<Locale>().is_err());
    }
}
