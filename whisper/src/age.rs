use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

/// coarse, human readable age of a message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelativeAge {
    JustNow,
    Minutes(i64),
    Hours(i64),
    /// older than a day, shown as a calendar date
    Date(NaiveDate),
}

impl RelativeAge {
    pub fn between(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let seconds = (now - created_at).num_seconds();

        match seconds {
            s if s < 60 => RelativeAge::JustNow,
            s if s < 60 * 60 => RelativeAge::Minutes(s / 60),
            s if s < 24 * 60 * 60 => RelativeAge::Hours(s / (60 * 60)),
            _ => RelativeAge::Date(created_at.date_naive()),
        }
    }
}

impl fmt::Display for RelativeAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeAge::JustNow => write!(f, "just now"),
            RelativeAge::Minutes(m) => write!(f, "{m}m ago"),
            RelativeAge::Hours(h) => write!(f, "{h}h ago"),
            RelativeAge::Date(date) => write!(f, "{}", date.format("%-m/%-d/%Y")),
        }
    }
}
