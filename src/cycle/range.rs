use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::CycleError;

/// Whether the selected range is a recognised billing cycle or a custom period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Cycle,
    Period,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Cycle => f.write_str("cycle"),
            Mode::Period => f.write_str("period"),
        }
    }
}

/// Inclusive range of calendar days, stored as local timestamps.
///
/// The start is pinned to the first instant of its day and the end to the
/// last millisecond of its day, so two ranges covering the same days are
/// always equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CycleError> {
        if end < start {
            return Err(CycleError::InvertedRange { start, end });
        }
        Ok(Self {
            start: start_of_day(start),
            end: end_of_day(end),
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_day(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start_day() && day <= self.end_day()
    }

    /// Calendar-day equality, ignoring the time of day on either side.
    pub fn same_days(&self, other: &DateRange) -> bool {
        self.start_day() == other.start_day() && self.end_day() == other.end_day()
    }

    /// Number of calendar days covered, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end_day() - self.start_day()).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start_day(), self.end_day())
    }
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(day))
}
