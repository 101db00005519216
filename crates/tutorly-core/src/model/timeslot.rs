//! Closed time interval used to schedule sessions.
//!
//! Two timeslots overlap when `a.start < b.end && a.end > b.start`.
//! Adjacent timeslots (where one ends exactly when another starts) do NOT
//! overlap, so back-to-back sessions are allowed.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TutorlyError};

/// Input/display format for a single endpoint, e.g. `2025-03-01 10:00`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Input/display format for a date, e.g. `2025-03-01`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const SEPARATOR: &str = " - ";

/// An immutable `[start, end]` pair with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeslot")]
pub struct Timeslot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawTimeslot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawTimeslot> for Timeslot {
    type Error = TutorlyError;

    fn try_from(raw: RawTimeslot) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl Timeslot {
    /// # Errors
    ///
    /// Returns [`TutorlyError::Validation`] if `start` is after `end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(TutorlyError::validation(
                "timeslot",
                "start time must not be after end time",
            ));
        }
        Ok(Self { start, end })
    }

    /// Parses `yyyy-MM-dd HH:mm - yyyy-MM-dd HH:mm`, or
    /// `yyyy-MM-dd HH:mm - HH:mm` when both ends fall on the same date.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || {
            TutorlyError::validation(
                "timeslot",
                format!(
                    "'{}' should look like 2025-03-01 10:00 - 12:00 or 2025-03-01 23:00 - 2025-03-02 01:00",
                    raw.trim()
                ),
            )
        };

        let (start_raw, end_raw) = raw.split_once(SEPARATOR).ok_or_else(invalid)?;
        let start = NaiveDateTime::parse_from_str(start_raw.trim(), DATETIME_FORMAT)
            .map_err(|_| invalid())?;
        let end_raw = end_raw.trim();
        let end = match NaiveDateTime::parse_from_str(end_raw, DATETIME_FORMAT) {
            Ok(end) => end,
            Err(_) => {
                let time = NaiveTime::parse_from_str(end_raw, TIME_FORMAT).map_err(|_| invalid())?;
                start.date().and_time(time)
            }
        };

        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Returns `true` if the two timeslots share more than an endpoint.
    pub fn is_overlapping(&self, other: &Timeslot) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Returns `true` if `date` falls on any calendar day this timeslot
    /// touches. Time of day is ignored.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end_format = if self.start.date() == self.end.date() {
            TIME_FORMAT
        } else {
            DATETIME_FORMAT
        };
        write!(
            f,
            "{}{}{}",
            self.start.format(DATETIME_FORMAT),
            SEPARATOR,
            self.end.format(end_format)
        )
    }
}

/// Parses a `yyyy-MM-dd` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        TutorlyError::validation("date", format!("'{}' should look like 2025-03-01", raw.trim()))
    })
}
