//! Wall-clock time within a single day.
//!
//! `ClockTime` does double duty, as in the source log format: it is both a
//! moment in the day (`13:05`) and an accumulated duration (`02:18` of
//! occupation). Moments compare and subtract; durations accumulate with a
//! wrap at 24 hours.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from constructing or combining clock times.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The hour component was outside 0–23.
    #[error("hour must be between 0 and 23, got {0}")]
    HourOutOfRange(u8),

    /// The minute component was outside 0–59.
    #[error("minute must be between 0 and 59, got {0}")]
    MinuteOutOfRange(u8),

    /// Subtraction was attempted with operands out of order.
    #[error("cannot measure a span from {start} back to {end}")]
    InvertedSpan { start: ClockTime, end: ClockTime },

    /// The text was not a zero-padded `HH:MM` value.
    #[error("expected HH:MM, got {0:?}")]
    Malformed(String),
}

/// An hour-and-minute value, ordered lexicographically.
///
/// Serialized as its `HH:MM` string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// The zero value, used as the starting point for accumulated durations.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a clock time after range validation.
    pub const fn new(hour: u8, minute: u8) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    #[must_use]
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Adds a duration, carrying minute overflow once and wrapping the hour
    /// at 24. Only meaningful for accumulating occupied time, never for
    /// advancing the wall clock.
    #[must_use]
    pub const fn wrapping_add(self, other: Self) -> Self {
        let mut hour = self.hour + other.hour;
        let mut minute = self.minute + other.minute;
        if minute >= 60 {
            minute -= 60;
            hour += 1;
        }
        if hour >= 24 {
            hour -= 24;
        }
        Self { hour, minute }
    }

    /// Returns the span from `earlier` up to `self`.
    ///
    /// Fails when `self` precedes `earlier`; within one day there is no
    /// wrap-around to fall back on, so inverted operands indicate an
    /// out-of-order log.
    pub fn span_since(self, earlier: Self) -> Result<Self, TimeError> {
        if self < earlier {
            return Err(TimeError::InvertedSpan {
                start: earlier,
                end: self,
            });
        }
        let (hour, minute) = if self.minute < earlier.minute {
            (
                self.hour - 1 - earlier.hour,
                self.minute + 60 - earlier.minute,
            )
        } else {
            (self.hour - earlier.hour, self.minute - earlier.minute)
        };
        Ok(Self { hour, minute })
    }

    /// Number of billable hours in this duration: partial hours round up.
    #[must_use]
    pub fn billable_hours(self) -> u32 {
        u32::from(self.hour) + u32::from(self.minute > 0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeError::Malformed(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(malformed)?;
        // The format is strict: exactly two digits on each side.
        if hour.len() != 2
            || minute.len() != 2
            || !hour.bytes().all(|b| b.is_ascii_digit())
            || !minute.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }
        let hour: u8 = hour.parse().map_err(|_| malformed())?;
        let minute: u8 = minute.parse().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}
