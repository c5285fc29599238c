//! Player clock values.
//!
//! A [`Time`] is a signed millisecond count. Clocks tick down in steps of
//! [`Time::PRECISION`] and are allowed to run past zero: running out of
//! time does not end the game.

use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Time {
    millis: i64,
}

impl Time {
    /// Clock resolution; one tick of the clock process.
    pub const PRECISION: Time = Time { millis: 10 };

    pub const ZERO: Time = Time { millis: 0 };

    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    pub const fn from_minutes_seconds(minutes: i64, seconds: i64) -> Self {
        Self {
            millis: (minutes * 60 + seconds) * 1000,
        }
    }

    pub fn as_millis(self) -> i64 {
        self.millis
    }

    pub fn is_positive(self) -> bool {
        self.millis > 0
    }

    pub fn is_negative(self) -> bool {
        self.millis < 0
    }

    /// Remove one clock tick. The result may be negative.
    pub fn decrement(&mut self) {
        self.millis -= Self::PRECISION.millis;
    }

    /// Tick length as a `Duration`, for sleeping.
    pub fn precision_duration() -> Duration {
        Duration::from_millis(Self::PRECISION.millis as u64)
    }

    /// Remaining time as a `Duration`, saturating at zero.
    pub fn to_duration(self) -> Duration {
        Duration::from_millis(self.millis.max(0) as u64)
    }
}

impl From<Duration> for Time {
    fn from(d: Duration) -> Self {
        Self {
            millis: d.as_millis().min(i64::MAX as u128) as i64,
        }
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time {
            millis: self.millis + rhs.millis,
        }
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Time) {
        self.millis += rhs.millis;
    }
}

/// Formats as `H:MM:SS`, e.g. `0:09:59`.
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.millis < 0 { "-" } else { "" };
        let total_secs = self.millis.unsigned_abs() / 1000;
        let hours = total_secs / 3600;
        let mins = (total_secs / 60) % 60;
        let secs = total_secs % 60;
        write!(f, "{sign}{hours}:{mins:02}:{secs:02}")
    }
}

/// Parses `[[h:]m:]s`. Whitespace anywhere is ignored; minutes and seconds
/// are capped at 60.
impl FromStr for Time {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(ChessError::MalformedTime("empty string".to_string()));
        }

        let fields: Vec<&str> = compact.split(':').collect();
        if fields.len() > 3 {
            return Err(ChessError::MalformedTime(format!(
                "{s}: use at most three numbers separated with colon"
            )));
        }

        // hours, minutes, seconds; missing leading fields stay zero
        let mut parts = [0i64; 3];
        let offset = 3 - fields.len();
        for (i, field) in fields.iter().enumerate() {
            let value: i64 = field
                .parse()
                .map_err(|_| ChessError::MalformedTime(format!("{s}: '{field}' is not a number")))?;
            if value < 0 {
                return Err(ChessError::MalformedTime(format!(
                    "{s}: values must be non-negative"
                )));
            }
            let slot = offset + i;
            if slot > 0 && value > 60 {
                return Err(ChessError::MalformedTime(format!(
                    "{s}: minutes and seconds must be at most 60"
                )));
            }
            parts[slot] = value;
        }

        let [hours, minutes, seconds] = parts;
        hours
            .checked_mul(60)
            .and_then(|m| m.checked_add(minutes))
            .and_then(|m| m.checked_mul(60))
            .and_then(|secs| secs.checked_add(seconds))
            .and_then(|secs| secs.checked_mul(1000))
            .map(Time::from_millis)
            .ok_or_else(|| ChessError::MalformedTime(format!("{s}: value is too large")))
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
