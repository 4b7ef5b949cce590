//! Wall-clock time-of-day parsing, formatting and minute arithmetic.
//!
//! Schedules are defined per-weekday independent of any calendar date, so
//! times of day travel as 12-hour strings with an AM/PM suffix ("2:30 PM").
//! Inside the engine everything is a minute-of-day integer; the string form
//! exists only at the serialization edge.
//!
//! Parsing is strict: a malformed time string is a hard
//! [`SlotError::InvalidTimeFormat`], never a silent default, because a bad
//! schedule entry must not quietly produce wrong availability.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Minutes in a day; minute-of-day values wrap at this bound.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision.
///
/// Stored as 24-hour `(hours, minutes)`; displayed and serialized in the
/// 12-hour `"H:MM AM|PM"` form used by schedule and appointment documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallClock {
    hours: u32,
    minutes: u32,
}

impl WallClock {
    /// Build from 24-hour components. Returns `InvalidTimeFormat` when the
    /// components are out of range.
    pub fn new(hours: u32, minutes: u32) -> Result<Self> {
        if hours > 23 || minutes > 59 {
            return Err(SlotError::InvalidTimeFormat(format!(
                "{:02}:{:02}",
                hours, minutes
            )));
        }
        Ok(Self { hours, minutes })
    }

    /// Build from a minute-of-day value. Values ≥ 1440 wrap past midnight;
    /// availability callers bound their cursors against a same-day closing
    /// time, so the wrap is never observable there.
    pub fn from_minute_of_day(minute: u32) -> Self {
        let m = minute % MINUTES_PER_DAY;
        Self {
            hours: m / 60,
            minutes: m % 60,
        }
    }

    /// 24-hour hour component.
    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Minute component.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Minutes since midnight. All interval comparisons happen in this space.
    pub fn minute_of_day(&self) -> u32 {
        self.hours * 60 + self.minutes
    }

    /// Add a minute delta, carrying into the hour on overflow.
    pub fn add_minutes(self, delta: u32) -> Self {
        Self::from_minute_of_day(self.minute_of_day() + delta)
    }

    /// Bridge to `chrono` for date + time comparisons.
    pub fn to_naive_time(self) -> NaiveTime {
        // Components are range-checked at every constructor.
        NaiveTime::from_hms_opt(self.hours, self.minutes, 0).unwrap_or_default()
    }

    /// Truncate a `chrono` time to minute precision.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        use chrono::Timelike;
        Self {
            hours: time.hour(),
            minutes: time.minute(),
        }
    }
}

impl FromStr for WallClock {
    type Err = SlotError;

    /// Strict parse of the `"H:MM AM|PM"` form.
    ///
    /// Splits on whitespace into a clock part and a meridiem token; both must
    /// be present, the hour must be in `[1, 12]`, the minute in `[0, 59]`,
    /// and the meridiem exactly `AM` or `PM`. 12 AM maps to hour 0; PM adds
    /// 12 except for 12 PM itself.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTimeFormat(s.to_string());

        let mut parts = s.split_whitespace();
        let clock = parts.next().ok_or_else(invalid)?;
        let meridiem = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let (hour_str, minute_str) = clock.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour_str.parse().map_err(|_| invalid())?;
        let minute: u32 = minute_str.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(invalid());
        }

        let hours = match meridiem {
            "AM" => {
                if hour == 12 {
                    0
                } else {
                    hour
                }
            }
            "PM" => {
                if hour == 12 {
                    12
                } else {
                    hour + 12
                }
            }
            _ => return Err(invalid()),
        };

        Ok(Self {
            hours,
            minutes: minute,
        })
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour12, meridiem) = match self.hours {
            0 => (12, "AM"),
            1..=11 => (self.hours, "AM"),
            12 => (12, "PM"),
            _ => (self.hours - 12, "PM"),
        };
        write!(f, "{}:{:02} {}", hour12, self.minutes, meridiem)
    }
}

impl TryFrom<String> for WallClock {
    type Error = SlotError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<WallClock> for String {
    fn from(clock: WallClock) -> Self {
        clock.to_string()
    }
}
