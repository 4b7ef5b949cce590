//! Barber schedule documents: weekly working pattern and one-off exceptions.
//!
//! A barber's calendar is a recurring weekly pattern (one [`ScheduleDay`] per
//! weekday, keyed by weekday abbreviation) plus date-specific
//! [`BlockedTimeRange`] exceptions. Field names mirror the hosted document
//! store's camelCase shape.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::clock::WallClock;
use crate::interval::ClockRange;

/// One weekday's working pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    /// The barber does not work this weekday at all.
    #[serde(default)]
    pub is_off: bool,
    pub start_time: WallClock,
    pub end_time: WallClock,
    /// Recurring lunch break, absent when the barber takes none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_break: Option<ClockRange>,
}

impl ScheduleDay {
    /// A working day with the given window and no lunch break.
    pub fn working(start_time: WallClock, end_time: WallClock) -> Self {
        Self {
            is_off: false,
            start_time,
            end_time,
            lunch_break: None,
        }
    }

    /// A day the barber is off. The window times are placeholders and never
    /// consulted while `is_off` is set.
    pub fn off() -> Self {
        Self {
            is_off: true,
            start_time: WallClock::from_minute_of_day(0),
            end_time: WallClock::from_minute_of_day(0),
            lunch_break: None,
        }
    }
}

/// The full weekly pattern, keyed by weekday abbreviation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub mon: ScheduleDay,
    pub tue: ScheduleDay,
    pub wed: ScheduleDay,
    pub thu: ScheduleDay,
    pub fri: ScheduleDay,
    pub sat: ScheduleDay,
    pub sun: ScheduleDay,
}

impl WeekSchedule {
    pub fn day(&self, weekday: Weekday) -> &ScheduleDay {
        match weekday {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut ScheduleDay {
        match weekday {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }
}

impl Default for WeekSchedule {
    /// Onboarding default: 9 AM – 5 PM with a noon lunch hour, Sundays off.
    fn default() -> Self {
        let working = ScheduleDay {
            is_off: false,
            start_time: WallClock::from_minute_of_day(9 * 60),
            end_time: WallClock::from_minute_of_day(17 * 60),
            lunch_break: Some(ClockRange::new(
                WallClock::from_minute_of_day(12 * 60),
                WallClock::from_minute_of_day(13 * 60),
            )),
        };
        Self {
            mon: working.clone(),
            tue: working.clone(),
            wed: working.clone(),
            thu: working.clone(),
            fri: working.clone(),
            sat: working,
            sun: ScheduleDay::off(),
        }
    }
}

/// A barber-declared exception for one calendar date: either the whole day
/// or a specific wall-clock range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedTimeRange {
    pub date: NaiveDate,
    #[serde(default)]
    pub all_day: bool,
    /// The blocked span; ignored when `all_day` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ClockRange>,
}

impl BlockedTimeRange {
    pub fn all_day(date: NaiveDate) -> Self {
        Self {
            date,
            all_day: true,
            range: None,
        }
    }

    pub fn partial(date: NaiveDate, range: ClockRange) -> Self {
        Self {
            date,
            all_day: false,
            range: Some(range),
        }
    }
}

/// Everything the availability computation reads from a barber's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarberSchedule {
    pub schedule: WeekSchedule,
    #[serde(default)]
    pub blocked_times: Vec<BlockedTimeRange>,
    /// Granularity for slot start times, commonly 15/30/45 minutes.
    pub minutes_interval: u32,
    /// Global kill switch: an unavailable barber offers no slots anywhere.
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl Default for BarberSchedule {
    fn default() -> Self {
        Self {
            schedule: WeekSchedule::default(),
            blocked_times: Vec::new(),
            minutes_interval: 30,
            is_available: true,
        }
    }
}

fn default_available() -> bool {
    true
}
