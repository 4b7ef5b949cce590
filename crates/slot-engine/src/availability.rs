//! Bookable start-time generation for a barber's day.
//!
//! Given the working window, slot granularity, requested service duration and
//! the day's occupied spans (existing bookings, lunch break, blocked ranges),
//! walks the window in increment steps and keeps every candidate whose
//! `[start, start + duration)` span overlaps nothing. Pure and synchronous:
//! identical inputs always yield the identical ordered sequence.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::appointment::{Appointment, TimeSlot};
use crate::clock::WallClock;
use crate::interval::MinuteInterval;
use crate::schedule::BarberSchedule;

/// Collect the spans already reserved on a barber's calendar for one date:
/// every non-cancelled appointment as `[start, start + total duration)`.
pub fn occupied_intervals(
    appointments: &[Appointment],
    barber_id: &str,
    date: NaiveDate,
) -> Vec<MinuteInterval> {
    appointments
        .iter()
        .filter(|a| a.barber_id == barber_id && a.date == date && a.is_active())
        .map(|a| a.interval())
        .collect()
}

/// Generate the bookable start times within one working window.
///
/// # Arguments
/// - `start_time` / `end_time` — the weekday's working window
/// - `increment_minutes` — slot granularity (15/30/45); 0 yields no slots
/// - `occupied` — every reserved span: bookings, lunch, blocked ranges
/// - `duration_minutes` — chair time the new appointment would occupy
/// - `now` — the current wall-clock time when the target date is today,
///   `None` otherwise; slots already in the past are not offered
///
/// A candidate `[cursor, cursor + duration)` survives only if it overlaps no
/// occupied span (open-interval test, so back-to-back bookings are legal)
/// and still ends by closing time. Survivors come back in increasing order
/// with `is_booked = false`.
pub fn generate_available_slots(
    start_time: WallClock,
    end_time: WallClock,
    increment_minutes: u32,
    occupied: &[MinuteInterval],
    duration_minutes: u32,
    now: Option<WallClock>,
) -> Vec<TimeSlot> {
    if increment_minutes == 0 {
        return Vec::new();
    }

    let open = start_time.minute_of_day();
    let close = end_time.minute_of_day();

    // When the nominal opening is already behind us, advance to "now"
    // rounded up to the next increment multiple. The rounding carries into
    // the hour: 10:50 on a 15-minute grid becomes 11:00, not 10:60.
    let mut cursor = open;
    if let Some(now) = now {
        if now.minute_of_day() > open {
            let rounded_minutes = now.minutes().div_ceil(increment_minutes) * increment_minutes;
            cursor = now.hours() * 60 + rounded_minutes;
        }
    }

    // Latest permissible start: a slot whose service would run past closing
    // is invalid. Signed so a duration longer than the window borrows clean.
    let latest_start = close as i64 - duration_minutes as i64;
    if latest_start < cursor as i64 {
        return Vec::new();
    }

    // Sorting is not required by the overlap test; it keeps behavior
    // deterministic and the reject path easier to trace.
    let mut occupied = occupied.to_vec();
    occupied.sort_by_key(|iv| (iv.start, iv.end));

    let mut slots = Vec::new();
    while (cursor as i64) <= latest_start {
        let candidate = MinuteInterval::new(cursor, cursor + duration_minutes);
        if !occupied.iter().any(|busy| candidate.overlaps(busy)) {
            slots.push(TimeSlot {
                time: WallClock::from_minute_of_day(cursor),
                is_booked: false,
            });
        }
        cursor += increment_minutes;
    }

    slots
}

/// Compute the bookable slots for a barber on one calendar date.
///
/// Resolves the weekday's [`ScheduleDay`](crate::schedule::ScheduleDay),
/// folds lunch and same-date blocked ranges into the occupied set alongside
/// the live bookings, and delegates to [`generate_available_slots`].
///
/// Returns an empty sequence without evaluating the walk when:
/// - the barber is globally unavailable,
/// - the weekday is marked off,
/// - the date is already past,
/// - an all-day block covers the date.
///
/// `appointments` is the barber's live appointment list as fetched from the
/// storage collaborator; freshness is the caller's responsibility.
pub fn slots_for_date(
    calendar: &BarberSchedule,
    barber_id: &str,
    appointments: &[Appointment],
    date: NaiveDate,
    duration_minutes: u32,
    now: NaiveDateTime,
) -> Vec<TimeSlot> {
    if !calendar.is_available {
        return Vec::new();
    }

    let day = calendar.schedule.day(date.weekday());
    if day.is_off || date < now.date() {
        return Vec::new();
    }

    let blocked_today: Vec<_> = calendar
        .blocked_times
        .iter()
        .filter(|b| b.date == date)
        .collect();
    if blocked_today.iter().any(|b| b.all_day) {
        return Vec::new();
    }

    let mut occupied = occupied_intervals(appointments, barber_id, date);
    if let Some(lunch) = day.lunch_break {
        occupied.push(lunch.to_interval());
    }
    for block in blocked_today {
        if let Some(range) = block.range {
            occupied.push(range.to_interval());
        }
    }

    let today = date == now.date();
    generate_available_slots(
        day.start_time,
        day.end_time,
        calendar.minutes_interval,
        &occupied,
        duration_minutes,
        today.then(|| WallClock::from_naive_time(now.time())),
    )
}
