//! Write-time booking guards.
//!
//! Slot lists are rendered from a possibly-stale snapshot; two customers can
//! both see the same opening. These checks re-validate against the *live*
//! appointment set immediately before a write commits, so whoever commits
//! first wins and the loser gets an actionable rejection.

use chrono::{NaiveDate, NaiveDateTime};

use crate::appointment::Appointment;
use crate::clock::WallClock;

/// Whether a barber+date+start-time slot is still free in the live set.
///
/// A slot is taken when a non-cancelled appointment holds the same barber,
/// the same calendar day and the identical start time. `exclude_id` skips
/// the appointment being edited so reschedules do not conflict with
/// themselves.
pub fn is_slot_still_available(
    barber_id: &str,
    date: NaiveDate,
    start_time: WallClock,
    live: &[Appointment],
    exclude_id: Option<&str>,
) -> bool {
    !live.iter().any(|a| {
        a.barber_id == barber_id
            && a.date == date
            && a.start_time == start_time
            && a.is_active()
            && exclude_id != Some(a.id.as_str())
    })
}

/// One-active-appointment-per-customer-per-day policy.
///
/// True when the customer already holds a non-cancelled, still-future
/// appointment on that calendar day, with any barber. Past appointments on
/// the same day do not block a new booking.
pub fn has_active_booking_on_day(
    customer_id: &str,
    date: NaiveDate,
    live: &[Appointment],
    now: NaiveDateTime,
) -> bool {
    live.iter().any(|a| {
        a.customer_id == customer_id
            && a.date == date
            && a.is_active()
            && a.start_datetime() > now
    })
}
