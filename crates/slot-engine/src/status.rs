//! The appointment status state machine.
//!
//! `pending → {confirmed, cancelled}`; `confirmed → {completed, cancelled,
//! no-show}`; `completed`, `cancelled` and `no-show` are terminal. Role
//! rules: only the barber confirms, completes or marks a no-show; either
//! party cancels. Completion and no-show are only legal once the start time
//! is no longer in the future.

use chrono::NaiveDateTime;

use crate::appointment::{Actor, Appointment, AppointmentStatus};
use crate::error::{Result, SlotError};

/// Whether `actor` may move `appointment` to `next` right now.
pub fn can_transition(
    appointment: &Appointment,
    next: AppointmentStatus,
    actor: Actor,
    now: NaiveDateTime,
) -> bool {
    transition_error(appointment, next, actor, now).is_none()
}

/// Apply a status transition, returning the updated record.
///
/// The input is untouched: a caller that persists the returned clone and
/// keeps its own copy until the write is confirmed never shows optimistic
/// state. Every successful transition stamps `changes_made_by` with the
/// acting role.
pub fn transition(
    appointment: &Appointment,
    next: AppointmentStatus,
    actor: Actor,
    now: NaiveDateTime,
) -> Result<Appointment> {
    if let Some(reason) = transition_error(appointment, next, actor, now) {
        return Err(SlotError::IllegalStatusTransition(reason));
    }
    let mut updated = appointment.clone();
    updated.status = next;
    updated.changes_made_by = actor;
    Ok(updated)
}

/// The cancel/reschedule action visibility rule.
///
/// Pending appointments are always modifiable, regardless of their start
/// time; confirmed ones only until they begin. This parenthesization is
/// pinned by a regression test — keep the pending arm unconditional.
pub fn can_modify(appointment: &Appointment, now: NaiveDateTime) -> bool {
    appointment.status == AppointmentStatus::Pending
        || (appointment.status == AppointmentStatus::Confirmed
            && appointment.start_datetime() > now)
}

/// `None` when the transition is legal, otherwise the user-visible reason.
fn transition_error(
    appointment: &Appointment,
    next: AppointmentStatus,
    actor: Actor,
    now: NaiveDateTime,
) -> Option<String> {
    use AppointmentStatus::*;

    let current = appointment.status;
    if current.is_terminal() {
        return Some(format!("{:?} is a terminal status", current));
    }

    match next {
        Pending => Some("an appointment cannot return to pending".to_string()),
        Confirmed => {
            if actor != Actor::Barber {
                Some("only the barber can confirm a request".to_string())
            } else if current != Pending {
                Some(format!("cannot confirm a {:?} appointment", current))
            } else {
                None
            }
        }
        Cancelled => None,
        Completed | NoShow => {
            let verb = if next == Completed {
                "complete"
            } else {
                "mark a no-show on"
            };
            if actor != Actor::Barber {
                Some(format!("only the barber can {} an appointment", verb))
            } else if current != Confirmed {
                Some(format!("cannot {} a {:?} appointment", verb, current))
            } else if appointment.start_datetime() > now {
                Some(format!("cannot {} a future appointment", verb))
            } else {
                None
            }
        }
    }
}
