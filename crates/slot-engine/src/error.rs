//! Error types for slot-engine operations.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::clock::WallClock;

/// Errors that can occur while computing availability or committing bookings.
#[derive(Error, Debug)]
pub enum SlotError {
    /// A wall-clock time string failed strict parsing. This indicates a
    /// misconfigured schedule document, not a user mistake — callers must
    /// not substitute a default.
    #[error("Invalid time format: {0:?}")]
    InvalidTimeFormat(String),

    /// A previously-offered slot was taken between slot generation and
    /// commit. Recoverable: re-render the slot list and pick again.
    #[error("The {time} slot on {date} is no longer available")]
    SlotNoLongerAvailable { date: NaiveDate, time: WallClock },

    /// The customer already holds an active appointment on that day.
    /// Recoverable: modify or cancel the existing appointment instead.
    #[error("Customer {customer_id} already has an appointment on {date}")]
    DuplicateDailyBooking {
        customer_id: String,
        date: NaiveDate,
    },

    /// A status change the appointment state machine forbids, e.g.
    /// completing an appointment that has not started yet.
    #[error("Illegal status transition: {0}")]
    IllegalStatusTransition(String),

    /// The storage collaborator reported a failure.
    #[error("Storage error: {0}")]
    Store(String),

    /// The storage write did not complete within the configured deadline.
    /// Retryable — the write may or may not have landed.
    #[error("Storage write timed out after {0:?}")]
    StoreTimeout(Duration),
}

/// Convenience alias used throughout slot-engine.
pub type Result<T> = std::result::Result<T, SlotError>;
