//! Appointment documents and the values derived from them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::clock::WallClock;
use crate::interval::MinuteInterval;

/// Lifecycle state of a booking.
///
/// `Completed`, `Cancelled` and `NoShow` are terminal. Appointments are never
/// physically deleted, only marked cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl AppointmentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }
}

/// Which party performed the last mutation. Consumed downstream by the
/// notification collaborator to decide whom to notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Barber,
    Customer,
}

/// One line item of a booking; the appointment occupies the barber's chair
/// for `duration_minutes × quantity` per item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub name: String,
    pub duration_minutes: u32,
    pub quantity: u32,
}

impl ServiceItem {
    pub fn new(name: impl Into<String>, duration_minutes: u32, quantity: u32) -> Self {
        Self {
            name: name.into(),
            duration_minutes,
            quantity,
        }
    }
}

/// A booking record tying a customer to a barber's chair for a span of one
/// calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub barber_id: String,
    pub customer_id: String,
    pub services: Vec<ServiceItem>,
    pub date: NaiveDate,
    pub start_time: WallClock,
    pub status: AppointmentStatus,
    /// How many times the booking has been rescheduled.
    #[serde(default)]
    pub updated_count: u32,
    pub changes_made_by: Actor,
}

impl Appointment {
    /// Total chair time in minutes: `Σ duration × quantity` over services.
    pub fn total_duration_minutes(&self) -> u32 {
        self.services
            .iter()
            .map(|s| s.duration_minutes * s.quantity)
            .sum()
    }

    /// The `[start, start + duration)` span this booking occupies.
    pub fn interval(&self) -> MinuteInterval {
        let start = self.start_time.minute_of_day();
        MinuteInterval::new(start, start + self.total_duration_minutes())
    }

    /// Start instant on the calendar, for past/future checks.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time.to_naive_time())
    }

    /// Anything not cancelled still occupies calendar time.
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

/// A candidate start time offered to the customer. Derived at query time,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub time: WallClock,
    pub is_booked: bool,
}

/// Share of a day's appointments already completed, as a percentage.
///
/// Named rule: a day with zero appointments renders 0%, never NaN.
pub fn done_percentage(appointments: &[Appointment]) -> f64 {
    if appointments.is_empty() {
        return 0.0;
    }
    let done = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .count();
    done as f64 / appointments.len() as f64 * 100.0
}
