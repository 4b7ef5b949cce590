//! # slot-engine
//!
//! Deterministic appointment-slot availability and booking-conflict engine
//! for barbershop scheduling.
//!
//! Given a barber's weekly working pattern, lunch breaks, slot granularity,
//! live bookings, one-off blocked ranges and a requested service duration,
//! the engine computes the bookable start times for a day — and re-validates
//! a chosen slot against the live appointment set at write time, so two
//! customers racing for the same opening cannot both win.
//!
//! ## Quick start
//!
//! ```rust
//! use slot_engine::{generate_available_slots, MinuteInterval, WallClock};
//!
//! let open: WallClock = "10:00 AM".parse().unwrap();
//! let close: WallClock = "7:00 PM".parse().unwrap();
//! // One existing booking, 2:00 PM – 2:40 PM.
//! let occupied = vec![MinuteInterval::new(14 * 60, 14 * 60 + 40)];
//!
//! let slots = generate_available_slots(open, close, 30, &occupied, 30, None);
//! assert_eq!(slots[0].time.to_string(), "10:00 AM");
//! // 1:30 PM ends exactly at 2:00 PM — back-to-back is legal.
//! assert!(slots.iter().any(|s| s.time.to_string() == "1:30 PM"));
//! assert!(!slots.iter().any(|s| s.time.to_string() == "2:00 PM"));
//! ```
//!
//! ## Modules
//!
//! - [`clock`] — 12-hour wall-clock parsing, formatting, minute arithmetic
//! - [`interval`] — half-open minute intervals and the overlap primitive
//! - [`schedule`] — weekly schedule and blocked-time documents
//! - [`appointment`] — booking records, statuses, derived values
//! - [`availability`] — bookable start-time generation for a day
//! - [`conflict`] — write-time re-validation guards
//! - [`status`] — the appointment status state machine
//! - [`store`] — storage collaborator trait + booking orchestration
//! - [`error`] — error types

pub mod appointment;
pub mod availability;
pub mod clock;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod schedule;
pub mod status;
pub mod store;

pub use appointment::{done_percentage, Actor, Appointment, AppointmentStatus, ServiceItem, TimeSlot};
pub use availability::{generate_available_slots, occupied_intervals, slots_for_date};
pub use clock::WallClock;
pub use conflict::{has_active_booking_on_day, is_slot_still_available};
pub use error::SlotError;
pub use interval::{ClockRange, MinuteInterval};
pub use schedule::{BarberSchedule, BlockedTimeRange, ScheduleDay, WeekSchedule};
pub use status::{can_modify, can_transition, transition};
pub use store::{AppointmentStore, BookingService, MemoryStore};
