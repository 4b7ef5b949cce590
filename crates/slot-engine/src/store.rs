//! The storage boundary and the race-closing booking orchestration.
//!
//! Slot generation is pure and runs against a snapshot; the window between
//! rendering a slot and committing a booking is a race. [`BookingService`]
//! closes it by re-reading the live appointment set immediately before every
//! write and re-rejecting on conflict. No pessimistic locking: whoever's
//! write commits first wins. Writes are timeout-guarded so a wedged store
//! surfaces a retryable error instead of hanging the booking flow.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::appointment::{Actor, Appointment, AppointmentStatus};
use crate::clock::WallClock;
use crate::conflict::{has_active_booking_on_day, is_slot_still_available};
use crate::error::{Result, SlotError};
use crate::status;

/// The document-database collaborator. Transport is not this crate's
/// concern; implementations map their own failures into [`SlotError::Store`].
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn appointments_for_barber(&self, barber_id: &str) -> Result<Vec<Appointment>>;

    async fn appointments_for_customer(&self, customer_id: &str) -> Result<Vec<Appointment>>;

    /// Persist a new appointment and return its assigned id.
    async fn create(&self, appointment: &Appointment) -> Result<String>;

    /// Replace the stored record matching `appointment.id`.
    async fn update(&self, appointment: &Appointment) -> Result<()>;
}

const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Booking orchestration over any [`AppointmentStore`].
pub struct BookingService<S> {
    store: S,
    write_timeout: Duration,
}

impl<S: AppointmentStore> BookingService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    pub fn with_write_timeout(store: S, write_timeout: Duration) -> Self {
        Self {
            store,
            write_timeout,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Book a new appointment.
    ///
    /// Re-validates against appointments fetched *now*, not the snapshot the
    /// slot list was rendered from: the exact slot must still be free and
    /// the customer must not already hold an active future appointment that
    /// day. Only then does the write go out.
    pub async fn book(&self, appointment: Appointment, now: NaiveDateTime) -> Result<String> {
        let live = self
            .store
            .appointments_for_barber(&appointment.barber_id)
            .await?;
        if !is_slot_still_available(
            &appointment.barber_id,
            appointment.date,
            appointment.start_time,
            &live,
            None,
        ) {
            warn!(
                barber_id = %appointment.barber_id,
                date = %appointment.date,
                time = %appointment.start_time,
                "slot taken between render and commit"
            );
            return Err(SlotError::SlotNoLongerAvailable {
                date: appointment.date,
                time: appointment.start_time,
            });
        }

        let customer_live = self
            .store
            .appointments_for_customer(&appointment.customer_id)
            .await?;
        if has_active_booking_on_day(&appointment.customer_id, appointment.date, &customer_live, now)
        {
            warn!(
                customer_id = %appointment.customer_id,
                date = %appointment.date,
                "customer already booked that day"
            );
            return Err(SlotError::DuplicateDailyBooking {
                customer_id: appointment.customer_id.clone(),
                date: appointment.date,
            });
        }

        let id = self
            .guarded(self.store.create(&appointment))
            .await?;
        info!(
            id = %id,
            barber_id = %appointment.barber_id,
            date = %appointment.date,
            time = %appointment.start_time,
            "appointment booked"
        );
        Ok(id)
    }

    /// Move an existing appointment to a new date and start time.
    ///
    /// Runs the same live-slot re-check as [`book`](Self::book), excluding
    /// the appointment's own record. Returns the updated record; the
    /// caller's copy stays valid until the write is confirmed.
    pub async fn reschedule(
        &self,
        appointment: &Appointment,
        new_date: NaiveDate,
        new_start: WallClock,
        actor: Actor,
        now: NaiveDateTime,
    ) -> Result<Appointment> {
        let live = self
            .store
            .appointments_for_barber(&appointment.barber_id)
            .await?;
        if !is_slot_still_available(
            &appointment.barber_id,
            new_date,
            new_start,
            &live,
            Some(appointment.id.as_str()),
        ) {
            return Err(SlotError::SlotNoLongerAvailable {
                date: new_date,
                time: new_start,
            });
        }

        let mut updated = appointment.clone();
        updated.date = new_date;
        updated.start_time = new_start;
        updated.updated_count += 1;
        updated.changes_made_by = actor;

        self.guarded(self.store.update(&updated)).await?;
        info!(
            id = %updated.id,
            date = %new_date,
            time = %new_start,
            updated_count = updated.updated_count,
            "appointment rescheduled"
        );
        Ok(updated)
    }

    /// Apply a status transition and persist it.
    ///
    /// The state machine is checked first; the stored record and the
    /// returned value only change once the write is confirmed, so a failed
    /// persist leaves the caller's state exactly as it was.
    pub async fn update_status(
        &self,
        appointment: &Appointment,
        next: AppointmentStatus,
        actor: Actor,
        now: NaiveDateTime,
    ) -> Result<Appointment> {
        let updated = status::transition(appointment, next, actor, now)?;
        self.guarded(self.store.update(&updated)).await?;
        info!(
            id = %updated.id,
            status = ?updated.status,
            by = ?actor,
            "appointment status updated"
        );
        Ok(updated)
    }

    async fn guarded<T>(&self, write: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.write_timeout, write)
            .await
            .map_err(|_| SlotError::StoreTimeout(self.write_timeout))?
    }
}

/// In-memory [`AppointmentStore`], the reference implementation for tests
/// and the contract any document-store adapter must honor.
#[derive(Default)]
pub struct MemoryStore {
    appointments: Mutex<Vec<Appointment>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records, e.g. a fixture set.
    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: Mutex::new(appointments),
            next_id: AtomicU64::new(0),
        }
    }

    /// Snapshot of everything currently stored.
    pub fn all(&self) -> Vec<Appointment> {
        self.appointments.lock().clone()
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn appointments_for_barber(&self, barber_id: &str) -> Result<Vec<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .iter()
            .filter(|a| a.barber_id == barber_id)
            .cloned()
            .collect())
    }

    async fn appointments_for_customer(&self, customer_id: &str) -> Result<Vec<Appointment>> {
        Ok(self
            .appointments
            .lock()
            .iter()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn create(&self, appointment: &Appointment) -> Result<String> {
        let mut stored = appointment.clone();
        if stored.id.is_empty() {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed);
            stored.id = format!("appt-{}", n + 1);
        }
        let id = stored.id.clone();
        self.appointments.lock().push(stored);
        Ok(id)
    }

    async fn update(&self, appointment: &Appointment) -> Result<()> {
        let mut appointments = self.appointments.lock();
        match appointments.iter_mut().find(|a| a.id == appointment.id) {
            Some(slot) => {
                *slot = appointment.clone();
                Ok(())
            }
            None => Err(SlotError::Store(format!(
                "no appointment with id {:?}",
                appointment.id
            ))),
        }
    }
}
