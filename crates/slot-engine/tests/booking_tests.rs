//! Tests for the booking orchestration: the render-to-commit race, the
//! per-day duplicate policy, reschedules, status persistence and the write
//! timeout guard.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use slot_engine::error::{Result, SlotError};
use slot_engine::{
    Actor, Appointment, AppointmentStatus, AppointmentStore, BookingService, MemoryStore,
    ServiceItem,
};

fn at(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}

fn request(barber_id: &str, customer_id: &str, date_str: &str, start: &str) -> Appointment {
    Appointment {
        id: String::new(),
        barber_id: barber_id.to_string(),
        customer_id: customer_id.to_string(),
        services: vec![ServiceItem::new("Cut", 30, 1)],
        date: date_str.parse().unwrap(),
        start_time: start.parse().unwrap(),
        status: AppointmentStatus::Pending,
        updated_count: 0,
        changes_made_by: Actor::Customer,
    }
}

const NOW: &str = "2026-03-16T09:00:00";

// ── Booking ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn booking_a_free_slot_persists() {
    let service = BookingService::new(MemoryStore::new());

    let id = service
        .book(request("b1", "c1", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap();

    let stored = service.store().all();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].status, AppointmentStatus::Pending);
}

#[tokio::test]
async fn second_customer_loses_the_race() {
    // Both customers rendered "3:00 PM" as open; X commits first.
    let service = BookingService::new(MemoryStore::new());
    service
        .book(request("b1", "cust-x", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap();

    let err = service
        .book(request("b1", "cust-y", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::SlotNoLongerAvailable { .. }));
    assert_eq!(service.store().all().len(), 1);
}

#[tokio::test]
async fn one_active_appointment_per_customer_per_day() {
    // Existing future appointment with a *different* barber, same day.
    let mut existing = request("b2", "c1", "2026-03-16", "11:00 AM");
    existing.id = "a1".to_string();
    let service = BookingService::new(MemoryStore::with_appointments(vec![existing]));

    let err = service
        .book(request("b1", "c1", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::DuplicateDailyBooking { .. }));
}

#[tokio::test]
async fn past_appointment_does_not_trigger_daily_duplicate() {
    let service = BookingService::new(MemoryStore::new());
    service
        .book(request("b1", "c1", "2026-03-16", "11:00 AM"), at(NOW))
        .await
        .unwrap();

    // By mid-afternoon the morning appointment is behind us.
    let id = service
        .book(request("b1", "c1", "2026-03-16", "4:00 PM"), at("2026-03-16T14:00:00"))
        .await
        .unwrap();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn cancelled_appointment_frees_the_day_and_slot() {
    let service = BookingService::new(MemoryStore::new());
    let id = service
        .book(request("b1", "c1", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap();

    let booked = service.store().all().into_iter().find(|a| a.id == id).unwrap();
    service
        .update_status(&booked, AppointmentStatus::Cancelled, Actor::Customer, at(NOW))
        .await
        .unwrap();

    // Same customer, same day, same slot — all free again.
    service
        .book(request("b1", "c1", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap();
}

// ── Rescheduling ────────────────────────────────────────────────────────────

#[tokio::test]
async fn reschedule_moves_and_counts() {
    let service = BookingService::new(MemoryStore::new());
    let id = service
        .book(request("b1", "c1", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap();
    let booked = service.store().all().into_iter().find(|a| a.id == id).unwrap();

    let moved = service
        .reschedule(
            &booked,
            "2026-03-17".parse().unwrap(),
            "5:00 PM".parse().unwrap(),
            Actor::Customer,
            at(NOW),
        )
        .await
        .unwrap();

    assert_eq!(moved.updated_count, 1);
    assert_eq!(moved.changes_made_by, Actor::Customer);
    let stored = service.store().all();
    assert_eq!(stored[0].start_time, "5:00 PM".parse().unwrap());
}

#[tokio::test]
async fn reschedule_onto_taken_slot_is_rejected() {
    let service = BookingService::new(MemoryStore::new());
    service
        .book(request("b1", "c1", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap();
    let id2 = service
        .book(request("b1", "c2", "2026-03-17", "4:00 PM"), at(NOW))
        .await
        .unwrap();
    let second = service.store().all().into_iter().find(|a| a.id == id2).unwrap();

    let err = service
        .reschedule(
            &second,
            "2026-03-16".parse().unwrap(),
            "3:00 PM".parse().unwrap(),
            Actor::Customer,
            at(NOW),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SlotError::SlotNoLongerAvailable { .. }));
}

#[tokio::test]
async fn reschedule_keeping_own_slot_is_legal() {
    let service = BookingService::new(MemoryStore::new());
    let id = service
        .book(request("b1", "c1", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap();
    let booked = service.store().all().into_iter().find(|a| a.id == id).unwrap();

    // Same date and time: the record must not conflict with itself.
    service
        .reschedule(
            &booked,
            booked.date,
            booked.start_time,
            Actor::Customer,
            at(NOW),
        )
        .await
        .unwrap();
}

// ── Status persistence ──────────────────────────────────────────────────────

#[tokio::test]
async fn confirmed_status_lands_in_the_store() {
    let service = BookingService::new(MemoryStore::new());
    let id = service
        .book(request("b1", "c1", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap();
    let booked = service.store().all().into_iter().find(|a| a.id == id).unwrap();

    let confirmed = service
        .update_status(&booked, AppointmentStatus::Confirmed, Actor::Barber, at(NOW))
        .await
        .unwrap();

    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
    assert_eq!(confirmed.changes_made_by, Actor::Barber);
    assert_eq!(
        service.store().all()[0].status,
        AppointmentStatus::Confirmed
    );
}

/// A store whose every operation fails.
struct FailingStore;

#[async_trait]
impl AppointmentStore for FailingStore {
    async fn appointments_for_barber(&self, _: &str) -> Result<Vec<Appointment>> {
        Ok(Vec::new())
    }
    async fn appointments_for_customer(&self, _: &str) -> Result<Vec<Appointment>> {
        Ok(Vec::new())
    }
    async fn create(&self, _: &Appointment) -> Result<String> {
        Err(SlotError::Store("write refused".to_string()))
    }
    async fn update(&self, _: &Appointment) -> Result<()> {
        Err(SlotError::Store("write refused".to_string()))
    }
}

#[tokio::test]
async fn failed_persist_surfaces_and_leaves_state() {
    let service = BookingService::new(FailingStore);
    let mut booked = request("b1", "c1", "2026-03-16", "10:00 AM");
    booked.id = "a1".to_string();
    booked.status = AppointmentStatus::Confirmed;

    let err = service
        .update_status(
            &booked,
            AppointmentStatus::Completed,
            Actor::Barber,
            at("2026-03-16T14:00:00"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::Store(_)));
    // No optimistic mutation: the caller's copy still shows confirmed.
    assert_eq!(booked.status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn illegal_transition_never_reaches_the_store() {
    let service = BookingService::new(FailingStore);
    let mut booked = request("b1", "c1", "2026-03-16", "5:00 PM");
    booked.id = "a1".to_string();
    booked.status = AppointmentStatus::Confirmed;

    // Completing a future appointment fails in the state machine, before
    // the failing store could even be asked.
    let err = service
        .update_status(&booked, AppointmentStatus::Completed, Actor::Barber, at(NOW))
        .await
        .unwrap_err();
    assert!(matches!(err, SlotError::IllegalStatusTransition(_)));
}

// ── Write timeout ───────────────────────────────────────────────────────────

/// A store whose writes hang far past any reasonable deadline.
struct WedgedStore {
    inner: MemoryStore,
}

#[async_trait]
impl AppointmentStore for WedgedStore {
    async fn appointments_for_barber(&self, barber_id: &str) -> Result<Vec<Appointment>> {
        self.inner.appointments_for_barber(barber_id).await
    }
    async fn appointments_for_customer(&self, customer_id: &str) -> Result<Vec<Appointment>> {
        self.inner.appointments_for_customer(customer_id).await
    }
    async fn create(&self, appointment: &Appointment) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        self.inner.create(appointment).await
    }
    async fn update(&self, appointment: &Appointment) -> Result<()> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        self.inner.update(appointment).await
    }
}

#[tokio::test(start_paused = true)]
async fn wedged_write_surfaces_retryable_timeout() {
    let store = WedgedStore {
        inner: MemoryStore::new(),
    };
    let service = BookingService::with_write_timeout(store, Duration::from_millis(250));

    let err = service
        .book(request("b1", "c1", "2026-03-16", "3:00 PM"), at(NOW))
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::StoreTimeout(_)));
}
