//! Slot and appointment lifecycle integration tests.
//!
//! The core invariant under test: a slot is available iff no appointment
//! references it, after every book/cancel/reschedule/delete.

mod common;

use chrono::{Datelike, Duration, Timelike, Utc, Weekday};
use uuid::Uuid;

use calmseek::domain::{AccountRole, AppointmentKind, TimeSlot};
use calmseek::errors::AppError;
use calmseek::infra::UnitOfWork;
use calmseek::services::{BookAppointment, RecurringSlots, RescheduleAppointment, ServiceContainer};

use common::{actor_of, create_account, setup};

async fn publish_slot(
    services: &calmseek::services::Services,
    provider: &calmseek::domain::Account,
    days_ahead: i64,
) -> TimeSlot {
    let start = Utc::now() + Duration::days(days_ahead);
    services
        .slots()
        .publish(actor_of(provider), start, start + Duration::hours(1))
        .await
        .expect("slot publication failed")
}

#[tokio::test]
async fn booking_flips_slot_and_cancelling_restores_it() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let user = create_account(&uow, "user_u", AccountRole::User).await;

    let slot = publish_slot(&services, &provider, 1).await;
    assert!(slot.is_available);

    let appointment = services
        .appointments()
        .book(
            actor_of(&user),
            BookAppointment {
                slot_id: slot.id,
                kind: AppointmentKind::Consultation,
                comments: "First visit".to_string(),
            },
        )
        .await
        .expect("booking failed");

    assert_eq!(appointment.user_id, user.id);
    assert_eq!(appointment.time_slot_id, slot.id);
    assert_eq!(appointment.kind, AppointmentKind::Consultation);

    let stored = uow.slots().find_by_id(slot.id).await.unwrap().unwrap();
    assert!(!stored.is_available);

    // Booked slots disappear from the availability listing
    let available = services.slots().list_available(None, None).await.unwrap();
    assert!(available.iter().all(|s| s.id != slot.id));

    services
        .appointments()
        .cancel(actor_of(&user), appointment.id)
        .await
        .expect("cancel failed");

    assert!(uow
        .appointments()
        .find_by_id(appointment.id)
        .await
        .unwrap()
        .is_none());
    let restored = uow.slots().find_by_id(slot.id).await.unwrap().unwrap();
    assert!(restored.is_available);
}

#[tokio::test]
async fn booking_an_unavailable_slot_fails_and_creates_nothing() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let first = create_account(&uow, "user_first", AccountRole::User).await;
    let second = create_account(&uow, "user_second", AccountRole::User).await;

    let slot = publish_slot(&services, &provider, 1).await;

    services
        .appointments()
        .book(
            actor_of(&first),
            BookAppointment {
                slot_id: slot.id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await
        .expect("first booking failed");

    let err = services
        .appointments()
        .book(
            actor_of(&second),
            BookAppointment {
                slot_id: slot.id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let mine = services
        .appointments()
        .my_appointments(actor_of(&second), false)
        .await
        .unwrap();
    assert!(mine.is_empty());
}

#[tokio::test]
async fn providers_cannot_book() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let other_provider = create_account(&uow, "provider_q", AccountRole::Provider).await;

    let slot = publish_slot(&services, &provider, 1).await;

    let err = services
        .appointments()
        .book(
            actor_of(&other_provider),
            BookAppointment {
                slot_id: slot.id,
                kind: AppointmentKind::Emergency,
                comments: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn cancel_by_a_stranger_leaves_state_unchanged() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let user = create_account(&uow, "user_u", AccountRole::User).await;
    let stranger = create_account(&uow, "user_stranger", AccountRole::User).await;

    let slot = publish_slot(&services, &provider, 1).await;
    let appointment = services
        .appointments()
        .book(
            actor_of(&user),
            BookAppointment {
                slot_id: slot.id,
                kind: AppointmentKind::Consultation,
                comments: String::new(),
            },
        )
        .await
        .unwrap();

    let err = services
        .appointments()
        .cancel(actor_of(&stranger), appointment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    assert!(uow
        .appointments()
        .find_by_id(appointment.id)
        .await
        .unwrap()
        .is_some());
    assert!(!uow.slots().find_by_id(slot.id).await.unwrap().unwrap().is_available);
}

#[tokio::test]
async fn the_owning_provider_can_cancel() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let user = create_account(&uow, "user_u", AccountRole::User).await;

    let slot = publish_slot(&services, &provider, 1).await;
    let appointment = services
        .appointments()
        .book(
            actor_of(&user),
            BookAppointment {
                slot_id: slot.id,
                kind: AppointmentKind::Consultation,
                comments: String::new(),
            },
        )
        .await
        .unwrap();

    services
        .appointments()
        .cancel(actor_of(&provider), appointment.id)
        .await
        .expect("provider cancel failed");

    assert!(uow.slots().find_by_id(slot.id).await.unwrap().unwrap().is_available);
}

#[tokio::test]
async fn rescheduling_swaps_both_slots_atomically() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let user = create_account(&uow, "user_u", AccountRole::User).await;

    let old_slot = publish_slot(&services, &provider, 1).await;
    let new_slot = publish_slot(&services, &provider, 2).await;

    let appointment = services
        .appointments()
        .book(
            actor_of(&user),
            BookAppointment {
                slot_id: old_slot.id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await
        .unwrap();

    let updated = services
        .appointments()
        .reschedule(
            actor_of(&user),
            appointment.id,
            RescheduleAppointment {
                new_slot_id: new_slot.id,
                kind: AppointmentKind::Consultation,
                comments: "Moved".to_string(),
            },
        )
        .await
        .expect("reschedule failed");

    assert_eq!(updated.id, appointment.id);
    assert_eq!(updated.time_slot_id, new_slot.id);
    assert_eq!(updated.kind, AppointmentKind::Consultation);

    assert!(uow.slots().find_by_id(old_slot.id).await.unwrap().unwrap().is_available);
    assert!(!uow.slots().find_by_id(new_slot.id).await.unwrap().unwrap().is_available);
}

#[tokio::test]
async fn rescheduling_to_an_unavailable_slot_changes_nothing() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let user = create_account(&uow, "user_u", AccountRole::User).await;
    let rival = create_account(&uow, "user_rival", AccountRole::User).await;

    let my_slot = publish_slot(&services, &provider, 1).await;
    let taken_slot = publish_slot(&services, &provider, 2).await;

    services
        .appointments()
        .book(
            actor_of(&rival),
            BookAppointment {
                slot_id: taken_slot.id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await
        .unwrap();

    let appointment = services
        .appointments()
        .book(
            actor_of(&user),
            BookAppointment {
                slot_id: my_slot.id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await
        .unwrap();

    let err = services
        .appointments()
        .reschedule(
            actor_of(&user),
            appointment.id,
            RescheduleAppointment {
                new_slot_id: taken_slot.id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    // The old slot was NOT freed prematurely
    let unchanged = uow
        .appointments()
        .find_by_id(appointment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.time_slot_id, my_slot.id);
    assert!(!uow.slots().find_by_id(my_slot.id).await.unwrap().unwrap().is_available);
    assert!(!uow.slots().find_by_id(taken_slot.id).await.unwrap().unwrap().is_available);
}

#[tokio::test]
async fn rescheduling_onto_the_current_slot_is_rejected() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let user = create_account(&uow, "user_u", AccountRole::User).await;

    let slot = publish_slot(&services, &provider, 1).await;
    let appointment = services
        .appointments()
        .book(
            actor_of(&user),
            BookAppointment {
                slot_id: slot.id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await
        .unwrap();

    let err = services
        .appointments()
        .reschedule(
            actor_of(&user),
            appointment.id,
            RescheduleAppointment {
                new_slot_id: slot.id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn deleting_a_booked_slot_cancels_its_appointments() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let user = create_account(&uow, "user_u", AccountRole::User).await;

    let slot = publish_slot(&services, &provider, 1).await;
    let appointment = services
        .appointments()
        .book(
            actor_of(&user),
            BookAppointment {
                slot_id: slot.id,
                kind: AppointmentKind::Consultation,
                comments: String::new(),
            },
        )
        .await
        .unwrap();

    services
        .slots()
        .delete(actor_of(&provider), slot.id)
        .await
        .expect("slot deletion failed");

    assert!(uow.slots().find_by_id(slot.id).await.unwrap().is_none());
    assert!(uow
        .appointments()
        .find_by_id(appointment.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn deleting_another_providers_slot_is_forbidden() {
    let (services, uow) = setup().await;
    let owner = create_account(&uow, "provider_owner", AccountRole::Provider).await;
    let intruder = create_account(&uow, "provider_intruder", AccountRole::Provider).await;

    let slot = publish_slot(&services, &owner, 1).await;

    let err = services
        .slots()
        .delete(actor_of(&intruder), slot.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    assert!(uow.slots().find_by_id(slot.id).await.unwrap().is_some());
}

#[tokio::test]
async fn recurring_publication_creates_one_slot_per_week_and_weekday() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;

    let start = chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    let end = chrono::NaiveTime::from_hms_opt(11, 0, 0).unwrap();

    let slots = services
        .slots()
        .publish_recurring(
            actor_of(&provider),
            RecurringSlots {
                start_time_of_day: start,
                end_time_of_day: end,
                weekdays: vec!["Monday".to_string(), "Wednesday".to_string()],
                num_weeks: 2,
            },
        )
        .await
        .expect("recurring publication failed");

    assert_eq!(slots.len(), 4);

    let today = Utc::now().date_naive();
    for slot in &slots {
        let weekday = slot.start_time.date_naive().weekday();
        assert!(weekday == Weekday::Mon || weekday == Weekday::Wed);
        assert!(slot.start_time.date_naive() >= today);
        assert_eq!(slot.start_time.time().hour(), 10);
        assert_eq!(slot.end_time.time().hour(), 11);
        assert!(slot.is_available);
    }

    // All four were persisted
    let stored = services.slots().my_slots(actor_of(&provider)).await.unwrap();
    assert_eq!(stored.len(), 4);
}

#[tokio::test]
async fn availability_listing_filters_by_provider_and_date() {
    let (services, uow) = setup().await;
    let provider_a = create_account(&uow, "provider_a", AccountRole::Provider).await;
    let provider_b = create_account(&uow, "provider_b", AccountRole::Provider).await;

    let slot_a = publish_slot(&services, &provider_a, 1).await;
    let slot_b = publish_slot(&services, &provider_b, 2).await;

    let only_a = services
        .slots()
        .list_available(Some(provider_a.id), None)
        .await
        .unwrap();
    assert_eq!(only_a.len(), 1);
    assert_eq!(only_a[0].id, slot_a.id);

    let day_b = slot_b.start_time.date_naive();
    let on_day_b = services.slots().list_available(None, Some(day_b)).await.unwrap();
    assert!(on_day_b.iter().any(|s| s.id == slot_b.id));
    assert!(on_day_b.iter().all(|s| s.start_time.date_naive() == day_b));
}

#[tokio::test]
async fn providers_see_bookings_against_their_slots() {
    let (services, uow) = setup().await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;
    let user = create_account(&uow, "user_u", AccountRole::User).await;

    let slot = publish_slot(&services, &provider, 1).await;
    services
        .appointments()
        .book(
            actor_of(&user),
            BookAppointment {
                slot_id: slot.id,
                kind: AppointmentKind::Consultation,
                comments: String::new(),
            },
        )
        .await
        .unwrap();

    let seen_by_provider = services
        .appointments()
        .my_appointments(actor_of(&provider), false)
        .await
        .unwrap();
    assert_eq!(seen_by_provider.len(), 1);
    assert_eq!(seen_by_provider[0].slot.id, slot.id);

    // A booking against an unknown slot id is a NotFound, not a crash
    let err = services
        .appointments()
        .book(
            actor_of(&user),
            BookAppointment {
                slot_id: Uuid::new_v4(),
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
