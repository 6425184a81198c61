//! Service unit tests against mocked repositories.
//!
//! Transactional effects are covered by the SQLite integration suite;
//! these tests pin down the validation and authorization paths that fail
//! before any transaction begins.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveTime, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use calmseek::domain::{Account, AccountRole, Actor, AppointmentKind, TimeSlot};
use calmseek::errors::{AppError, AppResult};
use calmseek::infra::{
    AccountRepository, AppointmentRepository, ContactRepository, GroupRepository,
    MessageRepository, MockAccountRepository, MockAppointmentRepository, MockContactRepository,
    MockGroupRepository, MockMessageRepository, MockProfileRepository, MockSlotRepository,
    ProfileRepository, SlotRepository, TransactionContext, UnitOfWork,
};
use calmseek::services::{
    AppointmentLedger, AppointmentService, BookAppointment, Messenger, MessagingService,
    RecurringSlots, RescheduleAppointment, SlotLedger, SlotService,
};

/// Test Unit of Work wrapping mock repositories.
///
/// Transactions are not supported; paths under test must fail before
/// reaching one.
struct TestUnitOfWork {
    accounts: Arc<MockAccountRepository>,
    profiles: Arc<MockProfileRepository>,
    slots: Arc<MockSlotRepository>,
    appointments: Arc<MockAppointmentRepository>,
    contacts: Arc<MockContactRepository>,
    messages: Arc<MockMessageRepository>,
    groups: Arc<MockGroupRepository>,
}

impl TestUnitOfWork {
    fn new() -> Self {
        Self {
            accounts: Arc::new(MockAccountRepository::new()),
            profiles: Arc::new(MockProfileRepository::new()),
            slots: Arc::new(MockSlotRepository::new()),
            appointments: Arc::new(MockAppointmentRepository::new()),
            contacts: Arc::new(MockContactRepository::new()),
            messages: Arc::new(MockMessageRepository::new()),
            groups: Arc::new(MockGroupRepository::new()),
        }
    }

    fn with_slots(mut self, slots: MockSlotRepository) -> Self {
        self.slots = Arc::new(slots);
        self
    }

    fn with_appointments(mut self, appointments: MockAppointmentRepository) -> Self {
        self.appointments = Arc::new(appointments);
        self
    }

    fn with_accounts(mut self, accounts: MockAccountRepository) -> Self {
        self.accounts = Arc::new(accounts);
        self
    }

    fn with_contacts(mut self, contacts: MockContactRepository) -> Self {
        self.contacts = Arc::new(contacts);
        self
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.accounts.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profiles.clone()
    }

    fn slots(&self) -> Arc<dyn SlotRepository> {
        self.slots.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentRepository> {
        self.appointments.clone()
    }

    fn contacts(&self) -> Arc<dyn ContactRepository> {
        self.contacts.clone()
    }

    fn messages(&self) -> Arc<dyn MessageRepository> {
        self.messages.clone()
    }

    fn groups(&self) -> Arc<dyn GroupRepository> {
        self.groups.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn provider_actor() -> Actor {
    Actor::new(Uuid::new_v4(), AccountRole::Provider)
}

fn user_actor() -> Actor {
    Actor::new(Uuid::new_v4(), AccountRole::User)
}

fn test_slot(provider_id: Uuid, available: bool) -> TimeSlot {
    let start = Utc::now() + Duration::days(1);
    TimeSlot {
        id: Uuid::new_v4(),
        provider_id,
        start_time: start,
        end_time: start + Duration::hours(1),
        is_available: available,
    }
}

fn test_account(id: Uuid, role: AccountRole) -> Account {
    Account {
        id,
        username: "someone".to_string(),
        email: "someone@example.com".to_string(),
        password_hash: "hashed".to_string(),
        first_name: "Some".to_string(),
        last_name: "One".to_string(),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn publishing_requires_the_provider_role() {
    let service = SlotLedger::new(Arc::new(TestUnitOfWork::new()));

    let start = Utc::now();
    let result = service.publish(user_actor(), start, start + Duration::hours(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn publishing_rejects_a_reversed_window() {
    let service = SlotLedger::new(Arc::new(TestUnitOfWork::new()));

    let start = Utc::now();
    let result = service.publish(provider_actor(), start, start - Duration::hours(1)).await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn recurring_publication_validates_its_inputs() {
    let service = SlotLedger::new(Arc::new(TestUnitOfWork::new()));
    let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    let eleven = NaiveTime::from_hms_opt(11, 0, 0).unwrap();

    let no_days = service
        .publish_recurring(
            provider_actor(),
            RecurringSlots {
                start_time_of_day: ten,
                end_time_of_day: eleven,
                weekdays: vec![],
                num_weeks: 1,
            },
        )
        .await;
    assert!(matches!(no_days.unwrap_err(), AppError::Validation(_)));

    let no_weeks = service
        .publish_recurring(
            provider_actor(),
            RecurringSlots {
                start_time_of_day: ten,
                end_time_of_day: eleven,
                weekdays: vec!["Monday".to_string()],
                num_weeks: 0,
            },
        )
        .await;
    assert!(matches!(no_weeks.unwrap_err(), AppError::Validation(_)));

    let bad_day = service
        .publish_recurring(
            provider_actor(),
            RecurringSlots {
                start_time_of_day: ten,
                end_time_of_day: eleven,
                weekdays: vec!["Caturday".to_string()],
                num_weeks: 1,
            },
        )
        .await;
    assert!(matches!(bad_day.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn deleting_a_missing_slot_is_not_found() {
    let mut slots = MockSlotRepository::new();
    slots.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork::new().with_slots(slots);
    let service = SlotLedger::new(Arc::new(uow));

    let result = service.delete(provider_actor(), Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn deleting_a_foreign_slot_is_forbidden() {
    let foreign_owner = Uuid::new_v4();
    let mut slots = MockSlotRepository::new();
    slots
        .expect_find_by_id()
        .returning(move |_| Ok(Some(test_slot(foreign_owner, true))));

    let uow = TestUnitOfWork::new().with_slots(slots);
    let service = SlotLedger::new(Arc::new(uow));

    let result = service.delete(provider_actor(), Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn booking_as_a_provider_is_forbidden() {
    let service = AppointmentLedger::new(Arc::new(TestUnitOfWork::new()));

    let result = service
        .book(
            provider_actor(),
            BookAppointment {
                slot_id: Uuid::new_v4(),
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn booking_an_unavailable_slot_is_not_found() {
    let slot = test_slot(Uuid::new_v4(), false);
    let slot_id = slot.id;

    let mut slots = MockSlotRepository::new();
    slots
        .expect_find_by_id()
        .with(eq(slot_id))
        .returning(move |_| Ok(Some(slot.clone())));

    let uow = TestUnitOfWork::new().with_slots(slots);
    let service = AppointmentLedger::new(Arc::new(uow));

    let result = service
        .book(
            user_actor(),
            BookAppointment {
                slot_id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn cancelling_an_unknown_appointment_is_not_found() {
    let mut appointments = MockAppointmentRepository::new();
    appointments.expect_find_view().returning(|_| Ok(None));

    let uow = TestUnitOfWork::new().with_appointments(appointments);
    let service = AppointmentLedger::new(Arc::new(uow));

    let result = service.cancel(user_actor(), Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn rescheduling_onto_the_same_slot_is_rejected_before_any_write() {
    let actor = user_actor();
    let slot = test_slot(Uuid::new_v4(), false);
    let slot_id = slot.id;
    let appointment_id = Uuid::new_v4();

    let mut appointments = MockAppointmentRepository::new();
    let actor_id = actor.id;
    appointments.expect_find_view().returning(move |id| {
        Ok(Some(calmseek::domain::AppointmentView {
            appointment: calmseek::domain::Appointment {
                id,
                user_id: actor_id,
                time_slot_id: slot_id,
                comments: String::new(),
                kind: AppointmentKind::Checkup,
                booked_on: Utc::now(),
            },
            slot: slot.clone(),
        }))
    });

    let uow = TestUnitOfWork::new().with_appointments(appointments);
    let service = AppointmentLedger::new(Arc::new(uow));

    let result = service
        .reschedule(
            actor,
            appointment_id,
            RescheduleAppointment {
                new_slot_id: slot_id,
                kind: AppointmentKind::Checkup,
                comments: String::new(),
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn listing_appointments_dispatches_by_role() {
    let provider = provider_actor();
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_list_for_provider()
        .with(eq(provider.id), eq(true))
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let uow = TestUnitOfWork::new().with_appointments(appointments);
    let service = AppointmentLedger::new(Arc::new(uow));
    assert!(service.my_appointments(provider, true).await.unwrap().is_empty());

    let user = user_actor();
    let mut appointments = MockAppointmentRepository::new();
    appointments
        .expect_list_for_user()
        .with(eq(user.id), eq(false))
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let uow = TestUnitOfWork::new().with_appointments(appointments);
    let service = AppointmentLedger::new(Arc::new(uow));
    assert!(service.my_appointments(user, false).await.unwrap().is_empty());
}

#[tokio::test]
async fn friend_requests_to_existing_friends_are_conflicts() {
    let actor = user_actor();
    let friend_id = Uuid::new_v4();

    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_find_by_id()
        .with(eq(friend_id))
        .returning(move |id| Ok(Some(test_account(id, AccountRole::User))));

    let mut contacts = MockContactRepository::new();
    contacts
        .expect_mutual_friendship_exists()
        .returning(|_, _| Ok(true));

    let uow = TestUnitOfWork::new().with_accounts(accounts).with_contacts(contacts);
    let service = Messenger::new(Arc::new(uow));

    let result = service.send_friend_request(actor, friend_id).await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn messages_to_unknown_accounts_are_not_found() {
    let mut accounts = MockAccountRepository::new();
    accounts.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork::new().with_accounts(accounts);
    let service = Messenger::new(Arc::new(uow));

    let result = service
        .send_message(user_actor(), Uuid::new_v4(), "hello".to_string())
        .await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
