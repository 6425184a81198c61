//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Multi-row lifecycle transitions run through the Unit of Work instead.

mod account_repository;
mod appointment_repository;
mod contact_repository;
pub(crate) mod entities;
mod group_repository;
mod message_repository;
mod profile_repository;
mod slot_repository;

pub use account_repository::{AccountRepository, AccountStore};
pub use appointment_repository::{AppointmentRepository, AppointmentStore};
pub use contact_repository::{ContactRepository, ContactStore};
pub use group_repository::{GroupRepository, GroupStore};
pub use message_repository::{MessageRepository, MessageStore};
pub use profile_repository::{ProfileRepository, ProfileStore};
pub use slot_repository::{SlotRepository, SlotStore};

// Export mocks for tests (integration suite enables the test-utils feature)
#[cfg(feature = "test-utils")]
pub use account_repository::MockAccountRepository;
#[cfg(feature = "test-utils")]
pub use appointment_repository::MockAppointmentRepository;
#[cfg(feature = "test-utils")]
pub use contact_repository::MockContactRepository;
#[cfg(feature = "test-utils")]
pub use group_repository::MockGroupRepository;
#[cfg(feature = "test-utils")]
pub use message_repository::MockMessageRepository;
#[cfg(feature = "test-utils")]
pub use profile_repository::MockProfileRepository;
#[cfg(feature = "test-utils")]
pub use slot_repository::MockSlotRepository;
