//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Caching (Redis, for rate limiting)
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    AccountRepository, AccountStore, AppointmentRepository, AppointmentStore, ContactRepository,
    ContactStore, GroupRepository, GroupStore, MessageRepository, MessageStore, ProfileRepository,
    ProfileStore, SlotRepository, SlotStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxAccountRepository, TxAppointmentRepository,
    TxContactRepository, TxGroupRepository, TxSlotRepository, UnitOfWork,
};

#[cfg(feature = "test-utils")]
pub use repositories::{
    MockAccountRepository, MockAppointmentRepository, MockContactRepository, MockGroupRepository,
    MockMessageRepository, MockProfileRepository, MockSlotRepository,
};
