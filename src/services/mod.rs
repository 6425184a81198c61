//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use the Unit of Work pattern for centralized repository
//! access and transaction management.

mod account_service;
mod appointment_service;
mod auth_service;
pub mod container;
mod group_service;
mod messaging_service;
mod provider_service;
mod slot_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use account_service::{
    AccountManager, AccountService, ClientDetailUpdate, ProfileUpdate, ProfileView,
    ProviderDetailUpdate,
};
pub use appointment_service::{
    AppointmentLedger, AppointmentService, BookAppointment, RescheduleAppointment,
};
pub use auth_service::{
    AuthService, Authenticator, Claims, ProviderSignup, TokenResponse, UserSignup,
};
pub use group_service::{GroupLedger, GroupService};
pub use messaging_service::{Messenger, MessagingService};
pub use provider_service::{ProviderDirectory, ProviderPage, ProviderService};
pub use slot_service::{RecurringSlots, SlotLedger, SlotService};

// Parallel execution utilities
pub use container::parallel;
