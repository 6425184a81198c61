//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::services::{
    AccountService, AppointmentService, AuthService, GroupService, MessagingService,
    ProviderService, ServiceContainer, Services, SlotService,
};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization with full
/// ServiceContainer and UnitOfWork support.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Account/profile service
    pub account_service: Arc<dyn AccountService>,
    /// Provider directory service
    pub provider_service: Arc<dyn ProviderService>,
    /// Slot ledger service
    pub slot_service: Arc<dyn SlotService>,
    /// Appointment lifecycle service
    pub appointment_service: Arc<dyn AppointmentService>,
    /// Friendship and direct-message service
    pub messaging_service: Arc<dyn MessagingService>,
    /// Group and invitation service
    pub group_service: Arc<dyn GroupService>,
    /// Redis cache (rate limiting)
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            account_service: container.accounts(),
            provider_service: container.providers(),
            slot_service: container.slots(),
            appointment_service: container.appointments(),
            messaging_service: container.messaging(),
            group_service: container.groups(),
            cache,
            database,
        }
    }

    /// Create new application state with manually injected services
    /// (used by tests with mock services).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        account_service: Arc<dyn AccountService>,
        provider_service: Arc<dyn ProviderService>,
        slot_service: Arc<dyn SlotService>,
        appointment_service: Arc<dyn AppointmentService>,
        messaging_service: Arc<dyn MessagingService>,
        group_service: Arc<dyn GroupService>,
        cache: Arc<Cache>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            account_service,
            provider_service,
            slot_service,
            appointment_service,
            messaging_service,
            group_service,
            cache,
            database,
        }
    }
}
