//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::future::Future;
use std::sync::Arc;

use super::{
    AccountService, AppointmentService, AuthService, GroupService, MessagingService,
    ProviderService, SlotService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get account service
    fn accounts(&self) -> Arc<dyn AccountService>;

    /// Get provider directory service
    fn providers(&self) -> Arc<dyn ProviderService>;

    /// Get slot service
    fn slots(&self) -> Arc<dyn SlotService>;

    /// Get appointment service
    fn appointments(&self) -> Arc<dyn AppointmentService>;

    /// Get messaging service
    fn messaging(&self) -> Arc<dyn MessagingService>;

    /// Get group service
    fn groups(&self) -> Arc<dyn GroupService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    account_service: Arc<dyn AccountService>,
    provider_service: Arc<dyn ProviderService>,
    slot_service: Arc<dyn SlotService>,
    appointment_service: Arc<dyn AppointmentService>,
    messaging_service: Arc<dyn MessagingService>,
    group_service: Arc<dyn GroupService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{
            AccountManager, AppointmentLedger, Authenticator, GroupLedger, Messenger,
            ProviderDirectory, SlotLedger,
        };

        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            account_service: Arc::new(AccountManager::new(uow.clone())),
            provider_service: Arc::new(ProviderDirectory::new(uow.clone())),
            slot_service: Arc::new(SlotLedger::new(uow.clone())),
            appointment_service: Arc::new(AppointmentLedger::new(uow.clone())),
            messaging_service: Arc::new(Messenger::new(uow.clone())),
            group_service: Arc::new(GroupLedger::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn providers(&self) -> Arc<dyn ProviderService> {
        self.provider_service.clone()
    }

    fn slots(&self) -> Arc<dyn SlotService> {
        self.slot_service.clone()
    }

    fn appointments(&self) -> Arc<dyn AppointmentService> {
        self.appointment_service.clone()
    }

    fn messaging(&self) -> Arc<dyn MessagingService> {
        self.messaging_service.clone()
    }

    fn groups(&self) -> Arc<dyn GroupService> {
        self.group_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// Both operations run concurrently; if either fails, the error is
    /// returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(f1: F1, f2: F2, f3: F3) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }

    /// Execute a collection of homogeneous async operations in parallel.
    ///
    /// Results are returned in the same order as the input futures.
    pub async fn join_all<F, T>(futures: Vec<F>) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        let results = futures::future::join_all(futures).await;
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<i32> {
            Ok(2)
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[tokio::test]
    async fn test_parallel_join_all() {
        let futures: Vec<_> = (0..5)
            .map(|i| async move { Ok(i) as AppResult<i32> })
            .collect();
        let results = parallel::join_all(futures).await.unwrap();
        assert_eq!(results, vec![0, 1, 2, 3, 4]);
    }
}
