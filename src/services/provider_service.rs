//! Provider directory service - browsing and provider detail pages.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{ProviderProfile, Specialty, TimeSlot};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// A provider's public page: profile plus published slots
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderPage {
    pub profile: ProviderProfile,
    pub slots: Vec<TimeSlot>,
}

/// Provider directory operations.
#[async_trait]
pub trait ProviderService: Send + Sync {
    /// Browse providers with optional specialization and address filters
    async fn browse(
        &self,
        specialty: Option<Specialty>,
        address_query: Option<String>,
    ) -> AppResult<Vec<ProviderProfile>>;

    /// A provider's public page
    async fn detail(&self, provider_id: Uuid) -> AppResult<ProviderPage>;
}

/// Concrete implementation of ProviderService using Unit of Work.
pub struct ProviderDirectory<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProviderDirectory<U> {
    /// Create new provider directory instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProviderService for ProviderDirectory<U> {
    async fn browse(
        &self,
        specialty: Option<Specialty>,
        address_query: Option<String>,
    ) -> AppResult<Vec<ProviderProfile>> {
        self.uow.profiles().browse_providers(specialty, address_query).await
    }

    async fn detail(&self, provider_id: Uuid) -> AppResult<ProviderPage> {
        let account = self
            .uow
            .accounts()
            .find_by_id(provider_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !account.is_provider() {
            return Err(AppError::NotFound);
        }

        let profiles = self.uow.profiles();
        let slots = self.uow.slots();

        let (detail, slots) = parallel::join2(
            profiles.find_provider_detail(provider_id),
            slots.list_by_provider(provider_id),
        )
        .await?;

        let detail = detail.ok_or(AppError::NotFound)?;

        Ok(ProviderPage {
            profile: ProviderProfile {
                account: account.into(),
                detail,
            },
            slots,
        })
    }
}
