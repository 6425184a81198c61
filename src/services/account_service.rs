//! Account service - profile management and favorites.
//!
//! SOLID (SRP): Handles the signed-in account's own data only.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{
    Account, AccountResponse, Actor, ClientDetail, ProviderDetail, Specialty,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// The signed-in account with its role-specific profile extension
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileView {
    pub account: AccountResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_detail: Option<ProviderDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_detail: Option<ClientDetail>,
}

/// Provider-only profile fields
#[derive(Debug, Clone)]
pub struct ProviderDetailUpdate {
    pub phone_number: String,
    pub license_number: String,
    pub specialty: Specialty,
    pub bio: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// Client-only profile fields
#[derive(Debug, Clone)]
pub struct ClientDetailUpdate {
    pub phone_number: String,
    pub bio: String,
}

/// Profile edit data
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub provider: Option<ProviderDetailUpdate>,
    pub client: Option<ClientDetailUpdate>,
}

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// The actor's profile with its role-specific extension
    async fn profile(&self, actor: Actor) -> AppResult<ProfileView>;

    /// Update the actor's account fields and role-specific extension
    async fn update_profile(&self, actor: Actor, update: ProfileUpdate) -> AppResult<ProfileView>;

    /// Favorite a provider
    async fn add_favorite(&self, actor: Actor, provider_id: Uuid) -> AppResult<()>;

    /// Remove a favorited provider (no-op if absent)
    async fn remove_favorite(&self, actor: Actor, provider_id: Uuid) -> AppResult<()>;

    /// The actor's favorited providers
    async fn list_favorites(&self, actor: Actor) -> AppResult<Vec<AccountResponse>>;
}

/// Concrete implementation of AccountService using Unit of Work.
pub struct AccountManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AccountManager<U> {
    /// Create new account service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Fetch the provider-role account named by `provider_id`
    async fn find_provider(&self, provider_id: Uuid) -> AppResult<Account> {
        let account = self
            .uow
            .accounts()
            .find_by_id(provider_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !account.is_provider() {
            return Err(AppError::NotFound);
        }

        Ok(account)
    }
}

#[async_trait]
impl<U: UnitOfWork> AccountService for AccountManager<U> {
    async fn profile(&self, actor: Actor) -> AppResult<ProfileView> {
        let accounts = self.uow.accounts();
        let profiles = self.uow.profiles();

        let (account, provider_detail, client_detail) = parallel::join3(
            accounts.find_by_id(actor.id),
            profiles.find_provider_detail(actor.id),
            profiles.find_client_detail(actor.id),
        )
        .await?;

        let account = account.ok_or(AppError::NotFound)?;

        Ok(ProfileView {
            account: account.into(),
            provider_detail,
            client_detail,
        })
    }

    async fn update_profile(&self, actor: Actor, update: ProfileUpdate) -> AppResult<ProfileView> {
        let account = self
            .uow
            .accounts()
            .update_names(actor.id, update.first_name, update.last_name, update.email)
            .await?;

        let mut provider_detail = None;
        let mut client_detail = None;

        if account.is_provider() {
            if let Some(fields) = update.provider {
                let existing = self
                    .uow
                    .profiles()
                    .find_provider_detail(actor.id)
                    .await?
                    .ok_or(AppError::NotFound)?;

                // Activation flag and picture are not edited through this path
                provider_detail = Some(
                    self.uow
                        .profiles()
                        .update_provider_detail(ProviderDetail {
                            account_id: actor.id,
                            bio: fields.bio,
                            phone_number: fields.phone_number,
                            license_number: fields.license_number,
                            specialty: fields.specialty,
                            is_activated: existing.is_activated,
                            line1: fields.line1,
                            line2: fields.line2,
                            city: fields.city,
                            state: fields.state,
                            pincode: fields.pincode,
                            picture: existing.picture,
                        })
                        .await?,
                );
            }
        } else if let Some(fields) = update.client {
            client_detail = Some(
                self.uow
                    .profiles()
                    .upsert_client_detail(ClientDetail {
                        account_id: actor.id,
                        phone_number: fields.phone_number,
                        bio: fields.bio,
                    })
                    .await?,
            );
        }

        Ok(ProfileView {
            account: account.into(),
            provider_detail,
            client_detail,
        })
    }

    async fn add_favorite(&self, actor: Actor, provider_id: Uuid) -> AppResult<()> {
        let provider = self.find_provider(provider_id).await?;

        let created = self.uow.accounts().add_favorite(actor.id, provider_id).await?;
        if !created {
            return Err(AppError::conflict(format!(
                "{} is already in your favorites",
                provider.full_name()
            )));
        }

        Ok(())
    }

    async fn remove_favorite(&self, actor: Actor, provider_id: Uuid) -> AppResult<()> {
        self.find_provider(provider_id).await?;
        self.uow.accounts().remove_favorite(actor.id, provider_id).await
    }

    async fn list_favorites(&self, actor: Actor) -> AppResult<Vec<AccountResponse>> {
        let favorites = self.uow.accounts().list_favorites(actor.id).await?;
        Ok(favorites.into_iter().map(AccountResponse::from).collect())
    }
}
