//! Profile repository - provider and client profile extensions.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::entities::{account, client_detail, provider_detail};
use crate::domain::{Account, ClientDetail, ProviderDetail, ProviderProfile, Specialty};
use crate::errors::{AppError, AppResult};

/// Profile-extension operations for provider and client accounts.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the professional metadata of a provider account
    async fn find_provider_detail(&self, account_id: Uuid) -> AppResult<Option<ProviderDetail>>;

    /// Replace the editable fields of a provider detail row
    async fn update_provider_detail(&self, detail: ProviderDetail) -> AppResult<ProviderDetail>;

    /// Find the contact profile of a client account
    async fn find_client_detail(&self, account_id: Uuid) -> AppResult<Option<ClientDetail>>;

    /// Create or update a client's contact profile
    async fn upsert_client_detail(&self, detail: ClientDetail) -> AppResult<ClientDetail>;

    /// Browse the provider directory with optional specialization and
    /// address-substring filters
    async fn browse_providers(
        &self,
        specialty: Option<Specialty>,
        address_query: Option<String>,
    ) -> AppResult<Vec<ProviderProfile>>;
}

/// SeaORM-backed implementation of [`ProfileRepository`]
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_provider_detail(&self, account_id: Uuid) -> AppResult<Option<ProviderDetail>> {
        let result = provider_detail::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ProviderDetail::from))
    }

    async fn update_provider_detail(&self, detail: ProviderDetail) -> AppResult<ProviderDetail> {
        let existing = provider_detail::Entity::find_by_id(detail.account_id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: provider_detail::ActiveModel = existing.into();
        active.bio = Set(detail.bio);
        active.phone_number = Set(detail.phone_number);
        active.license_number = Set(detail.license_number);
        active.specialty = Set(detail.specialty.as_str().to_string());
        active.line1 = Set(detail.line1);
        active.line2 = Set(detail.line2);
        active.city = Set(detail.city);
        active.state = Set(detail.state);
        active.pincode = Set(detail.pincode);
        active.picture = Set(detail.picture);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(ProviderDetail::from(model))
    }

    async fn find_client_detail(&self, account_id: Uuid) -> AppResult<Option<ClientDetail>> {
        let result = client_detail::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ClientDetail::from))
    }

    async fn upsert_client_detail(&self, detail: ClientDetail) -> AppResult<ClientDetail> {
        let existing = client_detail::Entity::find_by_id(detail.account_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let model = match existing {
            Some(model) => {
                let mut active: client_detail::ActiveModel = model.into();
                active.phone_number = Set(detail.phone_number);
                active.bio = Set(detail.bio);
                active.update(&self.db).await.map_err(AppError::from)?
            }
            None => {
                let active = client_detail::ActiveModel {
                    account_id: Set(detail.account_id),
                    phone_number: Set(detail.phone_number),
                    bio: Set(detail.bio),
                };
                active.insert(&self.db).await.map_err(AppError::from)?
            }
        };

        Ok(ClientDetail::from(model))
    }

    async fn browse_providers(
        &self,
        specialty: Option<Specialty>,
        address_query: Option<String>,
    ) -> AppResult<Vec<ProviderProfile>> {
        let mut query = provider_detail::Entity::find();

        if let Some(specialty) = specialty {
            query = query.filter(provider_detail::Column::Specialty.eq(specialty.as_str()));
        }

        if let Some(q) = address_query.filter(|q| !q.trim().is_empty()) {
            let pattern = format!("%{}%", q.trim().to_lowercase());
            let like = |col: provider_detail::Column| {
                Expr::expr(Func::lower(Expr::col(col))).like(pattern.clone())
            };
            query = query.filter(
                Condition::any()
                    .add(like(provider_detail::Column::Line1))
                    .add(like(provider_detail::Column::Line2))
                    .add(like(provider_detail::Column::City))
                    .add(like(provider_detail::Column::State))
                    .add(like(provider_detail::Column::Pincode)),
            );
        }

        let details = query.all(&self.db).await.map_err(AppError::from)?;
        if details.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = details.iter().map(|d| d.account_id).collect();
        let accounts: HashMap<Uuid, Account> = account::Entity::find()
            .filter(account::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, Account::from(m)))
            .collect();

        let profiles = details
            .into_iter()
            .filter_map(|detail| {
                accounts.get(&detail.account_id).map(|acct| ProviderProfile {
                    account: acct.clone().into(),
                    detail: ProviderDetail::from(detail),
                })
            })
            .collect();

        Ok(profiles)
    }
}
