//! Account repository - identity store access.
//!
//! Covers account lookups, credential updates, and the directed
//! favorites relation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::{account, favorite};
use crate::domain::Account;
use crate::errors::{AppError, AppResult};

/// Identity store operations.
///
/// Account creation happens inside registration transactions; this trait
/// covers the connection-scoped reads and single-row writes.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find account by unique username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Find the account matching both username and email (password reset)
    async fn find_by_username_and_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<Account>>;

    /// Update the editable account fields
    async fn update_names(
        &self,
        id: Uuid,
        first_name: String,
        last_name: String,
        email: String,
    ) -> AppResult<Account>;

    /// Replace the stored password hash
    async fn set_password_hash(&self, id: Uuid, password_hash: String) -> AppResult<()>;

    /// Add a directed favorite edge; returns false if it already existed
    async fn add_favorite(&self, account_id: Uuid, favorite_id: Uuid) -> AppResult<bool>;

    /// Remove a directed favorite edge (no-op if absent)
    async fn remove_favorite(&self, account_id: Uuid, favorite_id: Uuid) -> AppResult<()>;

    /// List the accounts this account has favorited
    async fn list_favorites(&self, account_id: Uuid) -> AppResult<Vec<Account>>;
}

/// SeaORM-backed implementation of [`AccountRepository`]
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let result = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let result = account::Entity::find()
            .filter(account::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_username_and_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<Account>> {
        let result = account::Entity::find()
            .filter(account::Column::Username.eq(username))
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn update_names(
        &self,
        id: Uuid,
        first_name: String,
        last_name: String,
        email: String,
    ) -> AppResult<Account> {
        let existing = account::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: account::ActiveModel = existing.into();
        active.first_name = Set(first_name);
        active.last_name = Set(last_name);
        active.email = Set(email);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Account::from(model))
    }

    async fn set_password_hash(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let existing = account::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: account::ActiveModel = existing.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(Utc::now());

        active.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn add_favorite(&self, account_id: Uuid, favorite_id: Uuid) -> AppResult<bool> {
        let existing = favorite::Entity::find_by_id((account_id, favorite_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        if existing.is_some() {
            return Ok(false);
        }

        let active = favorite::ActiveModel {
            account_id: Set(account_id),
            favorite_id: Set(favorite_id),
        };
        active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(true)
    }

    async fn remove_favorite(&self, account_id: Uuid, favorite_id: Uuid) -> AppResult<()> {
        favorite::Entity::delete_by_id((account_id, favorite_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn list_favorites(&self, account_id: Uuid) -> AppResult<Vec<Account>> {
        let edges = favorite::Entity::find()
            .filter(favorite::Column::AccountId.eq(account_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if edges.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = edges.into_iter().map(|e| e.favorite_id).collect();
        let accounts = account::Entity::find()
            .filter(account::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(accounts.into_iter().map(Account::from).collect())
    }
}
