//! Contact repository - friend-request/friendship edges.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::entities::{account, contact};
use crate::domain::{Account, Contact, FriendRequestView};
use crate::errors::{AppError, AppResult};

/// Contact ledger reads and the get-or-create request path.
/// Accept/remove transitions run through the Unit of Work.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Find contact edge by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contact>>;

    /// True if an accepted friendship row exists in either direction
    async fn mutual_friendship_exists(&self, a: Uuid, b: Uuid) -> AppResult<bool>;

    /// Get or create the pending request edge; returns false if it existed
    async fn get_or_create_request(
        &self,
        account_id: Uuid,
        friend_id: Uuid,
    ) -> AppResult<(Contact, bool)>;

    /// Find the accepted edge account -> friend, if any
    async fn find_friend_edge(&self, account_id: Uuid, friend_id: Uuid)
        -> AppResult<Option<Contact>>;

    /// Accounts this account holds an accepted edge towards
    async fn list_friend_accounts(&self, account_id: Uuid) -> AppResult<Vec<Account>>;

    /// Pending requests addressed to this account, with requester profiles
    async fn list_incoming_requests(&self, account_id: Uuid)
        -> AppResult<Vec<FriendRequestView>>;
}

/// SeaORM-backed implementation of [`ContactRepository`]
pub struct ContactStore {
    db: DatabaseConnection,
}

impl ContactStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepository for ContactStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Contact>> {
        let result = contact::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Contact::from))
    }

    async fn mutual_friendship_exists(&self, a: Uuid, b: Uuid) -> AppResult<bool> {
        let existing = contact::Entity::find()
            .filter(contact::Column::IsFriend.eq(true))
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(contact::Column::AccountId.eq(a))
                            .add(contact::Column::FriendId.eq(b)),
                    )
                    .add(
                        Condition::all()
                            .add(contact::Column::AccountId.eq(b))
                            .add(contact::Column::FriendId.eq(a)),
                    ),
            )
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(existing.is_some())
    }

    async fn get_or_create_request(
        &self,
        account_id: Uuid,
        friend_id: Uuid,
    ) -> AppResult<(Contact, bool)> {
        let existing = contact::Entity::find()
            .filter(contact::Column::AccountId.eq(account_id))
            .filter(contact::Column::FriendId.eq(friend_id))
            .filter(contact::Column::IsFriend.eq(false))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        if let Some(model) = existing {
            return Ok((Contact::from(model), false));
        }

        let active = contact::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(account_id),
            friend_id: Set(friend_id),
            is_friend: Set(false),
        };
        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok((Contact::from(model), true))
    }

    async fn find_friend_edge(
        &self,
        account_id: Uuid,
        friend_id: Uuid,
    ) -> AppResult<Option<Contact>> {
        let result = contact::Entity::find()
            .filter(contact::Column::AccountId.eq(account_id))
            .filter(contact::Column::FriendId.eq(friend_id))
            .filter(contact::Column::IsFriend.eq(true))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Contact::from))
    }

    async fn list_friend_accounts(&self, account_id: Uuid) -> AppResult<Vec<Account>> {
        let edges = contact::Entity::find()
            .filter(contact::Column::AccountId.eq(account_id))
            .filter(contact::Column::IsFriend.eq(true))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if edges.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = edges.into_iter().map(|e| e.friend_id).collect();
        let accounts = account::Entity::find()
            .filter(account::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(accounts.into_iter().map(Account::from).collect())
    }

    async fn list_incoming_requests(
        &self,
        account_id: Uuid,
    ) -> AppResult<Vec<FriendRequestView>> {
        let edges = contact::Entity::find()
            .filter(contact::Column::FriendId.eq(account_id))
            .filter(contact::Column::IsFriend.eq(false))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if edges.is_empty() {
            return Ok(Vec::new());
        }

        let requester_ids: Vec<Uuid> = edges.iter().map(|e| e.account_id).collect();
        let requesters: HashMap<Uuid, Account> = account::Entity::find()
            .filter(account::Column::Id.is_in(requester_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, Account::from(m)))
            .collect();

        let views = edges
            .into_iter()
            .filter_map(|edge| {
                requesters.get(&edge.account_id).map(|acct| FriendRequestView {
                    contact: Contact::from(edge),
                    requester: acct.clone().into(),
                })
            })
            .collect();

        Ok(views)
    }
}
