//! Group repository - groups, membership, messages, invitations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::entities::{group, group_member, group_message, invitation};
use crate::domain::{Group, GroupMessage, Invitation, InvitationStatus, InvitationView};
use crate::errors::{AppError, AppResult};

/// Group ledger reads and the immutable message log.
/// Multi-row transitions (create, invite, respond) run through the Unit of Work.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find group by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>>;

    /// Groups this account is a member of
    async fn list_for_member(&self, account_id: Uuid) -> AppResult<Vec<Group>>;

    /// True if the account is currently a member of the group
    async fn is_member(&self, group_id: Uuid, account_id: Uuid) -> AppResult<bool>;

    /// Member account ids of a group
    async fn list_member_ids(&self, group_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// The group's message log, oldest first
    async fn list_messages(&self, group_id: Uuid) -> AppResult<Vec<GroupMessage>>;

    /// Append an immutable group message
    async fn create_message(
        &self,
        group_id: Uuid,
        sender_id: Uuid,
        content: String,
    ) -> AppResult<GroupMessage>;

    /// Find invitation by ID
    async fn find_invitation(&self, id: Uuid) -> AppResult<Option<Invitation>>;

    /// Pending invitations addressed to this account, with their groups
    async fn list_pending_invitations(&self, account_id: Uuid)
        -> AppResult<Vec<InvitationView>>;

    /// Delete a group; members, messages, and invitations cascade
    async fn delete(&self, group_id: Uuid) -> AppResult<()>;

    /// Remove a member (idempotent)
    async fn remove_member(&self, group_id: Uuid, account_id: Uuid) -> AppResult<()>;
}

/// SeaORM-backed implementation of [`GroupRepository`]
pub struct GroupStore {
    db: DatabaseConnection,
}

impl GroupStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for GroupStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>> {
        let result = group::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Group::from))
    }

    async fn list_for_member(&self, account_id: Uuid) -> AppResult<Vec<Group>> {
        let memberships = group_member::Entity::find()
            .filter(group_member::Column::AccountId.eq(account_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if memberships.is_empty() {
            return Ok(Vec::new());
        }

        let group_ids: Vec<Uuid> = memberships.into_iter().map(|m| m.group_id).collect();
        let groups = group::Entity::find()
            .filter(group::Column::Id.is_in(group_ids))
            .order_by_asc(group::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(groups.into_iter().map(Group::from).collect())
    }

    async fn is_member(&self, group_id: Uuid, account_id: Uuid) -> AppResult<bool> {
        let existing = group_member::Entity::find_by_id((group_id, account_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(existing.is_some())
    }

    async fn list_member_ids(&self, group_id: Uuid) -> AppResult<Vec<Uuid>> {
        let memberships = group_member::Entity::find()
            .filter(group_member::Column::GroupId.eq(group_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(memberships.into_iter().map(|m| m.account_id).collect())
    }

    async fn list_messages(&self, group_id: Uuid) -> AppResult<Vec<GroupMessage>> {
        let models = group_message::Entity::find()
            .filter(group_message::Column::GroupId.eq(group_id))
            .order_by_asc(group_message::Column::SentAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(GroupMessage::from).collect())
    }

    async fn create_message(
        &self,
        group_id: Uuid,
        sender_id: Uuid,
        content: String,
    ) -> AppResult<GroupMessage> {
        let active = group_message::ActiveModel {
            id: Set(Uuid::new_v4()),
            group_id: Set(group_id),
            sender_id: Set(sender_id),
            content: Set(content),
            sent_at: Set(Utc::now()),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(GroupMessage::from(model))
    }

    async fn find_invitation(&self, id: Uuid) -> AppResult<Option<Invitation>> {
        let result = invitation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Invitation::from))
    }

    async fn list_pending_invitations(
        &self,
        account_id: Uuid,
    ) -> AppResult<Vec<InvitationView>> {
        let invitations = invitation::Entity::find()
            .filter(invitation::Column::AccountId.eq(account_id))
            .filter(invitation::Column::Status.eq(InvitationStatus::Pending.as_str()))
            .order_by_asc(invitation::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if invitations.is_empty() {
            return Ok(Vec::new());
        }

        let group_ids: Vec<Uuid> = invitations.iter().map(|i| i.group_id).collect();
        let groups: HashMap<Uuid, Group> = group::Entity::find()
            .filter(group::Column::Id.is_in(group_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| (m.id, Group::from(m)))
            .collect();

        let views = invitations
            .into_iter()
            .filter_map(|inv| {
                groups.get(&inv.group_id).map(|g| InvitationView {
                    invitation: Invitation::from(inv),
                    group: g.clone(),
                })
            })
            .collect();

        Ok(views)
    }

    async fn delete(&self, group_id: Uuid) -> AppResult<()> {
        let result = group::Entity::delete_by_id(group_id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn remove_member(&self, group_id: Uuid, account_id: Uuid) -> AppResult<()> {
        group_member::Entity::delete_by_id((group_id, account_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
