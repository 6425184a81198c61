//! Message repository - immutable direct-message log.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::message;
use crate::domain::DirectMessage;
use crate::errors::{AppError, AppResult};

/// Direct-message log. Messages are immutable; no deletion path exists.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message with a server-assigned timestamp
    async fn create(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> AppResult<DirectMessage>;

    /// Both directions of a two-party conversation, oldest first
    async fn conversation(&self, a: Uuid, b: Uuid) -> AppResult<Vec<DirectMessage>>;
}

/// SeaORM-backed implementation of [`MessageRepository`]
pub struct MessageStore {
    db: DatabaseConnection,
}

impl MessageStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageRepository for MessageStore {
    async fn create(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> AppResult<DirectMessage> {
        let active = message::ActiveModel {
            id: Set(Uuid::new_v4()),
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            content: Set(content),
            sent_at: Set(Utc::now()),
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(DirectMessage::from(model))
    }

    async fn conversation(&self, a: Uuid, b: Uuid) -> AppResult<Vec<DirectMessage>> {
        let models = message::Entity::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(a))
                            .add(message::Column::ReceiverId.eq(b)),
                    )
                    .add(
                        Condition::all()
                            .add(message::Column::SenderId.eq(b))
                            .add(message::Column::ReceiverId.eq(a)),
                    ),
            )
            .order_by_asc(message::Column::SentAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(DirectMessage::from).collect())
    }
}
