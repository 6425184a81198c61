//! Messaging service - friendships and direct messages.
//!
//! Friend requests are directed contact edges; acceptance mirrors the edge
//! so both directions exist. Messaging is not gated on friendship.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{AccountResponse, Actor, Contact, DirectMessage, FriendRequestView};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Friendship and direct-message operations.
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Send a friend request; rejected if already mutual friends
    async fn send_friend_request(&self, actor: Actor, friend_id: Uuid) -> AppResult<Contact>;

    /// Accept a pending request addressed to the actor
    async fn accept_friend_request(&self, actor: Actor, request_id: Uuid) -> AppResult<()>;

    /// Remove an accepted friendship in both directions
    async fn remove_friend(&self, actor: Actor, friend_id: Uuid) -> AppResult<()>;

    /// The actor's accepted friends
    async fn friends(&self, actor: Actor) -> AppResult<Vec<AccountResponse>>;

    /// Pending requests addressed to the actor
    async fn incoming_requests(&self, actor: Actor) -> AppResult<Vec<FriendRequestView>>;

    /// Send a direct message
    async fn send_message(
        &self,
        actor: Actor,
        receiver_id: Uuid,
        content: String,
    ) -> AppResult<DirectMessage>;

    /// Both directions of the conversation with a partner, oldest first
    async fn conversation(&self, actor: Actor, partner_id: Uuid)
        -> AppResult<Vec<DirectMessage>>;
}

/// Concrete implementation of MessagingService using Unit of Work.
pub struct Messenger<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Messenger<U> {
    /// Create new messaging service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_account_exists(&self, id: Uuid) -> AppResult<crate::domain::Account> {
        self.uow
            .accounts()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl<U: UnitOfWork> MessagingService for Messenger<U> {
    async fn send_friend_request(&self, actor: Actor, friend_id: Uuid) -> AppResult<Contact> {
        if friend_id == actor.id {
            return Err(AppError::validation("You cannot befriend yourself"));
        }

        let friend = self.ensure_account_exists(friend_id).await?;

        if self
            .uow
            .contacts()
            .mutual_friendship_exists(actor.id, friend_id)
            .await?
        {
            return Err(AppError::conflict(format!(
                "You are already friends with {}",
                friend.username
            )));
        }

        let (contact, _created) = self
            .uow
            .contacts()
            .get_or_create_request(actor.id, friend_id)
            .await?;

        Ok(contact)
    }

    async fn accept_friend_request(&self, actor: Actor, request_id: Uuid) -> AppResult<()> {
        let contact = self
            .uow
            .contacts()
            .find_by_id(request_id)
            .await?
            .ok_or(AppError::NotFound)?;

        // Only the addressed account may accept
        if contact.friend_id != actor.id {
            return Err(AppError::NotFound);
        }

        let requester_id = contact.account_id;
        let acceptor_id = actor.id;
        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    ctx.contacts().set_friend(request_id).await?;
                    // Mirror edge so the friendship reads in both directions
                    ctx.contacts()
                        .get_or_create_friend_edge(acceptor_id, requester_id)
                        .await?;
                    Ok(())
                })
            })
            .await
    }

    async fn remove_friend(&self, actor: Actor, friend_id: Uuid) -> AppResult<()> {
        self.uow
            .contacts()
            .find_friend_edge(actor.id, friend_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let account_id = actor.id;
        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    ctx.contacts().delete_friend_edge(account_id, friend_id).await?;
                    // The reverse edge may be absent if the request was
                    // accepted before mirroring existed
                    ctx.contacts().delete_friend_edge(friend_id, account_id).await?;
                    Ok(())
                })
            })
            .await
    }

    async fn friends(&self, actor: Actor) -> AppResult<Vec<AccountResponse>> {
        let accounts = self.uow.contacts().list_friend_accounts(actor.id).await?;
        Ok(accounts.into_iter().map(AccountResponse::from).collect())
    }

    async fn incoming_requests(&self, actor: Actor) -> AppResult<Vec<FriendRequestView>> {
        self.uow.contacts().list_incoming_requests(actor.id).await
    }

    async fn send_message(
        &self,
        actor: Actor,
        receiver_id: Uuid,
        content: String,
    ) -> AppResult<DirectMessage> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Message content must not be empty"));
        }

        self.ensure_account_exists(receiver_id).await?;

        self.uow
            .messages()
            .create(actor.id, receiver_id, content)
            .await
    }

    async fn conversation(
        &self,
        actor: Actor,
        partner_id: Uuid,
    ) -> AppResult<Vec<DirectMessage>> {
        self.ensure_account_exists(partner_id).await?;
        self.uow.messages().conversation(actor.id, partner_id).await
    }
}
