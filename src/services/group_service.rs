//! Group service - groups, membership, invitations, and group messages.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    Actor, Group, GroupMessage, GroupView, InvitationStatus, InvitationView, InviteOutcome,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Group and invitation lifecycle operations.
#[async_trait]
pub trait GroupService: Send + Sync {
    /// Create a group; the creator becomes a member
    async fn create(
        &self,
        actor: Actor,
        name: String,
        description: Option<String>,
    ) -> AppResult<Group>;

    /// Groups the actor is a member of
    async fn my_groups(&self, actor: Actor) -> AppResult<Vec<Group>>;

    /// A member-only group page with its message log
    async fn detail(&self, actor: Actor, group_id: Uuid) -> AppResult<GroupView>;

    /// Invite accounts into an owned group; members and duplicate pending
    /// invitations are skipped
    async fn invite(
        &self,
        actor: Actor,
        group_id: Uuid,
        targets: Vec<Uuid>,
    ) -> AppResult<Vec<InviteOutcome>>;

    /// Accept or decline a pending invitation addressed to the actor
    async fn respond(&self, actor: Actor, invitation_id: Uuid, accept: bool) -> AppResult<()>;

    /// Leave a group (idempotent)
    async fn quit(&self, actor: Actor, group_id: Uuid) -> AppResult<()>;

    /// Delete an owned group; messages, members, and invitations cascade
    async fn delete(&self, actor: Actor, group_id: Uuid) -> AppResult<()>;

    /// Post an immutable message as a member
    async fn post_message(
        &self,
        actor: Actor,
        group_id: Uuid,
        content: String,
    ) -> AppResult<GroupMessage>;

    /// Pending invitations addressed to the actor
    async fn my_invitations(&self, actor: Actor) -> AppResult<Vec<InvitationView>>;
}

/// Concrete implementation of GroupService using Unit of Work.
pub struct GroupLedger<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> GroupLedger<U> {
    /// Create new group service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find_group(&self, group_id: Uuid) -> AppResult<Group> {
        self.uow
            .groups()
            .find_by_id(group_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Load a group the actor created; others see NotFound, matching the
    /// ownership-filter semantics of the lookup
    async fn find_owned_group(&self, actor: Actor, group_id: Uuid) -> AppResult<Group> {
        let group = self.find_group(group_id).await?;
        if group.created_by != actor.id {
            return Err(AppError::NotFound);
        }
        Ok(group)
    }

    /// Load a group the actor is a member of; others see NotFound
    async fn find_member_group(&self, actor: Actor, group_id: Uuid) -> AppResult<Group> {
        let group = self.find_group(group_id).await?;
        if !self.uow.groups().is_member(group_id, actor.id).await? {
            return Err(AppError::NotFound);
        }
        Ok(group)
    }
}

#[async_trait]
impl<U: UnitOfWork> GroupService for GroupLedger<U> {
    async fn create(
        &self,
        actor: Actor,
        name: String,
        description: Option<String>,
    ) -> AppResult<Group> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Group name must not be empty"));
        }

        let creator = actor.id;
        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    let group = ctx.groups().create(name, description, creator).await?;
                    ctx.groups().add_member(group.id, creator).await?;
                    Ok(group)
                })
            })
            .await
    }

    async fn my_groups(&self, actor: Actor) -> AppResult<Vec<Group>> {
        self.uow.groups().list_for_member(actor.id).await
    }

    async fn detail(&self, actor: Actor, group_id: Uuid) -> AppResult<GroupView> {
        let group = self.find_member_group(actor, group_id).await?;
        let messages = self.uow.groups().list_messages(group_id).await?;
        Ok(GroupView { group, messages })
    }

    async fn invite(
        &self,
        actor: Actor,
        group_id: Uuid,
        targets: Vec<Uuid>,
    ) -> AppResult<Vec<InviteOutcome>> {
        self.find_owned_group(actor, group_id).await?;

        // Every target must name a real account
        for target in &targets {
            self.uow
                .accounts()
                .find_by_id(*target)
                .await?
                .ok_or(AppError::NotFound)?;
        }

        let members = self.uow.groups().list_member_ids(group_id).await?;

        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    let mut outcomes = Vec::with_capacity(targets.len());
                    for target in targets {
                        if members.contains(&target) {
                            outcomes.push(InviteOutcome {
                                account_id: target,
                                outcome: "already_member".to_string(),
                            });
                            continue;
                        }

                        let (_, created) = ctx
                            .groups()
                            .get_or_create_pending_invitation(group_id, target)
                            .await?;

                        outcomes.push(InviteOutcome {
                            account_id: target,
                            outcome: if created {
                                "invited".to_string()
                            } else {
                                "already_invited".to_string()
                            },
                        });
                    }
                    Ok(outcomes)
                })
            })
            .await
    }

    async fn respond(&self, actor: Actor, invitation_id: Uuid, accept: bool) -> AppResult<()> {
        let invitation = self
            .uow
            .groups()
            .find_invitation(invitation_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if invitation.account_id != actor.id {
            return Err(AppError::NotFound);
        }

        if invitation.status != InvitationStatus::Pending {
            return Err(AppError::conflict("Invitation has already been answered"));
        }

        let group_id = invitation.group_id;
        let target = actor.id;
        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    if accept {
                        ctx.groups().add_member(group_id, target).await?;
                        ctx.groups()
                            .set_invitation_status(invitation_id, InvitationStatus::Accepted)
                            .await?;
                    } else {
                        // Declining leaves membership untouched
                        ctx.groups()
                            .set_invitation_status(invitation_id, InvitationStatus::Declined)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
    }

    async fn quit(&self, actor: Actor, group_id: Uuid) -> AppResult<()> {
        self.find_group(group_id).await?;
        self.uow.groups().remove_member(group_id, actor.id).await
    }

    async fn delete(&self, actor: Actor, group_id: Uuid) -> AppResult<()> {
        self.find_owned_group(actor, group_id).await?;
        self.uow.groups().delete(group_id).await
    }

    async fn post_message(
        &self,
        actor: Actor,
        group_id: Uuid,
        content: String,
    ) -> AppResult<GroupMessage> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Message content must not be empty"));
        }

        self.find_member_group(actor, group_id).await?;
        self.uow
            .groups()
            .create_message(group_id, actor.id, content)
            .await
    }

    async fn my_invitations(&self, actor: Actor) -> AppResult<Vec<InvitationView>> {
        self.uow.groups().list_pending_invitations(actor.id).await
    }
}
