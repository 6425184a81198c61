//! Friendship, messaging, and group lifecycle integration tests.

mod common;

use calmseek::domain::{AccountRole, InvitationStatus};
use calmseek::errors::AppError;
use calmseek::infra::UnitOfWork;
use calmseek::services::ServiceContainer;

use common::{actor_of, create_account, setup};

#[tokio::test]
async fn accepting_a_friend_request_mirrors_the_edge() {
    let (services, uow) = setup().await;
    let user = create_account(&uow, "user_u", AccountRole::User).await;
    let provider = create_account(&uow, "provider_p", AccountRole::Provider).await;

    let contact = services
        .messaging()
        .send_friend_request(actor_of(&user), provider.id)
        .await
        .expect("request failed");
    assert!(!contact.is_friend);

    let incoming = services
        .messaging()
        .incoming_requests(actor_of(&provider))
        .await
        .unwrap();
    assert_eq!(incoming.len(), 1);
    assert_eq!(incoming[0].requester.id, user.id);

    services
        .messaging()
        .accept_friend_request(actor_of(&provider), contact.id)
        .await
        .expect("accept failed");

    // Both directed edges exist and are accepted
    assert!(uow
        .contacts()
        .find_friend_edge(user.id, provider.id)
        .await
        .unwrap()
        .is_some());
    assert!(uow
        .contacts()
        .find_friend_edge(provider.id, user.id)
        .await
        .unwrap()
        .is_some());

    let friends_of_user = services.messaging().friends(actor_of(&user)).await.unwrap();
    assert_eq!(friends_of_user.len(), 1);
    assert_eq!(friends_of_user[0].id, provider.id);
}

#[tokio::test]
async fn requesting_an_existing_friend_is_a_conflict_and_adds_no_row() {
    let (services, uow) = setup().await;
    let a = create_account(&uow, "user_a", AccountRole::User).await;
    let b = create_account(&uow, "user_b", AccountRole::User).await;

    let contact = services
        .messaging()
        .send_friend_request(actor_of(&a), b.id)
        .await
        .unwrap();
    services
        .messaging()
        .accept_friend_request(actor_of(&b), contact.id)
        .await
        .unwrap();

    // Both directions are rejected once the friendship is mutual
    let err = services
        .messaging()
        .send_friend_request(actor_of(&a), b.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let err = services
        .messaging()
        .send_friend_request(actor_of(&b), a.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    assert!(services
        .messaging()
        .incoming_requests(actor_of(&b))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn repeated_pending_requests_collapse_into_one_row() {
    let (services, uow) = setup().await;
    let a = create_account(&uow, "user_a", AccountRole::User).await;
    let b = create_account(&uow, "user_b", AccountRole::User).await;

    let first = services
        .messaging()
        .send_friend_request(actor_of(&a), b.id)
        .await
        .unwrap();
    let second = services
        .messaging()
        .send_friend_request(actor_of(&a), b.id)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(
        services
            .messaging()
            .incoming_requests(actor_of(&b))
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn self_friend_requests_are_rejected() {
    let (services, uow) = setup().await;
    let a = create_account(&uow, "user_a", AccountRole::User).await;

    let err = services
        .messaging()
        .send_friend_request(actor_of(&a), a.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn removing_a_friend_deletes_both_edges() {
    let (services, uow) = setup().await;
    let a = create_account(&uow, "user_a", AccountRole::User).await;
    let b = create_account(&uow, "user_b", AccountRole::User).await;

    let contact = services
        .messaging()
        .send_friend_request(actor_of(&a), b.id)
        .await
        .unwrap();
    services
        .messaging()
        .accept_friend_request(actor_of(&b), contact.id)
        .await
        .unwrap();

    services
        .messaging()
        .remove_friend(actor_of(&a), b.id)
        .await
        .expect("remove failed");

    assert!(uow.contacts().find_friend_edge(a.id, b.id).await.unwrap().is_none());
    assert!(uow.contacts().find_friend_edge(b.id, a.id).await.unwrap().is_none());
    assert!(services.messaging().friends(actor_of(&b)).await.unwrap().is_empty());
}

#[tokio::test]
async fn messaging_works_without_friendship() {
    let (services, uow) = setup().await;
    let a = create_account(&uow, "user_a", AccountRole::User).await;
    let b = create_account(&uow, "user_b", AccountRole::User).await;

    services
        .messaging()
        .send_message(actor_of(&a), b.id, "Hello".to_string())
        .await
        .expect("send failed");
    services
        .messaging()
        .send_message(actor_of(&b), a.id, "Hi back".to_string())
        .await
        .expect("reply failed");

    // The conversation reads the same from both sides, oldest first
    let seen_by_a = services.messaging().conversation(actor_of(&a), b.id).await.unwrap();
    let seen_by_b = services.messaging().conversation(actor_of(&b), a.id).await.unwrap();

    assert_eq!(seen_by_a.len(), 2);
    assert_eq!(seen_by_a[0].content, "Hello");
    assert_eq!(seen_by_a[1].content, "Hi back");
    assert_eq!(seen_by_a.len(), seen_by_b.len());
}

#[tokio::test]
async fn creating_a_group_makes_the_creator_a_member() {
    let (services, uow) = setup().await;
    let creator = create_account(&uow, "user_creator", AccountRole::User).await;

    let group = services
        .groups()
        .create(actor_of(&creator), "Support circle".to_string(), None)
        .await
        .expect("group creation failed");

    assert_eq!(group.created_by, creator.id);
    assert!(uow.groups().is_member(group.id, creator.id).await.unwrap());

    let mine = services.groups().my_groups(actor_of(&creator)).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, group.id);
}

#[tokio::test]
async fn invitation_accept_adds_membership_and_decline_does_not() {
    let (services, uow) = setup().await;
    let creator = create_account(&uow, "user_creator", AccountRole::User).await;
    let invited = create_account(&uow, "user_invited", AccountRole::User).await;
    let decliner = create_account(&uow, "user_decliner", AccountRole::User).await;

    let group = services
        .groups()
        .create(actor_of(&creator), "Circle".to_string(), None)
        .await
        .unwrap();

    let outcomes = services
        .groups()
        .invite(actor_of(&creator), group.id, vec![invited.id, decliner.id])
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.outcome == "invited"));

    let invitation_of = |account: uuid::Uuid| {
        let services = &services;
        async move {
            services
                .groups()
                .my_invitations(calmseek::domain::Actor::new(account, AccountRole::User))
                .await
                .unwrap()
                .pop()
                .expect("invitation missing")
        }
    };

    let inv_accept = invitation_of(invited.id).await;
    services
        .groups()
        .respond(actor_of(&invited), inv_accept.invitation.id, true)
        .await
        .expect("accept failed");
    assert!(uow.groups().is_member(group.id, invited.id).await.unwrap());
    assert_eq!(
        uow.groups()
            .find_invitation(inv_accept.invitation.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        InvitationStatus::Accepted
    );

    let inv_decline = invitation_of(decliner.id).await;
    services
        .groups()
        .respond(actor_of(&decliner), inv_decline.invitation.id, false)
        .await
        .expect("decline failed");
    assert!(!uow.groups().is_member(group.id, decliner.id).await.unwrap());
    assert_eq!(
        uow.groups()
            .find_invitation(inv_decline.invitation.id)
            .await
            .unwrap()
            .unwrap()
            .status,
        InvitationStatus::Declined
    );

    // A declined invitation does not block a fresh one
    let outcomes = services
        .groups()
        .invite(actor_of(&creator), group.id, vec![decliner.id])
        .await
        .unwrap();
    assert_eq!(outcomes[0].outcome, "invited");
}

#[tokio::test]
async fn duplicate_pending_invitations_are_suppressed() {
    let (services, uow) = setup().await;
    let creator = create_account(&uow, "user_creator", AccountRole::User).await;
    let invited = create_account(&uow, "user_invited", AccountRole::User).await;

    let group = services
        .groups()
        .create(actor_of(&creator), "Circle".to_string(), None)
        .await
        .unwrap();

    services
        .groups()
        .invite(actor_of(&creator), group.id, vec![invited.id])
        .await
        .unwrap();
    let outcomes = services
        .groups()
        .invite(actor_of(&creator), group.id, vec![invited.id])
        .await
        .unwrap();
    assert_eq!(outcomes[0].outcome, "already_invited");

    // Members are skipped entirely
    let outcomes = services
        .groups()
        .invite(actor_of(&creator), group.id, vec![creator.id])
        .await
        .unwrap();
    assert_eq!(outcomes[0].outcome, "already_member");
}

#[tokio::test]
async fn only_the_creator_invites_and_deletes() {
    let (services, uow) = setup().await;
    let creator = create_account(&uow, "user_creator", AccountRole::User).await;
    let outsider = create_account(&uow, "user_outsider", AccountRole::User).await;

    let group = services
        .groups()
        .create(actor_of(&creator), "Circle".to_string(), None)
        .await
        .unwrap();

    let err = services
        .groups()
        .invite(actor_of(&outsider), group.id, vec![outsider.id])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = services
        .groups()
        .delete(actor_of(&outsider), group.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert!(uow.groups().find_by_id(group.id).await.unwrap().is_some());
}

#[tokio::test]
async fn group_messages_require_membership() {
    let (services, uow) = setup().await;
    let creator = create_account(&uow, "user_creator", AccountRole::User).await;
    let outsider = create_account(&uow, "user_outsider", AccountRole::User).await;

    let group = services
        .groups()
        .create(actor_of(&creator), "Circle".to_string(), None)
        .await
        .unwrap();

    let err = services
        .groups()
        .post_message(actor_of(&outsider), group.id, "hi".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    services
        .groups()
        .post_message(actor_of(&creator), group.id, "welcome".to_string())
        .await
        .expect("member post failed");

    let view = services.groups().detail(actor_of(&creator), group.id).await.unwrap();
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].content, "welcome");

    // Non-members cannot read the page either
    let err = services
        .groups()
        .detail(actor_of(&outsider), group.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn quitting_is_idempotent_and_deletion_cascades() {
    let (services, uow) = setup().await;
    let creator = create_account(&uow, "user_creator", AccountRole::User).await;
    let member = create_account(&uow, "user_member", AccountRole::User).await;

    let group = services
        .groups()
        .create(actor_of(&creator), "Circle".to_string(), None)
        .await
        .unwrap();

    let outcomes = services
        .groups()
        .invite(actor_of(&creator), group.id, vec![member.id])
        .await
        .unwrap();
    let invitation_id = {
        assert_eq!(outcomes[0].outcome, "invited");
        services
            .groups()
            .my_invitations(actor_of(&member))
            .await
            .unwrap()[0]
            .invitation
            .id
    };
    services
        .groups()
        .respond(actor_of(&member), invitation_id, true)
        .await
        .unwrap();

    services.groups().quit(actor_of(&member), group.id).await.unwrap();
    // A second quit is a no-op
    services.groups().quit(actor_of(&member), group.id).await.unwrap();
    assert!(!uow.groups().is_member(group.id, member.id).await.unwrap());

    services
        .groups()
        .post_message(actor_of(&creator), group.id, "bye".to_string())
        .await
        .unwrap();

    services
        .groups()
        .delete(actor_of(&creator), group.id)
        .await
        .expect("delete failed");

    assert!(uow.groups().find_by_id(group.id).await.unwrap().is_none());
    assert!(uow.groups().find_invitation(invitation_id).await.unwrap().is_none());
    assert!(uow.groups().list_messages(group.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn answered_invitations_cannot_be_answered_again() {
    let (services, uow) = setup().await;
    let creator = create_account(&uow, "user_creator", AccountRole::User).await;
    let invited = create_account(&uow, "user_invited", AccountRole::User).await;

    let group = services
        .groups()
        .create(actor_of(&creator), "Circle".to_string(), None)
        .await
        .unwrap();
    services
        .groups()
        .invite(actor_of(&creator), group.id, vec![invited.id])
        .await
        .unwrap();

    let invitation_id = services
        .groups()
        .my_invitations(actor_of(&invited))
        .await
        .unwrap()[0]
        .invitation
        .id;

    services
        .groups()
        .respond(actor_of(&invited), invitation_id, false)
        .await
        .unwrap();

    let err = services
        .groups()
        .respond(actor_of(&invited), invitation_id, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}
