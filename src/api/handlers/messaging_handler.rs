//! Messaging handlers: contacts (friendships) and direct messages.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{AccountResponse, Contact, DirectMessage, FriendRequestView};
use crate::errors::AppResult;
use crate::types::{MessageResponse, NoContent};

/// Friend request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FriendRequestPayload {
    /// Target account id
    pub friend_id: Uuid,
}

/// Direct message payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    /// Receiving account id
    pub receiver_id: Uuid,
    /// Message text
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    #[schema(example = "See you Monday at 10.", max_length = 4000)]
    pub content: String,
}

/// Create contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_friends))
        .route("/requests", get(list_requests).post(send_request))
        .route("/requests/:request_id/accept", post(accept_request))
        .route("/:friend_id", axum::routing::delete(remove_friend))
}

/// Create message routes
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(send_message))
        .route("/:partner_id", get(conversation))
}

/// List accepted friends
#[utoipa::path(
    get,
    path = "/contacts",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Accepted friends", body = [AccountResponse])
    )
)]
pub async fn list_friends(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let friends = state.messaging_service.friends(user.actor()).await?;
    Ok(Json(friends))
}

/// List pending friend requests addressed to the actor
#[utoipa::path(
    get,
    path = "/contacts/requests",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending requests", body = [FriendRequestView])
    )
)]
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<FriendRequestView>>> {
    let requests = state
        .messaging_service
        .incoming_requests(user.actor())
        .await?;
    Ok(Json(requests))
}

/// Send a friend request
#[utoipa::path(
    post,
    path = "/contacts/requests",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    request_body = FriendRequestPayload,
    responses(
        (status = 201, description = "Request sent (or already pending)", body = Contact),
        (status = 404, description = "No such account"),
        (status = 409, description = "Already friends")
    )
)]
pub async fn send_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<FriendRequestPayload>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    let contact = state
        .messaging_service
        .send_friend_request(user.actor(), payload.friend_id)
        .await?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// Accept a pending friend request
#[utoipa::path(
    post,
    path = "/contacts/requests/{request_id}/accept",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    params(("request_id" = Uuid, Path, description = "Contact edge id")),
    responses(
        (status = 200, description = "Request accepted", body = MessageResponse),
        (status = 404, description = "No pending request addressed to you")
    )
)]
pub async fn accept_request(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(request_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state
        .messaging_service
        .accept_friend_request(user.actor(), request_id)
        .await?;
    Ok(Json(MessageResponse::new("Friend request accepted")))
}

/// Remove an accepted friendship (both directions)
#[utoipa::path(
    delete,
    path = "/contacts/{friend_id}",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    params(("friend_id" = Uuid, Path, description = "Friend account id")),
    responses(
        (status = 204, description = "Friendship removed"),
        (status = 404, description = "No such friendship")
    )
)]
pub async fn remove_friend(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(friend_id): Path<Uuid>,
) -> AppResult<NoContent> {
    state
        .messaging_service
        .remove_friend(user.actor(), friend_id)
        .await?;
    Ok(NoContent)
}

/// Send a direct message
#[utoipa::path(
    post,
    path = "/messages",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = DirectMessage),
        (status = 404, description = "No such receiver")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<DirectMessage>)> {
    let message = state
        .messaging_service
        .send_message(user.actor(), payload.receiver_id, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Full conversation with a partner, oldest first
#[utoipa::path(
    get,
    path = "/messages/{partner_id}",
    tag = "Messaging",
    security(("bearer_auth" = [])),
    params(("partner_id" = Uuid, Path, description = "Conversation partner account id")),
    responses(
        (status = 200, description = "Conversation", body = [DirectMessage]),
        (status = 404, description = "No such account")
    )
)]
pub async fn conversation(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(partner_id): Path<Uuid>,
) -> AppResult<Json<Vec<DirectMessage>>> {
    let messages = state
        .messaging_service
        .conversation(user.actor(), partner_id)
        .await?;
    Ok(Json(messages))
}
