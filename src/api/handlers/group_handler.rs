//! Group handlers: groups, invitations, and group messages.

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
use crate::domain::{Group, GroupMessage, GroupView, InvitationView, InviteOutcome};
use crate::errors::AppResult;
use crate::types::{MessageResponse, NoContent};

/// Group creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGroupRequest {
    /// Group name
    #[validate(length(min = 1, message = "Group name is required"))]
    #[schema(example = "Anxiety support circle")]
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Bulk invitation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InviteRequest {
    /// Accounts to invite
    #[validate(length(min = 1, message = "Select at least one account"))]
    pub account_ids: Vec<Uuid>,
}

/// Invitation response request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RespondRequest {
    /// "accept" or "decline"
    #[schema(example = "accept")]
    pub response: String,
}

/// Group message request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostGroupMessageRequest {
    /// Message text
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub content: String,
}

/// Create group routes
pub fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(my_groups).post(create_group))
        .route("/invitations", get(my_invitations))
        .route("/invitations/:invitation_id/respond", post(respond_to_invitation))
        .route("/:group_id", get(group_detail).delete(delete_group))
        .route("/:group_id/messages", post(post_group_message))
        .route("/:group_id/invitations", post(invite_members))
        .route("/:group_id/quit", post(quit_group))
}

/// List the actor's groups
#[utoipa::path(
    get,
    path = "/groups",
    tag = "Groups",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Groups the actor belongs to", body = [Group])
    )
)]
pub async fn my_groups(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<Group>>> {
    let groups = state.group_service.my_groups(user.actor()).await?;
    Ok(Json(groups))
}

/// Create a group; the creator becomes a member
#[utoipa::path(
    post,
    path = "/groups",
    tag = "Groups",
    security(("bearer_auth" = [])),
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_group(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateGroupRequest>,
) -> AppResult<(StatusCode, Json<Group>)> {
    let group = state
        .group_service
        .create(user.actor(), payload.name, payload.description)
        .await?;

    Ok((StatusCode::CREATED, Json(group)))
}

/// Member-only group page with its message log
#[utoipa::path(
    get,
    path = "/groups/{group_id}",
    tag = "Groups",
    security(("bearer_auth" = [])),
    params(("group_id" = Uuid, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group with messages", body = GroupView),
        (status = 404, description = "No such group, or not a member")
    )
)]
pub async fn group_detail(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
) -> AppResult<Json<GroupView>> {
    let view = state.group_service.detail(user.actor(), group_id).await?;
    Ok(Json(view))
}

/// Delete an owned group
#[utoipa::path(
    delete,
    path = "/groups/{group_id}",
    tag = "Groups",
    security(("bearer_auth" = [])),
    params(("group_id" = Uuid, Path, description = "Group id")),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 404, description = "No such group, or not the creator")
    )
)]
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.group_service.delete(user.actor(), group_id).await?;
    Ok(NoContent)
}

/// Post an immutable message as a member
#[utoipa::path(
    post,
    path = "/groups/{group_id}/messages",
    tag = "Groups",
    security(("bearer_auth" = [])),
    params(("group_id" = Uuid, Path, description = "Group id")),
    request_body = PostGroupMessageRequest,
    responses(
        (status = 201, description = "Message posted", body = GroupMessage),
        (status = 404, description = "No such group, or not a member")
    )
)]
pub async fn post_group_message(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<PostGroupMessageRequest>,
) -> AppResult<(StatusCode, Json<GroupMessage>)> {
    let message = state
        .group_service
        .post_message(user.actor(), group_id, payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Invite accounts into an owned group
#[utoipa::path(
    post,
    path = "/groups/{group_id}/invitations",
    tag = "Groups",
    security(("bearer_auth" = [])),
    params(("group_id" = Uuid, Path, description = "Group id")),
    request_body = InviteRequest,
    responses(
        (status = 200, description = "Per-target outcomes", body = [InviteOutcome]),
        (status = 404, description = "No such group, creator mismatch, or unknown target")
    )
)]
pub async fn invite_members(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<InviteRequest>,
) -> AppResult<Json<Vec<InviteOutcome>>> {
    let outcomes = state
        .group_service
        .invite(user.actor(), group_id, payload.account_ids)
        .await?;
    Ok(Json(outcomes))
}

/// List pending invitations addressed to the actor
#[utoipa::path(
    get,
    path = "/groups/invitations",
    tag = "Groups",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending invitations", body = [InvitationView])
    )
)]
pub async fn my_invitations(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<InvitationView>>> {
    let invitations = state.group_service.my_invitations(user.actor()).await?;
    Ok(Json(invitations))
}

/// Accept or decline a pending invitation
#[utoipa::path(
    post,
    path = "/groups/invitations/{invitation_id}/respond",
    tag = "Groups",
    security(("bearer_auth" = [])),
    params(("invitation_id" = Uuid, Path, description = "Invitation id")),
    request_body = RespondRequest,
    responses(
        (status = 200, description = "Response recorded", body = MessageResponse),
        (status = 400, description = "Response must be accept or decline"),
        (status = 404, description = "No pending invitation addressed to you"),
        (status = 409, description = "Invitation already answered")
    )
)]
pub async fn respond_to_invitation(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(invitation_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RespondRequest>,
) -> AppResult<Json<MessageResponse>> {
    let accept = match payload.response.as_str() {
        "accept" => true,
        "decline" => false,
        _ => {
            return Err(crate::errors::AppError::validation(
                "Response must be accept or decline",
            ))
        }
    };

    state
        .group_service
        .respond(user.actor(), invitation_id, accept)
        .await?;

    let message = if accept {
        "Invitation accepted"
    } else {
        "Invitation declined"
    };
    Ok(Json(MessageResponse::new(message)))
}

/// Leave a group
#[utoipa::path(
    post,
    path = "/groups/{group_id}/quit",
    tag = "Groups",
    security(("bearer_auth" = [])),
    params(("group_id" = Uuid, Path, description = "Group id")),
    responses(
        (status = 200, description = "Left the group", body = MessageResponse),
        (status = 404, description = "No such group")
    )
)]
pub async fn quit_group(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(group_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.group_service.quit(user.actor(), group_id).await?;
    Ok(Json(MessageResponse::new("Left the group")))
}
