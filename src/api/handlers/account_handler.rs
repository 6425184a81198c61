//! Account handlers: own profile, profile edit, and favorites.

use axum::{
    extract::{Path, State},
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
use crate::domain::{AccountResponse, Specialty};
use crate::errors::AppResult;
use crate::services::{ClientDetailUpdate, ProfileUpdate, ProfileView, ProviderDetailUpdate};
use crate::types::{MessageResponse, NoContent};

/// Provider-only profile fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProviderDetailRequest {
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "License number is required"))]
    pub license_number: String,
    pub specialty: Specialty,
    #[serde(default)]
    pub bio: String,
    #[validate(length(min = 1, message = "Address line 1 is required"))]
    pub line1: String,
    pub line2: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Postal code is required"))]
    pub pincode: String,
}

/// Client-only profile fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ClientDetailRequest {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub bio: String,
}

/// Profile edit request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Provider detail fields; honored only for provider accounts
    #[validate(nested)]
    pub provider: Option<ProviderDetailRequest>,
    /// Client detail fields; honored only for client accounts
    #[validate(nested)]
    pub client: Option<ClientDetailRequest>,
}

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(my_profile).put(update_profile))
        .route("/me/favorites", get(list_favorites))
        .route(
            "/me/favorites/:provider_id",
            post(add_favorite).delete(remove_favorite),
        )
}

/// Get the signed-in account's profile
#[utoipa::path(
    get,
    path = "/accounts/me",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current profile", body = ProfileView),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn my_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileView>> {
    let view = state.account_service.profile(user.actor()).await?;
    Ok(Json(view))
}

/// Update the signed-in account's profile
#[utoipa::path(
    put,
    path = "/accounts/me",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileView),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ProfileView>> {
    let update = ProfileUpdate {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        provider: payload.provider.map(|p| ProviderDetailUpdate {
            phone_number: p.phone_number,
            license_number: p.license_number,
            specialty: p.specialty,
            bio: p.bio,
            line1: p.line1,
            line2: p.line2,
            city: p.city,
            state: p.state,
            pincode: p.pincode,
        }),
        client: payload.client.map(|c| ClientDetailUpdate {
            phone_number: c.phone_number,
            bio: c.bio,
        }),
    };

    let view = state
        .account_service
        .update_profile(user.actor(), update)
        .await?;
    Ok(Json(view))
}

/// List favorited providers
#[utoipa::path(
    get,
    path = "/accounts/me/favorites",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Favorited providers", body = [AccountResponse])
    )
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let favorites = state.account_service.list_favorites(user.actor()).await?;
    Ok(Json(favorites))
}

/// Favorite a provider
#[utoipa::path(
    post,
    path = "/accounts/me/favorites/{provider_id}",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(("provider_id" = Uuid, Path, description = "Provider account id")),
    responses(
        (status = 200, description = "Provider favorited", body = MessageResponse),
        (status = 404, description = "No such provider"),
        (status = 409, description = "Already favorited")
    )
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(provider_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state
        .account_service
        .add_favorite(user.actor(), provider_id)
        .await?;
    Ok(Json(MessageResponse::new("Added to your favorites")))
}

/// Remove a favorited provider
#[utoipa::path(
    delete,
    path = "/accounts/me/favorites/{provider_id}",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(("provider_id" = Uuid, Path, description = "Provider account id")),
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 404, description = "No such provider")
    )
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(provider_id): Path<Uuid>,
) -> AppResult<NoContent> {
    state
        .account_service
        .remove_favorite(user.actor(), provider_id)
        .await?;
    Ok(NoContent)
}
