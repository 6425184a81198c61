//! Authentication handlers: signup with role selection, login, password reset.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{AccountResponse, Specialty};
use crate::errors::AppResult;
use crate::services::{ProviderSignup, TokenResponse, UserSignup};
use crate::types::MessageResponse;

/// Client registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserRequest {
    /// Unique login name
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    #[schema(example = "jdoe")]
    pub username: String,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// First name
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    /// Last name
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
}

/// Provider registration request with professional profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterProviderRequest {
    /// Unique login name
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    #[schema(example = "drsmith")]
    pub username: String,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "provider@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// First name
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Alex")]
    pub first_name: String,
    /// Last name
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Smith")]
    pub last_name: String,
    /// Contact phone number
    #[validate(length(min = 1, message = "Phone number is required"))]
    #[schema(example = "+1-202-555-0100")]
    pub phone_number: String,
    /// Professional license number
    #[validate(length(min = 1, message = "License number is required"))]
    #[schema(example = "LIC-48213")]
    pub license_number: String,
    /// Mental-health specialization
    pub specialty: Specialty,
    /// Professional bio / credentials
    #[schema(example = "15 years of CBT practice")]
    #[serde(default)]
    pub bio: String,
    /// Address line 1
    #[validate(length(min = 1, message = "Address line 1 is required"))]
    pub line1: String,
    /// Address line 2 (optional)
    pub line2: Option<String>,
    /// City
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    /// State
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    /// Postal code
    #[validate(length(min = 1, message = "Postal code is required"))]
    pub pincode: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Login name
    #[schema(example = "jdoe")]
    pub username: String,
    /// Password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Password reset request: both fields must match one account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordResetRequest {
    /// Login name
    #[schema(example = "jdoe")]
    pub username: String,
    /// Email on file for the account
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Password reset confirmation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordResetConfirm {
    /// Reset token from the email
    pub token: String,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register/user", post(register_user))
        .route("/register/provider", post(register_provider))
        .route("/login", post(login))
        .route("/password-reset/request", post(password_reset_request))
        .route("/password-reset/confirm", post(password_reset_confirm))
}

/// Register a new client account
#[utoipa::path(
    post,
    path = "/auth/register/user",
    tag = "Authentication",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Account registered successfully", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state
        .auth_service
        .register_user(UserSignup {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Register a new provider account
#[utoipa::path(
    post,
    path = "/auth/register/provider",
    tag = "Authentication",
    request_body = RegisterProviderRequest,
    responses(
        (status = 201, description = "Provider registered successfully", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register_provider(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterProviderRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state
        .auth_service
        .register_provider(ProviderSignup {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone_number: payload.phone_number,
            license_number: payload.license_number,
            specialty: payload.specialty,
            bio: payload.bio,
            line1: payload.line1,
            line2: payload.line2,
            city: payload.city,
            state: payload.state,
            pincode: payload.pincode,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}

/// Request a password-reset token by mail
#[utoipa::path(
    post,
    path = "/auth/password-reset/request",
    tag = "Authentication",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Reset mail sent", body = MessageResponse),
        (status = 400, description = "No account matches the username and email")
    )
)]
pub async fn password_reset_request(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PasswordResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .request_password_reset(payload.username, payload.email)
        .await?;

    Ok(Json(MessageResponse::new("Password reset email sent")))
}

/// Confirm a password reset with the mailed token
#[utoipa::path(
    post,
    path = "/auth/password-reset/confirm",
    tag = "Authentication",
    request_body = PasswordResetConfirm,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 401, description = "Invalid or expired token")
    )
)]
pub async fn password_reset_confirm(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PasswordResetConfirm>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .confirm_password_reset(payload.token, payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}
