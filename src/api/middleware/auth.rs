//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{AccountRole, Actor};
use crate::errors::AppError;

/// Authenticated account extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub role: AccountRole,
}

impl CurrentUser {
    /// The acting account for service calls
    pub fn actor(&self) -> Actor {
        Actor::new(self.id, self.role)
    }

    /// Check if the account is a provider.
    pub fn is_provider(&self) -> bool {
        self.role.is_provider()
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        id: claims.sub,
        username: claims.username,
        role: AccountRole::from(claims.role.as_str()),
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require the provider role, returns Forbidden otherwise.
pub fn require_provider(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_provider() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
