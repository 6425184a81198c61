//! Authentication service - registration, login, and password reset.
//!
//! SOLID (SRP): Handles authentication concerns only.
//! DDD: Uses domain Password value object for hashing.
//! DDD: Uses Unit of Work for repository access.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{
    Config, RESET_TOKEN_EXPIRATION_MINUTES, RESET_TOKEN_PURPOSE, SECONDS_PER_HOUR,
    TOKEN_TYPE_BEARER,
};
use crate::domain::{
    Account, AccountRole, ClientDetail, NewAccount, Password, ProviderDetail, Specialty,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::jobs::{email_job_handler, EmailJob};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Claims payload for password-reset tokens
#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    sub: Uuid,
    purpose: String,
    exp: i64,
    iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Client signup data
#[derive(Debug, Clone)]
pub struct UserSignup {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Provider signup data, including the professional profile
#[derive(Debug, Clone)]
pub struct ProviderSignup {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub license_number: String,
    pub specialty: Specialty,
    pub bio: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new client account
    async fn register_user(&self, signup: UserSignup) -> AppResult<Account>;

    /// Register a new provider account with its professional profile
    async fn register_provider(&self, signup: ProviderSignup) -> AppResult<Account>;

    /// Login and return JWT token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Mail a short-lived reset token to the account matching both
    /// username and email
    async fn request_password_reset(&self, username: String, email: String) -> AppResult<()>;

    /// Replace the credential named by a valid reset token
    async fn confirm_password_reset(&self, token: String, new_password: String) -> AppResult<()>;
}

/// Generate JWT token for an account (shared helper to avoid duplication)
fn generate_token(account: &Account, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: account.id,
        username: account.username.clone(),
        role: account.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Generate a short-lived password-reset token
fn generate_reset_token(account: &Account, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::minutes(RESET_TOKEN_EXPIRATION_MINUTES);

    let claims = ResetClaims {
        sub: account.id,
        purpose: RESET_TOKEN_PURPOSE.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?)
}

/// Verify a password-reset token and return the account id it names
fn verify_reset_token(token: &str, config: &Config) -> AppResult<Uuid> {
    let token_data = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    if token_data.claims.purpose != RESET_TOKEN_PURPOSE {
        return Err(AppError::Unauthorized);
    }

    Ok(token_data.claims.sub)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }

    async fn ensure_username_free(&self, username: &str) -> AppResult<()> {
        if self.uow.accounts().find_by_username(username).await?.is_some() {
            return Err(AppError::conflict("Username is already taken"));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register_user(&self, signup: UserSignup) -> AppResult<Account> {
        // Field formats are validated by the handler's ValidatedJson extractor
        self.ensure_username_free(&signup.username).await?;

        let password_hash = Password::new(&signup.password)?.into_string();

        // Account and client profile are created as one unit
        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    let account = ctx
                        .accounts()
                        .create(NewAccount {
                            username: signup.username,
                            email: signup.email,
                            password_hash,
                            first_name: signup.first_name,
                            last_name: signup.last_name,
                            role: AccountRole::User,
                        })
                        .await?;

                    ctx.accounts()
                        .create_client_detail(ClientDetail {
                            account_id: account.id,
                            phone_number: String::new(),
                            bio: String::new(),
                        })
                        .await?;

                    Ok(account)
                })
            })
            .await
    }

    async fn register_provider(&self, signup: ProviderSignup) -> AppResult<Account> {
        self.ensure_username_free(&signup.username).await?;

        let password_hash = Password::new(&signup.password)?.into_string();

        self.uow
            .transaction(|ctx| {
                Box::pin(async move {
                    let account = ctx
                        .accounts()
                        .create(NewAccount {
                            username: signup.username,
                            email: signup.email,
                            password_hash,
                            first_name: signup.first_name,
                            last_name: signup.last_name,
                            role: AccountRole::Provider,
                        })
                        .await?;

                    ctx.accounts()
                        .create_provider_detail(ProviderDetail {
                            account_id: account.id,
                            bio: signup.bio,
                            phone_number: signup.phone_number,
                            license_number: signup.license_number,
                            specialty: signup.specialty,
                            is_activated: false,
                            line1: signup.line1,
                            line2: signup.line2,
                            city: signup.city,
                            state: signup.state,
                            pincode: signup.pincode,
                            picture: None,
                        })
                        .await?;

                    Ok(account)
                })
            })
            .await
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let account_result = self.uow.accounts().find_by_username(&username).await?;

        // SECURITY: Perform password verification even if the account doesn't
        // exist to prevent timing attacks that could enumerate usernames.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, account_exists) = match &account_result {
            Some(account) => (account.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !account_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified account_exists is true
        generate_token(account_result.as_ref().unwrap(), &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn request_password_reset(&self, username: String, email: String) -> AppResult<()> {
        let account = self
            .uow
            .accounts()
            .find_by_username_and_email(&username, &email)
            .await?
            .ok_or_else(|| {
                AppError::validation("User with the provided username and email does not exist")
            })?;

        let token = generate_reset_token(&account, &self.config)?;
        let job = EmailJob::new(
            account.email.clone(),
            "Password Reset Request",
            format!("Use this token to reset your password: {}", token),
        );

        // Fire-and-forget within the request lifetime; delivery failures are
        // logged by the handler.
        tokio::spawn(async move {
            if let Err(e) = email_job_handler(job).await {
                tracing::error!("Password reset email failed: {}", e);
            }
        });

        Ok(())
    }

    async fn confirm_password_reset(&self, token: String, new_password: String) -> AppResult<()> {
        let account_id = verify_reset_token(&token, &self.config)?;
        let password_hash = Password::new(&new_password)?.into_string();
        self.uow
            .accounts()
            .set_password_hash(account_id, password_hash)
            .await
    }
}
