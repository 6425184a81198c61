//! Registration, login, and password-reset integration tests.

mod common;

use calmseek::domain::{AccountRole, Specialty};
use calmseek::errors::AppError;
use calmseek::infra::UnitOfWork;
use calmseek::services::{ProviderSignup, ServiceContainer, UserSignup};

use common::setup;

fn user_signup(username: &str) -> UserSignup {
    UserSignup {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "SecurePass123!".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
    }
}

#[tokio::test]
async fn registration_and_login_round_trip() {
    let (services, uow) = setup().await;

    let account = services
        .auth()
        .register_user(user_signup("jdoe"))
        .await
        .expect("registration failed");
    assert_eq!(account.role, AccountRole::User);

    // Signup also provisions the client profile
    assert!(uow
        .profiles()
        .find_client_detail(account.id)
        .await
        .unwrap()
        .is_some());

    let token = services
        .auth()
        .login("jdoe".to_string(), "SecurePass123!".to_string())
        .await
        .expect("login failed");
    assert!(!token.access_token.is_empty());
    assert_eq!(token.token_type, "Bearer");

    let claims = services.auth().verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, account.id);
    assert_eq!(claims.username, "jdoe");

    let err = services
        .auth()
        .login("jdoe".to_string(), "WrongPassword1".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    let err = services
        .auth()
        .login("nobody".to_string(), "SecurePass123!".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let (services, _uow) = setup().await;

    services
        .auth()
        .register_user(user_signup("taken"))
        .await
        .unwrap();

    let err = services
        .auth()
        .register_user(user_signup("taken"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn provider_signup_creates_the_professional_profile() {
    let (services, uow) = setup().await;

    let account = services
        .auth()
        .register_provider(ProviderSignup {
            username: "drsmith".to_string(),
            email: "drsmith@example.com".to_string(),
            password: "SecurePass123!".to_string(),
            first_name: "Alex".to_string(),
            last_name: "Smith".to_string(),
            phone_number: "+1-202-555-0100".to_string(),
            license_number: "LIC-48213".to_string(),
            specialty: Specialty::Counseling,
            bio: "15 years of practice".to_string(),
            line1: "12 Main St".to_string(),
            line2: None,
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            pincode: "62704".to_string(),
        })
        .await
        .expect("provider registration failed");

    assert_eq!(account.role, AccountRole::Provider);

    let detail = uow
        .profiles()
        .find_provider_detail(account.id)
        .await
        .unwrap()
        .expect("provider detail missing");
    assert_eq!(detail.specialty, Specialty::Counseling);
    assert_eq!(detail.city, "Springfield");
    // Activation waits for an administrator
    assert!(!detail.is_activated);
}

#[tokio::test]
async fn password_reset_requires_a_matching_username_email_pair() {
    let (services, _uow) = setup().await;

    services
        .auth()
        .register_user(user_signup("resetme"))
        .await
        .unwrap();

    let err = services
        .auth()
        .request_password_reset("resetme".to_string(), "wrong@example.com".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    services
        .auth()
        .request_password_reset("resetme".to_string(), "resetme@example.com".to_string())
        .await
        .expect("reset request failed");
}

#[tokio::test]
async fn garbage_reset_tokens_are_rejected() {
    let (services, _uow) = setup().await;

    let result = services
        .auth()
        .confirm_password_reset("not-a-token".to_string(), "NewPassword123!".to_string())
        .await;
    assert!(result.is_err());
}
