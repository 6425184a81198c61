//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_PROVIDER, ROLE_USER};

/// Account roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AccountRole {
    User,
    Provider,
    Admin,
}

impl AccountRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, AccountRole::Admin)
    }

    /// Check if this role publishes bookable time slots
    pub fn is_provider(&self) -> bool {
        matches!(self, AccountRole::Provider)
    }
}

impl From<&str> for AccountRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => AccountRole::Admin,
            ROLE_PROVIDER => AccountRole::Provider,
            _ => AccountRole::User,
        }
    }
}

impl From<AccountRole> for String {
    fn from(role: AccountRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Admin => write!(f, "{}", ROLE_ADMIN),
            AccountRole::Provider => write!(f, "{}", ROLE_PROVIDER),
            AccountRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// Account domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check if the account belongs to a provider
    pub fn is_provider(&self) -> bool {
        self.role.is_provider()
    }
}

/// The acting account of a request.
///
/// Every service operation takes the actor explicitly instead of relying
/// on an ambient session.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: Uuid,
    pub role: AccountRole,
}

impl Actor {
    pub fn new(id: Uuid, role: AccountRole) -> Self {
        Self { id, role }
    }
}

/// Account creation data for client signups
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AccountRole,
}

/// Account response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountResponse {
    /// Unique account identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Unique login name
    #[schema(example = "jdoe")]
    pub username: String,
    /// Account email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// First name
    #[schema(example = "Jane")]
    pub first_name: String,
    /// Last name
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Account role
    pub role: AccountRole,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            role: account.role,
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [AccountRole::User, AccountRole::Provider, AccountRole::Admin] {
            assert_eq!(AccountRole::from(role.to_string().as_str()), role);
        }
    }

    #[test]
    fn unknown_role_string_defaults_to_user() {
        assert_eq!(AccountRole::from("Therapist"), AccountRole::User);
    }
}
