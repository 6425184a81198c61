//! Shared fixtures for the integration test suite.
//!
//! Tests run against SQLite in memory with the real migrations, so the
//! transactional lifecycle paths are exercised end to end.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use calmseek::config::Config;
use calmseek::domain::{Account, AccountRole, Actor, NewAccount};
use calmseek::infra::{Migrator, Persistence, UnitOfWork};
use calmseek::services::Services;

/// Connect to a fresh in-memory database and apply all migrations.
///
/// The pool is capped at one connection so every query sees the same
/// in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(600));

    let conn = SeaDatabase::connect(options)
        .await
        .expect("sqlite connection failed");

    Migrator::up(&conn, None).await.expect("migrations failed");

    conn
}

/// Full service container plus a raw Unit of Work for state assertions.
pub async fn setup() -> (Services, Arc<Persistence>) {
    let conn = setup_db().await;
    let services = Services::from_connection(conn.clone(), Config::from_env());
    let uow = Arc::new(Persistence::new(conn));
    (services, uow)
}

/// Insert an account directly, bypassing signup (and its password hashing).
pub async fn create_account(uow: &Persistence, username: &str, role: AccountRole) -> Account {
    let new_account = NewAccount {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: "hashed".to_string(),
        first_name: "Test".to_string(),
        last_name: username.to_string(),
        role,
    };

    uow.transaction(|ctx| Box::pin(async move { ctx.accounts().create(new_account).await }))
        .await
        .expect("account insert failed")
}

/// The acting side of an account, as the middleware would build it.
pub fn actor_of(account: &Account) -> Actor {
    Actor::new(account.id, account.role)
}
