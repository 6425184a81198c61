//! CalmSeek - Mental-health appointment scheduling service
//!
//! A clean-architecture Axum + SeaORM service covering provider time-slot
//! publishing, appointment booking/rescheduling/cancellation, friendships,
//! direct messaging, and groups with invitations.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, cache, Unit of Work)
//! - **api**: HTTP handlers, middleware, and routes
//! - **jobs**: Transactional email
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Account, AccountRole, Actor, Password};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
