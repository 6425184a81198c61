//! HTTP request handlers.

pub mod account_handler;
pub mod appointment_handler;
pub mod auth_handler;
pub mod group_handler;
pub mod messaging_handler;
pub mod provider_handler;
pub mod slot_handler;

pub use account_handler::account_routes;
pub use appointment_handler::appointment_routes;
pub use auth_handler::auth_routes;
pub use group_handler::group_routes;
pub use messaging_handler::{contact_routes, message_routes};
pub use provider_handler::provider_routes;
pub use slot_handler::slot_routes;
