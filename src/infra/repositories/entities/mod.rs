//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod account;
pub mod appointment;
pub mod client_detail;
pub mod contact;
pub mod favorite;
pub mod group;
pub mod group_member;
pub mod group_message;
pub mod invitation;
pub mod message;
pub mod provider_detail;
pub mod time_slot;
