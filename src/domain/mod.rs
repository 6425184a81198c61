//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! DDD: Domain layer has NO external dependencies (except error types).

pub mod account;
pub mod contact;
pub mod group;
pub mod password;
pub mod provider;
pub mod scheduling;

pub use account::{Account, AccountResponse, AccountRole, Actor, NewAccount};
pub use contact::{Contact, DirectMessage, FriendRequestView};
pub use group::{
    Group, GroupMessage, GroupView, Invitation, InvitationStatus, InvitationView, InviteOutcome,
};
pub use password::Password;
pub use provider::{ClientDetail, ProviderDetail, ProviderProfile, Specialty};
pub use scheduling::{Appointment, AppointmentKind, AppointmentView, NewTimeSlot, TimeSlot};
