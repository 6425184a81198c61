//! Contact edges and direct messages.
//!
//! A contact is a directed edge: `is_friend = false` marks a pending friend
//! request, `true` an accepted one. A mutual friendship is two rows, one per
//! direction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::AccountResponse;

/// Directed friend-request/friendship record between two accounts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    pub id: Uuid,
    /// The requesting side of the edge
    pub account_id: Uuid,
    /// The target side of the edge
    pub friend_id: Uuid,
    pub is_friend: bool,
}

/// A pending request joined with the requester's account
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FriendRequestView {
    pub contact: Contact,
    pub requester: AccountResponse,
}

/// An immutable message between two accounts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DirectMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}
