//! Groups, group messages, and invitations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{INVITATION_ACCEPTED, INVITATION_DECLINED, INVITATION_PENDING};

/// An ad-hoc discussion group
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// An immutable message posted into a group by a member
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupMessage {
    pub id: Uuid,
    pub group_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Invitation lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    /// Stable storage identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => INVITATION_PENDING,
            InvitationStatus::Accepted => INVITATION_ACCEPTED,
            InvitationStatus::Declined => INVITATION_DECLINED,
        }
    }

    /// Parse a stored identifier back into a status
    pub fn parse(s: &str) -> Option<InvitationStatus> {
        match s {
            INVITATION_PENDING => Some(InvitationStatus::Pending),
            INVITATION_ACCEPTED => Some(InvitationStatus::Accepted),
            INVITATION_DECLINED => Some(InvitationStatus::Declined),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for an account to join a group.
///
/// Rows are never deleted; a declined invitation does not block a fresh
/// pending one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Invitation {
    pub id: Uuid,
    pub group_id: Uuid,
    pub account_id: Uuid,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

/// A pending invitation joined with its group
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvitationView {
    pub invitation: Invitation,
    pub group: Group,
}

/// A group joined with its message log
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupView {
    pub group: Group,
    pub messages: Vec<GroupMessage>,
}

/// Per-target outcome of a bulk invite
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InviteOutcome {
    pub account_id: Uuid,
    /// `invited`, `already_member`, or `already_invited`
    pub outcome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_status_round_trips() {
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Declined,
        ] {
            assert_eq!(InvitationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(InvitationStatus::parse("expired"), None);
    }
}
