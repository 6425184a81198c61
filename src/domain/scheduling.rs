//! Time slots and appointments.
//!
//! A provider publishes bookable time windows; a booking binds one user to
//! one slot. The core invariant: a slot is available iff no appointment
//! references it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A provider-published bookable time window
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeSlot {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_available: bool,
}

/// New slot data prior to insertion
#[derive(Debug, Clone)]
pub struct NewTimeSlot {
    pub provider_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Appointment categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AppointmentKind {
    Checkup,
    Consultation,
    Emergency,
}

impl AppointmentKind {
    /// Stable storage identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentKind::Checkup => "Checkup",
            AppointmentKind::Consultation => "Consultation",
            AppointmentKind::Emergency => "Emergency",
        }
    }

    /// Parse a stored identifier back into a kind
    pub fn parse(s: &str) -> Option<AppointmentKind> {
        match s {
            "Checkup" => Some(AppointmentKind::Checkup),
            "Consultation" => Some(AppointmentKind::Consultation),
            "Emergency" => Some(AppointmentKind::Emergency),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's booking against a slot
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub time_slot_id: Uuid,
    pub comments: String,
    pub kind: AppointmentKind,
    pub booked_on: DateTime<Utc>,
}

/// An appointment joined with the slot it is booked against
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppointmentView {
    pub appointment: Appointment,
    pub slot: TimeSlot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_kind_round_trips() {
        for kind in [
            AppointmentKind::Checkup,
            AppointmentKind::Consultation,
            AppointmentKind::Emergency,
        ] {
            assert_eq!(AppointmentKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(AppointmentKind::parse("Walk-in"), None);
    }
}
