//! Provider and client profile extensions.
//!
//! A provider account carries professional metadata used by the directory;
//! a client account carries a lighter contact profile.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::AccountResponse;

/// Fixed mental-health specializations offered by providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Specialty {
    Psychiatry,
    ClinicalPsychology,
    Counseling,
    ChildAndAdolescent,
    AddictionRecovery,
    MarriageAndFamily,
    TraumaAndPtsd,
    BehavioralTherapy,
}

impl Specialty {
    /// All specializations, for filter dropdowns
    pub const ALL: &'static [Specialty] = &[
        Specialty::Psychiatry,
        Specialty::ClinicalPsychology,
        Specialty::Counseling,
        Specialty::ChildAndAdolescent,
        Specialty::AddictionRecovery,
        Specialty::MarriageAndFamily,
        Specialty::TraumaAndPtsd,
        Specialty::BehavioralTherapy,
    ];

    /// Stable storage identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Psychiatry => "psychiatry",
            Specialty::ClinicalPsychology => "clinical_psychology",
            Specialty::Counseling => "counseling",
            Specialty::ChildAndAdolescent => "child_and_adolescent",
            Specialty::AddictionRecovery => "addiction_recovery",
            Specialty::MarriageAndFamily => "marriage_and_family",
            Specialty::TraumaAndPtsd => "trauma_and_ptsd",
            Specialty::BehavioralTherapy => "behavioral_therapy",
        }
    }

    /// Parse a stored identifier back into a specialty
    pub fn parse(s: &str) -> Option<Specialty> {
        Specialty::ALL.iter().copied().find(|sp| sp.as_str() == s)
    }
}

impl std::fmt::Display for Specialty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Professional metadata for a provider account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderDetail {
    pub account_id: Uuid,
    pub bio: String,
    pub phone_number: String,
    pub license_number: String,
    pub specialty: Specialty,
    /// Set by an administrator once credentials are verified
    pub is_activated: bool,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    /// Optional profile picture path
    pub picture: Option<String>,
}

/// Contact profile for a client account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientDetail {
    pub account_id: Uuid,
    pub phone_number: String,
    pub bio: String,
}

/// Directory entry: a provider account joined with its detail row
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProviderProfile {
    pub account: AccountResponse,
    pub detail: ProviderDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialty_round_trips_through_storage_identifier() {
        for sp in Specialty::ALL {
            assert_eq!(Specialty::parse(sp.as_str()), Some(*sp));
        }
    }

    #[test]
    fn unknown_specialty_identifier_is_rejected() {
        assert_eq!(Specialty::parse("phrenology"), None);
    }
}
