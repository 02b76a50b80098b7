//! Catalogue of the specialties offered by the clinic.

use serde::{Deserialize, Serialize};

/// Well-known specialties. `Professional::specialty` stays free text; this
/// list feeds the reception front-end's picker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Specialty {
    GeneralPractice,
    Cardiology,
    Orthopedics,
    Dermatology,
    Pediatrics,
}

impl Specialty {
    pub const ALL: [Specialty; 5] = [
        Specialty::GeneralPractice,
        Specialty::Cardiology,
        Specialty::Orthopedics,
        Specialty::Dermatology,
        Specialty::Pediatrics,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::GeneralPractice => "General Practice",
            Specialty::Cardiology => "Cardiology",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Dermatology => "Dermatology",
            Specialty::Pediatrics => "Pediatrics",
        }
    }

    /// Look up a specialty by label, ignoring case and surrounding spaces.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
    }
}
