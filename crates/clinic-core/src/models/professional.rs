//! Professional models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::RecordStatus;

/// A medical professional, as stored in the `professionals` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Professional {
    /// Time-ordered UUID (v7), assigned by the caller at registration
    pub id: Uuid,
    /// Full name (3-255 characters)
    pub name: String,
    /// Specialty, free text (see [`super::Specialty`] for the usual ones)
    pub specialty: String,
    /// Council registration number (e.g. "CRM 12345"), unique
    pub license_number: String,
    /// Consultation length, free text (minutes)
    pub duration: String,
    /// Consultation fee, free text
    pub fee: Option<String>,
    /// Comma-separated day codes (e.g. "MON,TUE,WED")
    pub weekdays: Option<String>,
    /// Soft-delete marker
    pub status: RecordStatus,
}

impl Professional {
    /// Check if the professional is currently active.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Split the weekday codes into a list.
    pub fn weekday_codes(&self) -> Vec<&str> {
        self.weekdays
            .as_deref()
            .map(|days| {
                days.split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Fields required to register a professional. Status always starts active.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProfessional {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub license_number: String,
    pub duration: String,
    pub fee: Option<String>,
    pub weekdays: Option<String>,
}

/// Editable professional fields. `license_number` and `status` are not
/// part of the set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfessionalEdit {
    pub name: String,
    pub specialty: String,
    pub duration: String,
    pub fee: Option<String>,
    pub weekdays: Option<String>,
}
