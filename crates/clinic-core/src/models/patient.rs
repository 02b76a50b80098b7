//! Patient models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::RecordStatus;

/// A registered patient, as stored in the `patients` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Time-ordered UUID (v7), assigned by the caller at registration
    pub id: Uuid,
    /// Full name (3-100 characters)
    pub name: String,
    /// Contact phone
    pub phone: String,
    /// National tax ID (CPF), unique per patient
    pub cpf: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Contact email
    pub email: String,
    /// Street address
    pub address: String,
    /// Blood type (e.g. "O+")
    pub blood_type: String,
    /// Free-form reception notes
    pub notes: Option<String>,
    /// Soft-delete marker
    pub status: RecordStatus,
    /// Set by the database on insert
    pub created_at: DateTime<Utc>,
    /// Set by the database on every mutation; `None` until the first one
    pub updated_at: Option<DateTime<Utc>>,
}

impl Patient {
    /// Check if the patient has not been inactivated.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Fields required to register a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub address: String,
    pub blood_type: String,
    pub notes: Option<String>,
}

/// Editable patient fields. `id`, `cpf` and `birth_date` are immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientEdit {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub notes: Option<String>,
}
