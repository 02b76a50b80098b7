//! Clinic Core Library
//!
//! Patient and professional registry for a clinic reception desk, with a
//! soft-delete lifecycle.
//!
//! # Architecture
//!
//! ```text
//!   Reception front-end (HTTP / mobile / desktop)
//!                     │
//!                     ▼
//!        ClinicCore  (validation, id assignment, error mapping)
//!                     │   one locked session per call
//!          ┌──────────┴───────────┐
//!          ▼                      ▼
//!  PatientRepository    ProfessionalRepository
//!          │                      │
//!          └──────────┬───────────┘
//!                     ▼
//!               SQLite (rusqlite)
//! ```
//!
//! # Core Principle
//!
//! **Nothing is ever physically deleted.** Removing a patient or a
//! professional flips its status to `INACTIVE`; professionals can be
//! re-activated. Listings always include inactive records.
//!
//! # Modules
//!
//! - [`db`]: SQLite session, schema and repositories
//! - [`models`]: Domain types (Patient, Professional, RecordStatus, Specialty)
//! - [`validation`]: Field rules applied before persistence
//! - [`config`]: TOML configuration with `CLINIC_*` overrides
//! - [`logging`]: tracing subscriber setup

pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{ClinicConfig, Environment};
pub use db::{Database, DbError, PatientRepository, ProfessionalRepository};
pub use models::{
    NewPatient, NewProfessional, Patient, PatientEdit, Professional, ProfessionalEdit,
    RecordStatus, Specialty,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use uuid::Uuid;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<db::DbError> for ClinicError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::Constraint(msg) => ClinicError::Conflict(msg),
            other => ClinicError::DatabaseError(other.to_string()),
        }
    }
}

impl From<validation::ValidationError> for ClinicError {
    fn from(e: validation::ValidationError) -> Self {
        ClinicError::InvalidInput(e.to_string())
    }
}

impl From<config::ConfigError> for ClinicError {
    fn from(e: config::ConfigError) -> Self {
        ClinicError::Configuration(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Load configuration, start logging and open the configured database.
#[uniffi::export]
pub fn open_clinic(config_path: String) -> Result<Arc<ClinicCore>, ClinicError> {
    let config = config::load_config(&config_path)?;
    logging::init_logging(&config.logging)?;

    let db = Database::open(&config.database.path)?;
    tracing::info!(
        environment = %config.environment,
        database = %config.database.path,
        "Clinic core opened"
    );
    Ok(Arc::new(ClinicCore::new(db, config.environment)))
}

/// Create an in-memory clinic (for testing).
#[uniffi::export]
pub fn open_clinic_in_memory() -> Result<Arc<ClinicCore>, ClinicError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(ClinicCore::new(db, Environment::Development)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe request boundary. Each call holds the database lock for its
/// whole duration; the guard releases it on every exit path.
#[derive(uniffi::Object)]
pub struct ClinicCore {
    db: Arc<Mutex<Database>>,
    environment: Environment,
}

impl ClinicCore {
    /// Wrap an already opened database.
    pub fn new(db: Database, environment: Environment) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            environment,
        }
    }
}

#[uniffi::export]
impl ClinicCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient.
    pub fn create_patient(&self, input: FfiPatientInput) -> Result<FfiPatient, ClinicError> {
        let patient = NewPatient {
            id: Uuid::now_v7(),
            name: input.name,
            phone: input.phone,
            cpf: input.cpf,
            birth_date: parse_date(&input.birth_date)?,
            email: input.email,
            address: input.address,
            blood_type: input.blood_type,
            notes: non_empty(input.notes),
        };
        validation::validate_new_patient(&patient)?;

        let db = self.db.lock()?;
        let created = PatientRepository::new(&db).create(&patient)?;
        Ok(created.into())
    }

    /// List every patient, inactive ones included.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, ClinicError> {
        let db = self.db.lock()?;
        let patients = PatientRepository::new(&db).list_all()?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: String) -> Result<FfiPatient, ClinicError> {
        let id = parse_id(&id)?;
        let db = self.db.lock()?;
        PatientRepository::new(&db)
            .find_by_id(id)?
            .map(|p| p.into())
            .ok_or_else(|| patient_not_found(id))
    }

    /// Overwrite a patient's editable fields.
    pub fn edit_patient(&self, id: String, edit: FfiPatientEdit) -> Result<(), ClinicError> {
        let id = parse_id(&id)?;
        let edit: PatientEdit = edit.into();
        validation::validate_patient_edit(&edit)?;

        let db = self.db.lock()?;
        if !PatientRepository::new(&db).edit_details(id, &edit)? {
            return Err(patient_not_found(id));
        }
        Ok(())
    }

    /// Soft-delete a patient.
    pub fn inactivate_patient(&self, id: String) -> Result<(), ClinicError> {
        let id = parse_id(&id)?;
        let db = self.db.lock()?;
        if !PatientRepository::new(&db).remove(id)? {
            return Err(patient_not_found(id));
        }
        Ok(())
    }

    // =========================================================================
    // Professional Operations
    // =========================================================================

    /// Register a new professional. Duplicate license numbers are a conflict.
    pub fn create_professional(
        &self,
        input: FfiProfessionalInput,
    ) -> Result<FfiProfessional, ClinicError> {
        let professional = NewProfessional {
            id: Uuid::now_v7(),
            name: input.name,
            specialty: input.specialty,
            license_number: input.license_number,
            duration: input.duration,
            fee: non_empty(input.fee),
            weekdays: non_empty(input.weekdays),
        };
        validation::validate_new_professional(&professional)?;

        let db = self.db.lock()?;
        let created = ProfessionalRepository::new(&db).create(&professional)?;
        Ok(created.into())
    }

    /// List professionals, active first, each group by name.
    pub fn list_professionals(&self) -> Result<Vec<FfiProfessional>, ClinicError> {
        let db = self.db.lock()?;
        let professionals = ProfessionalRepository::new(&db).list_all()?;
        Ok(professionals.into_iter().map(|p| p.into()).collect())
    }

    /// Get a professional by ID.
    pub fn get_professional(&self, id: String) -> Result<FfiProfessional, ClinicError> {
        let id = parse_id(&id)?;
        let db = self.db.lock()?;
        ProfessionalRepository::new(&db)
            .find_by_id(id)?
            .map(|p| p.into())
            .ok_or_else(|| professional_not_found(id))
    }

    /// Overwrite a professional's editable fields.
    pub fn edit_professional(
        &self,
        id: String,
        edit: FfiProfessionalEdit,
    ) -> Result<(), ClinicError> {
        let id = parse_id(&id)?;
        let edit: ProfessionalEdit = edit.into();
        validation::validate_professional_edit(&edit)?;

        let db = self.db.lock()?;
        if !ProfessionalRepository::new(&db).edit(id, &edit)? {
            return Err(professional_not_found(id));
        }
        Ok(())
    }

    /// Soft-delete a professional.
    pub fn inactivate_professional(&self, id: String) -> Result<(), ClinicError> {
        let id = parse_id(&id)?;
        let db = self.db.lock()?;
        if !ProfessionalRepository::new(&db).remove(id)? {
            return Err(professional_not_found(id));
        }
        Ok(())
    }

    /// Re-activate a professional.
    pub fn activate_professional(&self, id: String) -> Result<(), ClinicError> {
        let id = parse_id(&id)?;
        let db = self.db.lock()?;
        if !ProfessionalRepository::new(&db).activate(id)? {
            return Err(professional_not_found(id));
        }
        Ok(())
    }

    // =========================================================================
    // Reference & Health
    // =========================================================================

    /// Labels of the well-known specialties.
    pub fn list_specialties(&self) -> Vec<String> {
        Specialty::ALL.iter().map(|s| s.label().to_string()).collect()
    }

    /// Liveness report.
    pub fn health(&self) -> Result<FfiHealth, ClinicError> {
        let db = self.db.lock()?;
        db.conn()
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(db::DbError::from)?;

        Ok(FfiHealth {
            status: "ok".to_string(),
            environment: self.environment.to_string(),
        })
    }
}

fn parse_id(id: &str) -> Result<Uuid, ClinicError> {
    Uuid::parse_str(id.trim()).map_err(|e| ClinicError::InvalidInput(format!("id: {}", e)))
}

fn parse_date(date: &str) -> Result<NaiveDate, ClinicError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
        ClinicError::InvalidInput(format!("birth_date: expected YYYY-MM-DD ({})", e))
    })
}

/// Empty optional text is stored as NULL.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn patient_not_found(id: Uuid) -> ClinicError {
    ClinicError::NotFound(format!("patient {}", id))
}

fn professional_not_found(id: Uuid) -> ClinicError {
    ClinicError::NotFound(format!("professional {}", id))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient registration request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientInput {
    pub name: String,
    pub phone: String,
    pub cpf: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub email: String,
    pub address: String,
    pub blood_type: String,
    pub notes: Option<String>,
}

/// FFI-safe patient edit request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientEdit {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub notes: Option<String>,
}

impl From<FfiPatientEdit> for PatientEdit {
    fn from(edit: FfiPatientEdit) -> Self {
        PatientEdit {
            name: edit.name,
            phone: edit.phone,
            email: edit.email,
            address: edit.address,
            notes: non_empty(edit.notes),
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub cpf: String,
    pub birth_date: String,
    pub email: String,
    pub address: String,
    pub blood_type: String,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.to_string(),
            active: patient.is_active(),
            name: patient.name,
            phone: patient.phone,
            cpf: patient.cpf,
            birth_date: patient.birth_date.format("%Y-%m-%d").to_string(),
            email: patient.email,
            address: patient.address,
            blood_type: patient.blood_type,
            notes: patient.notes,
            created_at: patient.created_at.to_rfc3339(),
            updated_at: patient.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// FFI-safe professional registration request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfessionalInput {
    pub name: String,
    pub specialty: String,
    pub license_number: String,
    pub duration: String,
    pub fee: Option<String>,
    pub weekdays: Option<String>,
}

/// FFI-safe professional edit request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfessionalEdit {
    pub name: String,
    pub specialty: String,
    pub duration: String,
    pub fee: Option<String>,
    pub weekdays: Option<String>,
}

impl From<FfiProfessionalEdit> for ProfessionalEdit {
    fn from(edit: FfiProfessionalEdit) -> Self {
        ProfessionalEdit {
            name: edit.name,
            specialty: edit.specialty,
            duration: edit.duration,
            fee: non_empty(edit.fee),
            weekdays: non_empty(edit.weekdays),
        }
    }
}

/// FFI-safe professional. `active` is `true` for `ACTIVE`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfessional {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub license_number: String,
    pub duration: String,
    pub fee: Option<String>,
    pub weekdays: Option<String>,
    pub active: bool,
}

impl From<Professional> for FfiProfessional {
    fn from(professional: Professional) -> Self {
        Self {
            id: professional.id.to_string(),
            active: professional.is_active(),
            name: professional.name,
            specialty: professional.specialty,
            license_number: professional.license_number,
            duration: professional.duration,
            fee: professional.fee,
            weekdays: professional.weekdays,
        }
    }
}

/// FFI-safe health report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHealth {
    pub status: String,
    pub environment: String,
}
