//! Patient repository.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{Database, DbError, DbResult};
use crate::models::{NewPatient, Patient, PatientEdit, RecordStatus};

const SELECT_PATIENT: &str = r#"
    SELECT id, name, phone, cpf, birth_date, email, address, blood_type,
           notes, status, created_at, updated_at
    FROM patients
"#;

/// CRUD and soft-delete operations over `patients`.
pub struct PatientRepository<'a> {
    db: &'a Database,
}

impl<'a> PatientRepository<'a> {
    /// Create a repository bound to the caller's session.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a new patient and return the stored record.
    pub fn create(&self, patient: &NewPatient) -> DbResult<Patient> {
        self.db.conn.execute(
            r#"
            INSERT INTO patients (
                id, name, phone, cpf, birth_date, email, address,
                blood_type, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                patient.id,
                patient.name,
                patient.phone,
                patient.cpf,
                patient.birth_date,
                patient.email,
                patient.address,
                patient.blood_type,
                patient.notes,
            ],
        )?;
        tracing::info!(patient_id = %patient.id, "Patient registered");

        self.find_by_id(patient.id)?
            .ok_or_else(|| DbError::Corrupt(format!("patient {} missing after insert", patient.id)))
    }

    /// List all patients in insertion order, active or not.
    pub fn list_all(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self
            .db
            .conn
            .prepare(&format!("{SELECT_PATIENT} ORDER BY rowid"))?;

        let rows = stmt.query_map([], read_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.try_into()?);
        }
        tracing::debug!(count = patients.len(), "Listed patients");
        Ok(patients)
    }

    /// Get a patient by ID.
    pub fn find_by_id(&self, id: Uuid) -> DbResult<Option<Patient>> {
        self.db
            .conn
            .query_row(&format!("{SELECT_PATIENT} WHERE id = ?1"), [id], read_row)
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Inactivate a patient. The row is kept.
    ///
    /// Returns `false` when no patient has this ID.
    pub fn remove(&self, id: Uuid) -> DbResult<bool> {
        let found = self.set_status(id, RecordStatus::Inactive)?;
        if found {
            tracing::info!(patient_id = %id, "Patient inactivated");
        }
        Ok(found)
    }

    /// Rename a patient, leaving every other field untouched.
    ///
    /// Returns `false` when no patient has this ID.
    pub fn edit(&self, id: Uuid, name: &str) -> DbResult<bool> {
        let rows_affected = self.db.conn.execute(
            "UPDATE patients SET name = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, name],
        )?;
        log_mutation(id, rows_affected, "Patient renamed");
        Ok(rows_affected > 0)
    }

    /// Overwrite all editable fields (name, phone, email, address, notes).
    ///
    /// Returns `false` when no patient has this ID.
    pub fn edit_details(&self, id: Uuid, edit: &PatientEdit) -> DbResult<bool> {
        let rows_affected = self.db.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                phone = ?3,
                email = ?4,
                address = ?5,
                notes = ?6,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![id, edit.name, edit.phone, edit.email, edit.address, edit.notes],
        )?;
        log_mutation(id, rows_affected, "Patient updated");
        Ok(rows_affected > 0)
    }

    fn set_status(&self, id: Uuid, status: RecordStatus) -> DbResult<bool> {
        let rows_affected = self.db.conn.execute(
            "UPDATE patients SET status = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, status.as_str()],
        )?;
        if rows_affected == 0 {
            tracing::warn!(patient_id = %id, "Patient not found");
        }
        Ok(rows_affected > 0)
    }
}

fn log_mutation(id: Uuid, rows_affected: usize, message: &str) {
    if rows_affected > 0 {
        tracing::info!(patient_id = %id, "{}", message);
    } else {
        tracing::warn!(patient_id = %id, "Patient not found");
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        cpf: row.get(3)?,
        birth_date: row.get(4)?,
        email: row.get(5)?,
        address: row.get(6)?,
        blood_type: row.get(7)?,
        notes: row.get(8)?,
        status: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: Uuid,
    name: String,
    phone: String,
    cpf: String,
    birth_date: NaiveDate,
    email: String,
    address: String,
    blood_type: String,
    notes: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<RecordStatus>()
            .map_err(|e| DbError::Corrupt(format!("patient {}: {}", row.id, e)))?;

        Ok(Patient {
            id: row.id,
            name: row.name,
            phone: row.phone,
            cpf: row.cpf,
            birth_date: row.birth_date,
            email: row.email,
            address: row.address,
            blood_type: row.blood_type,
            notes: row.notes,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
