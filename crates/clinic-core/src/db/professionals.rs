//! Professional repository.

use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{Database, DbError, DbResult};
use crate::models::{NewProfessional, Professional, ProfessionalEdit, RecordStatus};

const SELECT_PROFESSIONAL: &str = r#"
    SELECT id, name, specialty, license_number, duration, fee, weekdays, status
    FROM professionals
"#;

/// CRUD, soft-delete and re-activation over `professionals`.
pub struct ProfessionalRepository<'a> {
    db: &'a Database,
}

impl<'a> ProfessionalRepository<'a> {
    /// Create a repository bound to the caller's session.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a new professional (status starts active).
    ///
    /// Fails with [`DbError::Constraint`] if the license number is taken.
    pub fn create(&self, professional: &NewProfessional) -> DbResult<Professional> {
        self.db.conn.execute(
            r#"
            INSERT INTO professionals (
                id, name, specialty, license_number, duration, fee, weekdays
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                professional.id,
                professional.name,
                professional.specialty,
                professional.license_number,
                professional.duration,
                professional.fee,
                professional.weekdays,
            ],
        )?;
        tracing::info!(
            professional_id = %professional.id,
            license_number = %professional.license_number,
            "Professional registered"
        );

        self.find_by_id(professional.id)?.ok_or_else(|| {
            DbError::Corrupt(format!("professional {} missing after insert", professional.id))
        })
    }

    /// List all professionals: active ones first, then inactive, each group
    /// ordered by name (case-sensitive).
    pub fn list_all(&self) -> DbResult<Vec<Professional>> {
        let mut stmt = self.db.conn.prepare(&format!(
            "{SELECT_PROFESSIONAL} ORDER BY CASE status WHEN 'ACTIVE' THEN 0 ELSE 1 END, name"
        ))?;

        let rows = stmt.query_map([], read_row)?;

        let mut professionals = Vec::new();
        for row in rows {
            professionals.push(row?.try_into()?);
        }
        tracing::debug!(count = professionals.len(), "Listed professionals");
        Ok(professionals)
    }

    /// Get a professional by ID.
    pub fn find_by_id(&self, id: Uuid) -> DbResult<Option<Professional>> {
        self.db
            .conn
            .query_row(&format!("{SELECT_PROFESSIONAL} WHERE id = ?1"), [id], read_row)
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Overwrite every editable field.
    ///
    /// Returns `false` when no professional has this ID.
    pub fn edit(&self, id: Uuid, edit: &ProfessionalEdit) -> DbResult<bool> {
        let rows_affected = self.db.conn.execute(
            r#"
            UPDATE professionals SET
                name = ?2,
                specialty = ?3,
                duration = ?4,
                fee = ?5,
                weekdays = ?6
            WHERE id = ?1
            "#,
            params![id, edit.name, edit.specialty, edit.duration, edit.fee, edit.weekdays],
        )?;

        if rows_affected > 0 {
            tracing::info!(professional_id = %id, "Professional updated");
        } else {
            tracing::warn!(professional_id = %id, "Professional not found");
        }
        Ok(rows_affected > 0)
    }

    /// Inactivate a professional. The row is kept.
    ///
    /// Returns `false` when no professional has this ID.
    pub fn remove(&self, id: Uuid) -> DbResult<bool> {
        self.set_status(id, RecordStatus::Inactive)
    }

    /// Re-activate a previously inactivated professional.
    ///
    /// Returns `false` when no professional has this ID.
    pub fn activate(&self, id: Uuid) -> DbResult<bool> {
        self.set_status(id, RecordStatus::Active)
    }

    // Always writes, even when the row already has this status.
    fn set_status(&self, id: Uuid, status: RecordStatus) -> DbResult<bool> {
        let rows_affected = self.db.conn.execute(
            "UPDATE professionals SET status = ?2 WHERE id = ?1",
            params![id, status.as_str()],
        )?;

        if rows_affected > 0 {
            tracing::info!(professional_id = %id, status = %status, "Professional status changed");
        } else {
            tracing::warn!(professional_id = %id, "Professional not found");
        }
        Ok(rows_affected > 0)
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ProfessionalRow> {
    Ok(ProfessionalRow {
        id: row.get(0)?,
        name: row.get(1)?,
        specialty: row.get(2)?,
        license_number: row.get(3)?,
        duration: row.get(4)?,
        fee: row.get(5)?,
        weekdays: row.get(6)?,
        status: row.get(7)?,
    })
}

/// Intermediate row struct for database mapping.
struct ProfessionalRow {
    id: Uuid,
    name: String,
    specialty: String,
    license_number: String,
    duration: String,
    fee: Option<String>,
    weekdays: Option<String>,
    status: String,
}

impl TryFrom<ProfessionalRow> for Professional {
    type Error = DbError;

    fn try_from(row: ProfessionalRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<RecordStatus>()
            .map_err(|e| DbError::Corrupt(format!("professional {}: {}", row.id, e)))?;

        Ok(Professional {
            id: row.id,
            name: row.name,
            specialty: row.specialty,
            license_number: row.license_number,
            duration: row.duration,
            fee: row.fee,
            weekdays: row.weekdays,
            status,
        })
    }
}
