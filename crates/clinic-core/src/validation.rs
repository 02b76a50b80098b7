//! Field validation applied at the API boundary before anything reaches a
//! repository. Limits mirror the column CHECK constraints in
//! [`crate::db::SCHEMA`]; lengths count characters, not bytes.

use thiserror::Error;

use crate::models::{NewPatient, NewProfessional, PatientEdit, ProfessionalEdit};

/// A field failed its length rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

pub type ValidationResult = Result<(), ValidationError>;

pub const PATIENT_NAME_LEN: (usize, usize) = (3, 100);
pub const PHONE_MAX: usize = 15;
pub const CPF_MAX: usize = 14;
pub const EMAIL_MAX: usize = 60;
pub const ADDRESS_MAX: usize = 45;
pub const BLOOD_TYPE_MAX: usize = 3;
pub const NOTES_MAX: usize = 200;

pub const PROFESSIONAL_NAME_LEN: (usize, usize) = (3, 255);
pub const SPECIALTY_MAX: usize = 50;
pub const LICENSE_NUMBER_MAX: usize = 20;
pub const DURATION_MAX: usize = 10;
pub const FEE_MAX: usize = 15;
pub const WEEKDAYS_MAX: usize = 100;

pub fn validate_new_patient(patient: &NewPatient) -> ValidationResult {
    check_between("name", &patient.name, PATIENT_NAME_LEN)?;
    check_max("phone", &patient.phone, PHONE_MAX)?;
    check_max("cpf", &patient.cpf, CPF_MAX)?;
    check_max("email", &patient.email, EMAIL_MAX)?;
    check_max("address", &patient.address, ADDRESS_MAX)?;
    check_max("blood_type", &patient.blood_type, BLOOD_TYPE_MAX)?;
    check_optional_max("notes", patient.notes.as_deref(), NOTES_MAX)
}

pub fn validate_patient_edit(edit: &PatientEdit) -> ValidationResult {
    check_between("name", &edit.name, PATIENT_NAME_LEN)?;
    check_max("phone", &edit.phone, PHONE_MAX)?;
    check_max("email", &edit.email, EMAIL_MAX)?;
    check_max("address", &edit.address, ADDRESS_MAX)?;
    check_optional_max("notes", edit.notes.as_deref(), NOTES_MAX)
}

pub fn validate_new_professional(professional: &NewProfessional) -> ValidationResult {
    check_between("name", &professional.name, PROFESSIONAL_NAME_LEN)?;
    check_max("specialty", &professional.specialty, SPECIALTY_MAX)?;
    check_max("license_number", &professional.license_number, LICENSE_NUMBER_MAX)?;
    check_max("duration", &professional.duration, DURATION_MAX)?;
    check_optional_max("fee", professional.fee.as_deref(), FEE_MAX)?;
    check_optional_max("weekdays", professional.weekdays.as_deref(), WEEKDAYS_MAX)
}

pub fn validate_professional_edit(edit: &ProfessionalEdit) -> ValidationResult {
    check_between("name", &edit.name, PROFESSIONAL_NAME_LEN)?;
    check_max("specialty", &edit.specialty, SPECIALTY_MAX)?;
    check_max("duration", &edit.duration, DURATION_MAX)?;
    check_optional_max("fee", edit.fee.as_deref(), FEE_MAX)?;
    check_optional_max("weekdays", edit.weekdays.as_deref(), WEEKDAYS_MAX)
}

fn check_between(field: &'static str, value: &str, (min, max): (usize, usize)) -> ValidationResult {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError {
            field,
            message: format!("must be between {} and {} characters, got {}", min, max, len),
        });
    }
    Ok(())
}

fn check_max(field: &'static str, value: &str, max: usize) -> ValidationResult {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError {
            field,
            message: format!("must be at most {} characters, got {}", max, len),
        });
    }
    Ok(())
}

fn check_optional_max(field: &'static str, value: Option<&str>, max: usize) -> ValidationResult {
    value.map_or(Ok(()), |v| check_max(field, v, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn make_patient() -> NewPatient {
        NewPatient {
            id: Uuid::now_v7(),
            name: "Felipe Corrêa".into(),
            phone: "(99) 99999-9999".into(),
            cpf: "999.999.999-99".into(),
            birth_date: NaiveDate::from_ymd_opt(1999, 2, 13).unwrap(),
            email: "felipe@example.com".into(),
            address: "Rua 7 de Setembro, N10".into(),
            blood_type: "O+".into(),
            notes: None,
        }
    }

    fn make_professional() -> NewProfessional {
        NewProfessional {
            id: Uuid::now_v7(),
            name: "Dr. João Silva".into(),
            specialty: "Cardiology".into(),
            license_number: "CRM 12345".into(),
            duration: "30".into(),
            fee: Some("150,00".into()),
            weekdays: Some("MON,TUE,WED,THU,FRI".into()),
        }
    }

    #[test]
    fn test_valid_records_pass() {
        assert!(validate_new_patient(&make_patient()).is_ok());
        assert!(validate_new_professional(&make_professional()).is_ok());
    }

    #[test]
    fn test_name_too_short() {
        let mut patient = make_patient();
        patient.name = "Al".into();

        let err = validate_new_patient(&patient).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_lengths_count_characters() {
        let mut patient = make_patient();
        // Multi-byte characters count once
        patient.phone = "ção-ção-ção-çã".into();
        patient.phone.push('o');
        assert_eq!(patient.phone.chars().count(), 15);
        assert!(validate_new_patient(&patient).is_ok());

        patient.phone.push('0');
        assert_eq!(validate_new_patient(&patient).unwrap_err().field, "phone");
    }

    #[test]
    fn test_optional_fields() {
        let mut professional = make_professional();
        professional.fee = None;
        professional.weekdays = None;
        assert!(validate_new_professional(&professional).is_ok());

        professional.fee = Some("1".repeat(FEE_MAX + 1));
        assert_eq!(validate_new_professional(&professional).unwrap_err().field, "fee");
    }

    #[test]
    fn test_patient_edit_limits() {
        let edit = PatientEdit {
            name: "Felipe Corrêa".into(),
            phone: "123".into(),
            email: "e".repeat(EMAIL_MAX + 1),
            address: "Rua A".into(),
            notes: None,
        };
        assert_eq!(validate_patient_edit(&edit).unwrap_err().field, "email");
    }

    #[test]
    fn test_professional_edit_limits() {
        let edit = ProfessionalEdit {
            name: "Dr. João Silva".into(),
            specialty: "Cardiology".into(),
            duration: "12345678901".into(),
            fee: None,
            weekdays: None,
        };
        let err = validate_professional_edit(&edit).unwrap_err();
        assert_eq!(err.field, "duration");
        assert!(err.to_string().starts_with("duration: must be at most 10"));
    }
}
