//! SQLite schema definition.

/// Complete database schema for the clinic registry.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id BLOB PRIMARY KEY NOT NULL,                -- UUID v7, assigned by caller
    name TEXT NOT NULL CHECK (length(name) BETWEEN 3 AND 100),
    phone TEXT NOT NULL CHECK (length(phone) <= 15),
    cpf TEXT NOT NULL UNIQUE CHECK (length(cpf) <= 14),
    birth_date TEXT NOT NULL,                    -- YYYY-MM-DD
    email TEXT NOT NULL CHECK (length(email) <= 60),
    address TEXT NOT NULL CHECK (length(address) <= 45),
    blood_type TEXT NOT NULL CHECK (length(blood_type) <= 3),
    notes TEXT CHECK (notes IS NULL OR length(notes) <= 200),
    status TEXT NOT NULL DEFAULT 'ACTIVE' CHECK (status IN ('ACTIVE', 'INACTIVE')),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT                              -- NULL until first change
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Professionals
-- ============================================================================

CREATE TABLE IF NOT EXISTS professionals (
    id BLOB PRIMARY KEY NOT NULL,                -- UUID v7, assigned by caller
    name TEXT NOT NULL CHECK (length(name) BETWEEN 3 AND 255),
    specialty TEXT NOT NULL CHECK (length(specialty) <= 50),
    license_number TEXT NOT NULL UNIQUE CHECK (length(license_number) <= 20),
    duration TEXT NOT NULL CHECK (length(duration) <= 10),
    fee TEXT CHECK (fee IS NULL OR length(fee) <= 15),
    weekdays TEXT CHECK (weekdays IS NULL OR length(weekdays) <= 100),
    status TEXT NOT NULL DEFAULT 'ACTIVE' CHECK (status IN ('ACTIVE', 'INACTIVE'))
);

CREATE INDEX IF NOT EXISTS idx_professionals_status_name ON professionals(status, name);
"#;
