//! SQLite schema definition.

/// Complete database schema for the hospital directory.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Doctors
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    specialization TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_doctors_specialization ON doctors(specialization);

-- ============================================================================
-- Patients (doctor/specialization are copies taken at intake, not keys)
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    problem TEXT NOT NULL,
    doctor TEXT,
    specialization TEXT
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Symptom-checker predictions
-- ============================================================================

CREATE TABLE IF NOT EXISTS predictions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT,
    patient_name TEXT,
    age INTEGER,
    contact_number TEXT,
    symptoms TEXT,                               -- JSON object {symptom: bool}
    predicted_disease TEXT,
    probabilities TEXT                           -- JSON object {disease: probability}
);

CREATE INDEX IF NOT EXISTS idx_predictions_disease ON predictions(predicted_disease);
"#;

/// Columns added to `predictions` after its first release.
///
/// Applied with `ALTER TABLE ... ADD COLUMN`; a "duplicate column" failure
/// means the column is already there.
pub const PREDICTION_COLUMN_MIGRATIONS: [(&str, &str); 3] = [
    ("patient_name", "TEXT"),
    ("age", "INTEGER"),
    ("contact_number", "TEXT"),
];
