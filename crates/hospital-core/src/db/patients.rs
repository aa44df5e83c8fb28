//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::info;

use super::{Database, DbResult};
use crate::models::{Doctor, Patient};
use crate::store::name_matches;

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        problem: row.get(3)?,
        assigned_doctor: row.get(4)?,
        assigned_specialization: row.get(5)?,
    })
}

impl Database {
    /// Insert a patient, copying the assigned doctor's name and specialization.
    pub fn insert_patient(
        &self,
        name: &str,
        age: u32,
        problem: &str,
        doctor: Option<&Doctor>,
    ) -> DbResult<Patient> {
        // Build first so both assignment columns come from one place
        let mut patient = Patient::new(0, name, age, problem, doctor);

        self.conn.execute(
            r#"
            INSERT INTO patients (name, age, problem, doctor, specialization)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                patient.name,
                patient.age,
                patient.problem,
                patient.assigned_doctor,
                patient.assigned_specialization,
            ],
        )?;

        patient.id = self.conn.last_insert_rowid();
        info!(id = patient.id, problem = %patient.problem, "patient registered");
        Ok(patient)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: i64) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, age, problem, doctor, specialization
                FROM patients
                WHERE id = ?
                "#,
                [id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Search patients by name (case-insensitive substring).
    ///
    /// SQLite's `lower()` only folds ASCII, so matching happens here.
    pub fn search_patients_by_name(&self, query: &str) -> DbResult<Vec<Patient>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut patients = self.get_patients()?;
        patients.retain(|p| name_matches(&p.name, query));
        Ok(patients)
    }

    /// List all patients in registration order.
    pub fn get_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, age, problem, doctor, specialization
            FROM patients
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DOCTOR_NOT_AVAILABLE, SPECIALIZATION_NOT_AVAILABLE};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();
        let doctor = db.insert_doctor("Dr. Sharma", "Cardiologist").unwrap();

        let patient = db.insert_patient("Asha", 54, "Heart", Some(&doctor)).unwrap();
        assert_eq!(patient.id, 1);

        let retrieved = db.get_patient(patient.id).unwrap().unwrap();
        assert_eq!(retrieved, patient);
        assert_eq!(retrieved.assigned_doctor, "Dr. Sharma");
        assert_eq!(retrieved.assigned_specialization, "Cardiologist");
    }

    #[test]
    fn test_insert_unassigned() {
        let db = setup_db();

        let patient = db.insert_patient("Ravi", 30, "Broken_leg", None).unwrap();
        let retrieved = db.get_patient(patient.id).unwrap().unwrap();
        assert_eq!(retrieved.assigned_doctor, DOCTOR_NOT_AVAILABLE);
        assert_eq!(retrieved.assigned_specialization, SPECIALIZATION_NOT_AVAILABLE);
    }

    #[test]
    fn test_get_missing() {
        let db = setup_db();
        assert!(db.get_patient(42).unwrap().is_none());
    }

    #[test]
    fn test_search_patients() {
        let db = setup_db();

        db.insert_patient("Max", 20, "Fever", None).unwrap();
        db.insert_patient("Maxine", 30, "Skin", None).unwrap();
        db.insert_patient("Luna", 40, "Heart", None).unwrap();

        let results = db.search_patients_by_name("MAX").unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().any(|p| p.name == "Max"));
        assert!(results.iter().any(|p| p.name == "Maxine"));

        // Substring, not prefix
        assert_eq!(db.search_patients_by_name("un").unwrap().len(), 1);
        assert!(db.search_patients_by_name("").unwrap().is_empty());
    }

    #[test]
    fn test_search_patients_non_ascii_case() {
        let db = setup_db();

        db.insert_patient("ÉLODIE", 35, "Skin", None).unwrap();
        db.insert_patient("Zoë", 28, "Fever", None).unwrap();

        let results = db.search_patients_by_name("élodie").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "ÉLODIE");
        assert_eq!(db.search_patients_by_name("ZOË").unwrap().len(), 1);
    }

    #[test]
    fn test_list_in_insertion_order() {
        let db = setup_db();

        db.insert_patient("Zed", 20, "Fever", None).unwrap();
        db.insert_patient("Amy", 30, "Skin", None).unwrap();

        let names: Vec<String> = db.get_patients().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
    }
}
