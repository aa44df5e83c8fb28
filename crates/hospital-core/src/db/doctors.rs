//! Doctor database operations.

use rusqlite::{params, Row};
use tracing::info;

use super::{Database, DbResult};
use crate::models::Doctor;
use crate::store::name_matches;

fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
    })
}

impl Database {
    /// Insert a doctor and return it with its assigned ID.
    pub fn insert_doctor(&self, name: &str, specialization: &str) -> DbResult<Doctor> {
        self.conn.execute(
            "INSERT INTO doctors (name, specialization) VALUES (?1, ?2)",
            params![name, specialization],
        )?;

        let doctor = Doctor::new(self.conn.last_insert_rowid(), name, specialization);
        info!(id = doctor.id, specialization = %doctor.specialization, "doctor registered");
        Ok(doctor)
    }

    /// List all doctors in registration order.
    pub fn get_doctors(&self) -> DbResult<Vec<Doctor>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, specialization FROM doctors ORDER BY id")?;

        let rows = stmt.query_map([], doctor_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Search doctors by name (case-insensitive substring).
    pub fn search_doctors_by_name(&self, query: &str) -> DbResult<Vec<Doctor>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut doctors = self.get_doctors()?;
        doctors.retain(|d| name_matches(&d.name, query));
        Ok(doctors)
    }
}
