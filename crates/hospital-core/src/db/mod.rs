//! Database layer for the hospital directory.

mod schema;
mod doctors;
mod patients;
mod predictions;

pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

use crate::models::{Doctor, NewPrediction, Patient, PredictionRecord};
use crate::store::{DirectoryStore, PredictionLog, StoreError, StoreResult};

/// Database errors share the store error type.
pub type DbError = StoreError;

pub type DbResult<T> = StoreResult<T>;

/// Default database file name.
pub const DEFAULT_DB_FILE: &str = "hospital.db";

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create tables, then bring older prediction tables up to date.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.migrate()?;
        Ok(())
    }

    /// Add missing prediction columns. Safe to run repeatedly.
    fn migrate(&self) -> DbResult<()> {
        for (column, sql_type) in PREDICTION_COLUMN_MIGRATIONS {
            let sql = format!("ALTER TABLE predictions ADD COLUMN {} {}", column, sql_type);
            match self.conn.execute_batch(&sql) {
                Ok(()) => debug!(column, "added predictions column"),
                Err(e) if is_duplicate_column(&e) => {
                    debug!(column, "predictions column already present")
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("duplicate column name")
    )
}

impl DirectoryStore for Database {
    fn add_doctor(&mut self, name: &str, specialization: &str) -> StoreResult<Doctor> {
        self.insert_doctor(name, specialization)
    }

    fn add_patient(
        &mut self,
        name: &str,
        age: u32,
        problem: &str,
        doctor: Option<&Doctor>,
    ) -> StoreResult<Patient> {
        self.insert_patient(name, age, problem, doctor)
    }

    fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        self.get_doctors()
    }

    fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        self.get_patients()
    }

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Patient>> {
        self.get_patient(id)
    }

    fn find_by_name_substring(&self, query: &str) -> StoreResult<Vec<Patient>> {
        self.search_patients_by_name(query)
    }

    fn find_doctors_by_name_substring(&self, query: &str) -> StoreResult<Vec<Doctor>> {
        self.search_doctors_by_name(query)
    }
}

impl PredictionLog for Database {
    fn record_prediction(&mut self, prediction: NewPrediction) -> StoreResult<PredictionRecord> {
        self.insert_prediction(prediction)
    }

    fn find_prediction(&self, id: i64) -> StoreResult<Option<PredictionRecord>> {
        self.get_prediction(id)
    }

    fn recent_predictions(&self, limit: usize) -> StoreResult<Vec<PredictionRecord>> {
        self.get_recent_predictions(limit)
    }

    fn delete_prediction(&mut self, id: i64) -> StoreResult<bool> {
        self.remove_prediction(id)
    }

    fn disease_counts(&self) -> StoreResult<Vec<(String, usize)>> {
        self.count_predicted_diseases()
    }
}
