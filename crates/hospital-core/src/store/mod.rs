//! Record stores for doctors, patients and predictions.
//!
//! Two implementations share these traits: [`MemoryDirectory`] for
//! session-scoped use and [`crate::db::Database`] for SQLite persistence.

mod memory;

pub use memory::*;

use thiserror::Error;

use crate::models::{Doctor, NewPrediction, Patient, PredictionRecord};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Doctor and patient records with sequential IDs.
///
/// Inputs are not validated here; reject bad names and ages before calling.
pub trait DirectoryStore {
    /// Register a doctor. Duplicate names are allowed.
    fn add_doctor(&mut self, name: &str, specialization: &str) -> StoreResult<Doctor>;

    /// Register a patient, assigned to `doctor` or to nobody.
    fn add_patient(
        &mut self,
        name: &str,
        age: u32,
        problem: &str,
        doctor: Option<&Doctor>,
    ) -> StoreResult<Patient>;

    /// All doctors in registration order.
    fn list_doctors(&self) -> StoreResult<Vec<Doctor>>;

    /// All patients in registration order.
    fn list_patients(&self) -> StoreResult<Vec<Patient>>;

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Patient>>;

    /// Patients whose name contains `query`, ignoring case. Empty query matches nothing.
    fn find_by_name_substring(&self, query: &str) -> StoreResult<Vec<Patient>>;

    /// Doctors whose name contains `query`, ignoring case. Empty query matches nothing.
    fn find_doctors_by_name_substring(&self, query: &str) -> StoreResult<Vec<Doctor>>;

    /// Search box semantics: a numeric query is an exact ID lookup,
    /// anything else a name substring search.
    fn search(&self, query: &str) -> StoreResult<Vec<Patient>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        match parse_id_query(query) {
            Some(id) => Ok(self.find_by_id(id)?.into_iter().collect()),
            None => self.find_by_name_substring(query),
        }
    }
}

/// Stored symptom-checker predictions.
pub trait PredictionLog {
    fn record_prediction(&mut self, prediction: NewPrediction) -> StoreResult<PredictionRecord>;

    fn find_prediction(&self, id: i64) -> StoreResult<Option<PredictionRecord>>;

    /// Most recent predictions first.
    fn recent_predictions(&self, limit: usize) -> StoreResult<Vec<PredictionRecord>>;

    /// Returns false if no prediction had that ID.
    fn delete_prediction(&mut self, id: i64) -> StoreResult<bool>;

    /// Number of stored predictions per predicted disease, most frequent first.
    fn disease_counts(&self) -> StoreResult<Vec<(String, usize)>>;
}

/// A query made only of ASCII digits is an ID.
fn parse_id_query(query: &str) -> Option<i64> {
    if query.chars().all(|c| c.is_ascii_digit()) {
        query.parse().ok()
    } else {
        None
    }
}

/// Case-insensitive substring match used by the in-memory store.
pub(crate) fn name_matches(name: &str, query: &str) -> bool {
    !query.is_empty() && name.to_lowercase().contains(&query.to_lowercase())
}
