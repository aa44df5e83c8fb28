//! Hospital Directory Core Library
//!
//! Doctor and patient records, problem-to-specialist routing, patient
//! analytics and a decision-tree symptom checker.
//!
//! # Architecture
//!
//! ```text
//!   Patient form ──► Intake validation ──► Specialist routing ──► Directory store
//!                                                                      │
//!   Symptom form ──► Intake validation ──► Classifier adapter ──► Prediction log
//!                                                                      │
//!                                                                      ▼
//!                                                           Analytics summarizer
//!                                                                      │
//!                                                                      ▼
//!                                                      Console / FFI presentation
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite persistence for doctors, patients and predictions
//! - [`store`]: Store traits and the in-memory directory
//! - [`models`]: Domain types (Doctor, Patient, PredictionRecord, etc.)
//! - [`routing`]: Problem normalization and specialist assignment
//! - [`analytics`]: Category counts and averages
//! - [`classifier`]: Decision tree and ranked disease predictions
//! - [`intake`]: Form validation and end-to-end intake workflows

pub mod analytics;
pub mod classifier;
pub mod db;
pub mod intake;
pub mod models;
pub mod routing;
pub mod store;

// Re-export commonly used types
pub use analytics::{AnalyticsSummary, CategoryCount, PatientCohort};
pub use classifier::{CareSuggestion, ClassifierAdapter, RankedDisease, TrainingSet};
pub use db::Database;
pub use intake::{Admission, IntakeError, PatientForm, SymptomForm, SymptomReport};
pub use models::{Doctor, Patient, PredictionRecord, SymptomVector};
pub use routing::{assign_specialist, normalize_problem, SpecialistRouter};
pub use store::{DirectoryStore, MemoryDirectory, PredictionLog, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HospitalError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Classifier error: {0}")]
    ClassifierError(String),
}

impl From<StoreError> for HospitalError {
    fn from(e: StoreError) -> Self {
        HospitalError::DatabaseError(e.to_string())
    }
}

impl From<IntakeError> for HospitalError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::Store(inner) => inner.into(),
            other => HospitalError::InvalidInput(other.to_string()),
        }
    }
}

impl From<classifier::ClassifierError> for HospitalError {
    fn from(e: classifier::ClassifierError) -> Self {
        HospitalError::ClassifierError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HospitalError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HospitalError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<HospitalCore>, HospitalError> {
    let db = Database::open(&path)?;
    HospitalCore::with_database(db)
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<HospitalCore>, HospitalError> {
    let db = Database::open_in_memory()?;
    HospitalCore::with_database(db)
}

// =========================================================================
// Main API Object
// =========================================================================

/// One front-end session: a database plus the fitted symptom classifier.
#[derive(uniffi::Object)]
pub struct HospitalCore {
    db: Arc<Mutex<Database>>,
    router: SpecialistRouter,
    classifier: ClassifierAdapter,
}

impl HospitalCore {
    fn with_database(db: Database) -> Result<Arc<Self>, HospitalError> {
        Ok(Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
            router: SpecialistRouter::new(),
            classifier: ClassifierAdapter::reference()?,
        }))
    }
}

#[uniffi::export]
impl HospitalCore {
    // =========================================================================
    // Directory Operations
    // =========================================================================

    /// Register a doctor.
    pub fn add_doctor(
        &self,
        name: String,
        specialization: String,
    ) -> Result<FfiDoctor, HospitalError> {
        let mut db = self.db.lock()?;
        let doctor = intake::register_doctor(&mut *db, &name, &specialization)?;
        Ok(doctor.into())
    }

    /// All doctors in registration order.
    pub fn list_doctors(&self) -> Result<Vec<FfiDoctor>, HospitalError> {
        let db = self.db.lock()?;
        let doctors = db.list_doctors()?;
        Ok(doctors.into_iter().map(|d| d.into()).collect())
    }

    /// Admit a patient, routing them to a specialist when one is available.
    pub fn admit_patient(
        &self,
        name: String,
        age: String,
        problem: String,
    ) -> Result<FfiPatient, HospitalError> {
        let mut db = self.db.lock()?;
        let form = PatientForm { name, age, problem };
        let admission = intake::admit_patient(&mut *db, &self.router, &form)?;
        Ok(admission.patient.into())
    }

    /// All patients in registration order.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, HospitalError> {
        let db = self.db.lock()?;
        let patients = db.list_patients()?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: i64) -> Result<FfiPatient, HospitalError> {
        let db = self.db.lock()?;
        db.find_by_id(id)?
            .map(Into::into)
            .ok_or_else(|| HospitalError::NotFound(format!("patient {}", id)))
    }

    /// Search patients by ID or name.
    pub fn search_patients(&self, query: String) -> Result<Vec<FfiPatient>, HospitalError> {
        let db = self.db.lock()?;
        let patients = db.search(&query)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Search doctors by name.
    pub fn search_doctors(&self, query: String) -> Result<Vec<FfiDoctor>, HospitalError> {
        let db = self.db.lock()?;
        let doctors = db.find_doctors_by_name_substring(query.trim())?;
        Ok(doctors.into_iter().map(|d| d.into()).collect())
    }

    // =========================================================================
    // Analytics Operations
    // =========================================================================

    /// Dashboard figures, or `None` when no patients are registered.
    pub fn analytics_summary(&self) -> Result<Option<FfiAnalyticsSummary>, HospitalError> {
        let db = self.db.lock()?;
        let patients = db.list_patients()?;
        Ok(analytics::summarize(&patients).map(|s| s.into()))
    }

    /// Prediction counts per predicted disease.
    pub fn disease_distribution(&self) -> Result<Vec<FfiCategoryCount>, HospitalError> {
        let db = self.db.lock()?;
        let counts = db.disease_counts()?;
        Ok(counts
            .into_iter()
            .map(|(category, count)| FfiCategoryCount {
                category,
                count: count as u32,
            })
            .collect())
    }

    // =========================================================================
    // Symptom Checker Operations
    // =========================================================================

    /// Symptom names in model input order.
    pub fn symptom_features(&self) -> Vec<String> {
        self.classifier.features().to_vec()
    }

    /// Classify symptoms and store the prediction.
    pub fn check_symptoms(
        &self,
        patient_name: String,
        age: String,
        contact_number: String,
        symptoms: Vec<FfiSymptom>,
    ) -> Result<FfiSymptomReport, HospitalError> {
        let mut db = self.db.lock()?;
        let mut vector = SymptomVector::new();
        for s in symptoms {
            vector.set(s.name, s.present);
        }
        let form = SymptomForm {
            patient_name,
            age,
            contact_number,
            symptoms: vector,
        };
        let report = intake::check_symptoms(&mut *db, &self.classifier, &form)?;
        Ok(report.into())
    }

    /// Most recent predictions first.
    pub fn recent_predictions(&self, limit: u32) -> Result<Vec<FfiPrediction>, HospitalError> {
        let db = self.db.lock()?;
        let records = db.recent_predictions(limit as usize)?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    /// Delete a prediction. Returns false if it did not exist.
    pub fn delete_prediction(&self, id: i64) -> Result<bool, HospitalError> {
        let mut db = self.db.lock()?;
        Ok(db.delete_prediction(id)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe doctor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub id: i64,
    pub name: String,
    pub specialization: String,
}

impl From<Doctor> for FfiDoctor {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            specialization: doctor.specialization,
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub problem: String,
    pub assigned_doctor: String,
    pub assigned_specialization: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.name,
            age: patient.age,
            problem: patient.problem,
            assigned_doctor: patient.assigned_doctor,
            assigned_specialization: patient.assigned_specialization,
        }
    }
}

/// FFI-safe category count.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCategoryCount {
    pub category: String,
    pub count: u32,
}

impl From<CategoryCount> for FfiCategoryCount {
    fn from(count: CategoryCount) -> Self {
        Self {
            category: count.category,
            count: count.count as u32,
        }
    }
}

/// FFI-safe analytics summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnalyticsSummary {
    pub total_patients: u32,
    pub average_age: f64,
    pub by_problem: Vec<FfiCategoryCount>,
    pub by_specialization: Vec<FfiCategoryCount>,
}

impl From<AnalyticsSummary> for FfiAnalyticsSummary {
    fn from(summary: AnalyticsSummary) -> Self {
        Self {
            total_patients: summary.total_patients as u32,
            average_age: summary.average_age,
            by_problem: summary.by_problem.into_iter().map(|c| c.into()).collect(),
            by_specialization: summary
                .by_specialization
                .into_iter()
                .map(|c| c.into())
                .collect(),
        }
    }
}

/// FFI-safe symptom flag.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSymptom {
    pub name: String,
    pub present: bool,
}

/// FFI-safe ranked disease.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRankedDisease {
    pub disease: String,
    pub probability: f64,
}

impl From<RankedDisease> for FfiRankedDisease {
    fn from(ranked: RankedDisease) -> Self {
        Self {
            disease: ranked.disease,
            probability: ranked.probability,
        }
    }
}

/// FFI-safe stored prediction.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrediction {
    pub id: i64,
    pub timestamp: String,
    pub patient_name: String,
    pub age: u32,
    pub contact_number: String,
    pub symptoms: Vec<FfiSymptom>,
    pub predicted_disease: String,
}

impl From<PredictionRecord> for FfiPrediction {
    fn from(record: PredictionRecord) -> Self {
        Self {
            id: record.id,
            timestamp: record.timestamp,
            patient_name: record.patient_name,
            age: record.age,
            contact_number: record.contact_number,
            symptoms: record
                .symptoms
                .iter()
                .map(|(name, present)| FfiSymptom {
                    name: name.to_string(),
                    present,
                })
                .collect(),
            predicted_disease: record.predicted_disease,
        }
    }
}

/// FFI-safe symptom report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSymptomReport {
    pub ranking: Vec<FfiRankedDisease>,
    pub urgent: bool,
    pub suggestion: String,
    pub prediction: FfiPrediction,
}

impl From<SymptomReport> for FfiSymptomReport {
    fn from(report: SymptomReport) -> Self {
        Self {
            ranking: report.ranking.into_iter().map(|r| r.into()).collect(),
            urgent: report.suggestion == CareSuggestion::Urgent,
            suggestion: report.suggestion.message().to_string(),
            prediction: report.record.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip() {
        let core = open_database_in_memory().unwrap();

        core.add_doctor("Dr. Mehta".into(), "General Physician".into())
            .unwrap();
        let patient = core
            .admit_patient("Asha".into(), "31".into(), "fever".into())
            .unwrap();

        assert_eq!(patient.problem, "Fever");
        assert_eq!(patient.assigned_doctor, "Dr. Mehta");
        assert_eq!(core.search_patients("asha".into()).unwrap().len(), 1);
        assert_eq!(core.get_patient(patient.id).unwrap().name, "Asha");
        assert_eq!(core.search_doctors(" meh ".into()).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_input_maps_to_ffi_error() {
        let core = open_database_in_memory().unwrap();

        let err = core
            .admit_patient("Asha".into(), "old".into(), "fever".into())
            .unwrap_err();
        assert!(matches!(err, HospitalError::InvalidInput(_)));

        let err = core.get_patient(99).unwrap_err();
        assert!(matches!(err, HospitalError::NotFound(_)));
    }

    #[test]
    fn test_store_errors_map_to_database_error() {
        let json_err = serde_json::from_str::<SymptomVector>("{'Fever': True}").unwrap_err();
        let err: HospitalError = StoreError::Json(json_err).into();
        assert!(matches!(err, HospitalError::DatabaseError(_)));

        let err: HospitalError = IntakeError::Store(StoreError::Sqlite(
            rusqlite::Error::QueryReturnedNoRows,
        ))
        .into();
        assert!(matches!(err, HospitalError::DatabaseError(_)));
    }

    #[test]
    fn test_analytics_empty_then_filled() {
        let core = open_database_in_memory().unwrap();
        assert!(core.analytics_summary().unwrap().is_none());

        core.admit_patient("A".into(), "20".into(), "Skin".into()).unwrap();
        core.admit_patient("B".into(), "40".into(), "Skin".into()).unwrap();

        let summary = core.analytics_summary().unwrap().unwrap();
        assert_eq!(summary.total_patients, 2);
        assert_eq!(summary.average_age, 30.0);
        assert_eq!(summary.by_problem[0].count, 2);
    }

    #[test]
    fn test_symptom_check_and_delete() {
        let core = open_database_in_memory().unwrap();
        assert_eq!(core.symptom_features().len(), 9);

        let report = core
            .check_symptoms(
                "Asha".into(),
                "40".into(),
                "555-0100".into(),
                vec![FfiSymptom {
                    name: "Diarrhea".into(),
                    present: true,
                }],
            )
            .unwrap();

        assert_eq!(report.ranking[0].disease, "Migraine");
        assert!(!report.urgent);
        assert_eq!(core.recent_predictions(10).unwrap().len(), 1);
        assert_eq!(core.disease_distribution().unwrap()[0].category, "Migraine");

        assert!(core.delete_prediction(report.prediction.id).unwrap());
        assert!(core.recent_predictions(10).unwrap().is_empty());
    }
}
