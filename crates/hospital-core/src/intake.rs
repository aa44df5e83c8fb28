//! Intake workflows shared by every front end.
//!
//! Form input is validated here before any store is touched, so a rejected
//! form never leaves a partial write behind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{probability_map, CareSuggestion, ClassifierAdapter, RankedDisease};
use crate::models::{
    timestamp_now, Doctor, NewPrediction, Patient, PredictionRecord, SymptomVector, MAX_AGE,
};
use crate::routing::{normalize_problem, SpecialistRouter};
use crate::store::{DirectoryStore, PredictionLog, StoreError};

/// Number of diseases shown in a symptom report.
pub const TOP_PREDICTIONS: usize = 3;

/// Intake errors.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Please enter the {0}.")]
    MissingField(&'static str),

    #[error("Age must be a whole number, got '{0}'")]
    InvalidAge(String),

    #[error("Age must be between 0 and 120, got {0}")]
    AgeOutOfRange(u64),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// Parse an age typed by a user.
pub fn parse_age(text: &str) -> IntakeResult<u32> {
    let text = text.trim();
    let age: u64 = text
        .parse()
        .map_err(|_| IntakeError::InvalidAge(text.to_string()))?;

    if age > u64::from(MAX_AGE) {
        return Err(IntakeError::AgeOutOfRange(age));
    }
    Ok(age as u32)
}

/// Trimmed value of a required field.
pub fn require(value: &str, field: &'static str) -> IntakeResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(IntakeError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Register a doctor from form input.
pub fn register_doctor<S>(store: &mut S, name: &str, specialization: &str) -> IntakeResult<Doctor>
where
    S: DirectoryStore + ?Sized,
{
    let name = require(name, "doctor name")?;
    let specialization = require(specialization, "specialization")?;
    Ok(store.add_doctor(&name, &specialization)?)
}

/// Patient intake form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientForm {
    pub name: String,
    pub age: String,
    pub problem: String,
}

/// Outcome of a patient intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    pub patient: Patient,
    /// The routed doctor, if any
    pub doctor: Option<Doctor>,
}

/// Validate the form, route the problem and store the patient.
pub fn admit_patient<S>(
    store: &mut S,
    router: &SpecialistRouter,
    form: &PatientForm,
) -> IntakeResult<Admission>
where
    S: DirectoryStore + ?Sized,
{
    let name = require(&form.name, "patient name")?;
    let age = parse_age(&form.age)?;
    let problem = normalize_problem(&form.problem);
    if problem.is_empty() {
        return Err(IntakeError::MissingField("health issue"));
    }

    let doctor = router.assign(&problem, &*store)?;
    let patient = store.add_patient(&name, age, &problem, doctor.as_ref())?;

    Ok(Admission { patient, doctor })
}

/// Symptom checker form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomForm {
    pub patient_name: String,
    pub age: String,
    pub contact_number: String,
    pub symptoms: SymptomVector,
}

/// Result of a symptom check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomReport {
    /// Every trained disease, most likely first
    pub ranking: Vec<RankedDisease>,
    pub suggestion: CareSuggestion,
    /// The stored prediction
    pub record: PredictionRecord,
}

impl SymptomReport {
    /// The most likely diseases.
    pub fn top(&self) -> &[RankedDisease] {
        &self.ranking[..self.ranking.len().min(TOP_PREDICTIONS)]
    }
}

/// Validate the form, classify the symptoms and store the prediction.
pub fn check_symptoms<L>(
    log: &mut L,
    classifier: &ClassifierAdapter,
    form: &SymptomForm,
) -> IntakeResult<SymptomReport>
where
    L: PredictionLog + ?Sized,
{
    let patient_name = require(&form.patient_name, "patient name")?;
    let contact_number = require(&form.contact_number, "contact number")?;
    let age = parse_age(&form.age)?;

    let ranking = classifier.predict(&form.symptoms);
    // A fitted classifier always has at least one class
    let predicted_disease = ranking
        .first()
        .map(|r| r.disease.clone())
        .unwrap_or_default();
    let suggestion = CareSuggestion::for_top(&predicted_disease);

    let record = log.record_prediction(NewPrediction {
        timestamp: timestamp_now(),
        patient_name,
        age,
        contact_number,
        symptoms: form.symptoms.clone(),
        predicted_disease,
        probabilities: probability_map(&ranking),
    })?;

    Ok(SymptomReport {
        ranking,
        suggestion,
        record,
    })
}
