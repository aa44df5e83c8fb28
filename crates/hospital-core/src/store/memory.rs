//! In-memory directory, owned by a single session.

use tracing::info;

use super::{name_matches, DirectoryStore, PredictionLog, StoreResult};
use crate::analytics::count_by;
use crate::models::{Doctor, NewPrediction, Patient, PredictionRecord, DEFAULT_DOCTORS};

/// Vec-backed store. Never returns an error.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    predictions: Vec<PredictionRecord>,
    next_prediction_id: i64,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory seeded with the five standard doctors.
    pub fn with_default_doctors() -> Self {
        let mut directory = Self::new();
        for (id, (name, specialization)) in (1..).zip(DEFAULT_DOCTORS) {
            directory.doctors.push(Doctor::new(id, name, specialization));
        }
        directory
    }
}

impl DirectoryStore for MemoryDirectory {
    fn add_doctor(&mut self, name: &str, specialization: &str) -> StoreResult<Doctor> {
        let doctor = Doctor::new(self.doctors.len() as i64 + 1, name, specialization);
        info!(id = doctor.id, specialization = %doctor.specialization, "doctor registered");
        self.doctors.push(doctor.clone());
        Ok(doctor)
    }

    fn add_patient(
        &mut self,
        name: &str,
        age: u32,
        problem: &str,
        doctor: Option<&Doctor>,
    ) -> StoreResult<Patient> {
        let patient = Patient::new(self.patients.len() as i64 + 1, name, age, problem, doctor);
        info!(id = patient.id, problem = %patient.problem, "patient registered");
        self.patients.push(patient.clone());
        Ok(patient)
    }

    fn list_doctors(&self) -> StoreResult<Vec<Doctor>> {
        Ok(self.doctors.clone())
    }

    fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        Ok(self.patients.clone())
    }

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Patient>> {
        Ok(self.patients.iter().find(|p| p.id == id).cloned())
    }

    fn find_by_name_substring(&self, query: &str) -> StoreResult<Vec<Patient>> {
        Ok(self
            .patients
            .iter()
            .filter(|p| name_matches(&p.name, query))
            .cloned()
            .collect())
    }

    fn find_doctors_by_name_substring(&self, query: &str) -> StoreResult<Vec<Doctor>> {
        Ok(self
            .doctors
            .iter()
            .filter(|d| name_matches(&d.name, query))
            .cloned()
            .collect())
    }
}

impl PredictionLog for MemoryDirectory {
    fn record_prediction(&mut self, prediction: NewPrediction) -> StoreResult<PredictionRecord> {
        // IDs are never reused after a delete
        self.next_prediction_id += 1;
        let record = PredictionRecord::from_new(self.next_prediction_id, prediction);
        info!(id = record.id, disease = %record.predicted_disease, "prediction recorded");
        self.predictions.push(record.clone());
        Ok(record)
    }

    fn find_prediction(&self, id: i64) -> StoreResult<Option<PredictionRecord>> {
        Ok(self.predictions.iter().find(|p| p.id == id).cloned())
    }

    fn recent_predictions(&self, limit: usize) -> StoreResult<Vec<PredictionRecord>> {
        Ok(self.predictions.iter().rev().take(limit).cloned().collect())
    }

    fn delete_prediction(&mut self, id: i64) -> StoreResult<bool> {
        let before = self.predictions.len();
        self.predictions.retain(|p| p.id != id);
        Ok(self.predictions.len() < before)
    }

    fn disease_counts(&self) -> StoreResult<Vec<(String, usize)>> {
        Ok(count_by(&self.predictions, |p| p.predicted_disease.as_str())
            .into_iter()
            .map(|c| (c.category, c.count))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SymptomVector, DOCTOR_NOT_AVAILABLE};

    fn prediction(disease: &str) -> NewPrediction {
        NewPrediction {
            timestamp: "2026-01-01 09:00:00".into(),
            patient_name: "Asha".into(),
            age: 40,
            contact_number: "555-0100".into(),
            symptoms: SymptomVector::from_flags(&["Fever"], &[true]),
            predicted_disease: disease.into(),
            probabilities: [(disease.to_string(), 1.0)].into_iter().collect(),
        }
    }

    #[test]
    fn test_sequential_ids() {
        let mut dir = MemoryDirectory::new();
        let d1 = dir.add_doctor("Dr. A", "Cardiologist").unwrap();
        let d2 = dir.add_doctor("Dr. A", "Cardiologist").unwrap();
        assert_eq!(d1.id, 1);
        assert_eq!(d2.id, 2);

        let p1 = dir.add_patient("Ravi", 30, "Heart", Some(&d1)).unwrap();
        let p2 = dir.add_patient("Mira", 8, "Skin", None).unwrap();
        assert_eq!(p1.id, 1);
        assert_eq!(p2.id, 2);
        assert_eq!(p2.assigned_doctor, DOCTOR_NOT_AVAILABLE);
    }

    #[test]
    fn test_default_doctors() {
        let dir = MemoryDirectory::with_default_doctors();
        let doctors = dir.list_doctors().unwrap();
        assert_eq!(doctors.len(), 5);
        assert_eq!(doctors[0], Doctor::new(1, "Dr. Mehta", "General Physician"));
        assert_eq!(doctors[4], Doctor::new(5, "Dr. Nair", "ENT Specialist"));
    }

    #[test]
    fn test_search_by_id_takes_precedence() {
        let mut dir = MemoryDirectory::new();
        dir.add_patient("Patient 2", 20, "Fever", None).unwrap();
        dir.add_patient("Bob", 30, "Fever", None).unwrap();

        // "2" is an ID query, not a substring of "Patient 2"
        let results = dir.search("2").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Bob");

        assert!(dir.search("3").unwrap().is_empty());
    }

    #[test]
    fn test_search_by_name() {
        let mut dir = MemoryDirectory::new();
        dir.add_patient("Max", 20, "Fever", None).unwrap();
        dir.add_patient("Maxine", 30, "Skin", None).unwrap();
        dir.add_patient("Luna", 40, "Heart", None).unwrap();

        let results = dir.search("  max ").unwrap();
        assert_eq!(results.len(), 2);
        assert!(dir.search("").unwrap().is_empty());
        assert!(dir.search("   ").unwrap().is_empty());
    }

    #[test]
    fn test_prediction_ids_not_reused() {
        let mut dir = MemoryDirectory::new();
        let first = dir.record_prediction(prediction("Flu")).unwrap();
        assert!(dir.delete_prediction(first.id).unwrap());
        assert!(!dir.delete_prediction(first.id).unwrap());

        let second = dir.record_prediction(prediction("Flu")).unwrap();
        assert!(second.id > first.id);
        assert!(dir.find_prediction(first.id).unwrap().is_none());
    }

    #[test]
    fn test_recent_predictions_newest_first() {
        let mut dir = MemoryDirectory::new();
        for disease in ["Flu", "Migraine", "Flu"] {
            dir.record_prediction(prediction(disease)).unwrap();
        }

        let recent = dir.recent_predictions(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, 3);
        assert_eq!(recent[1].id, 2);

        let counts = dir.disease_counts().unwrap();
        assert_eq!(counts, vec![("Flu".to_string(), 2), ("Migraine".to_string(), 1)]);
    }
}
