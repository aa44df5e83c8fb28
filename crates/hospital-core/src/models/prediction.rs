//! Symptom-checker prediction models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reported symptoms keyed by symptom name.
///
/// Symptoms absent from the map read as not present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SymptomVector(BTreeMap<String, bool>);

impl SymptomVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair each feature name with the flag at the same position.
    pub fn from_flags<S: AsRef<str>>(features: &[S], flags: &[bool]) -> Self {
        Self(
            features
                .iter()
                .zip(flags)
                .map(|(name, present)| (name.as_ref().to_string(), *present))
                .collect(),
        )
    }

    /// Set a symptom flag.
    pub fn set(&mut self, symptom: impl Into<String>, present: bool) {
        self.0.insert(symptom.into(), present);
    }

    /// Whether the symptom was reported.
    pub fn is_present(&self, symptom: &str) -> bool {
        self.0.get(symptom).copied().unwrap_or(false)
    }

    /// Flags in the order of `features`.
    pub fn to_flags<S: AsRef<str>>(&self, features: &[S]) -> Vec<bool> {
        features.iter().map(|f| self.is_present(f.as_ref())).collect()
    }

    /// Names of the reported symptoms.
    pub fn present(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, present)| **present)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, present)| (name.as_str(), *present))
    }

    /// Encode as a JSON object for the `symptoms` column.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse the `symptoms` column back.
    pub fn decode(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Probability per disease label.
pub type ProbabilityMap = BTreeMap<String, f64>;

/// A prediction about to be stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPrediction {
    pub timestamp: String,
    pub patient_name: String,
    pub age: u32,
    pub contact_number: String,
    pub symptoms: SymptomVector,
    pub predicted_disease: String,
    pub probabilities: ProbabilityMap,
}

/// A stored prediction. Deletable, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRecord {
    pub id: i64,
    /// Local time the prediction was made ("%Y-%m-%d %H:%M:%S")
    pub timestamp: String,
    pub patient_name: String,
    pub age: u32,
    pub contact_number: String,
    pub symptoms: SymptomVector,
    pub predicted_disease: String,
    pub probabilities: ProbabilityMap,
}

impl PredictionRecord {
    pub fn from_new(id: i64, new: NewPrediction) -> Self {
        Self {
            id,
            timestamp: new.timestamp,
            patient_name: new.patient_name,
            age: new.age,
            contact_number: new.contact_number,
            symptoms: new.symptoms,
            predicted_disease: new.predicted_disease,
            probabilities: new.probabilities,
        }
    }
}

/// Timestamp format used for prediction records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
