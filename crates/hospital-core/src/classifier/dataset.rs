//! Training data for the symptom checker.

use serde::{Deserialize, Serialize};

/// Symptom features, in model input order.
pub const SYMPTOM_FEATURES: [&str; 9] = [
    "Fever",
    "Cough",
    "Headache",
    "Nausea",
    "Fatigue",
    "SoreThroat",
    "MusclePain",
    "Diarrhea",
    "ShortnessBreath",
];

/// Hand-labelled rows: flags in [`SYMPTOM_FEATURES`] order, then the disease.
const REFERENCE_ROWS: [([u8; 9], &str); 10] = [
    ([1, 1, 1, 0, 1, 1, 1, 0, 0], "Flu"),
    ([1, 0, 1, 1, 1, 0, 1, 0, 1], "Dengue"),
    ([0, 0, 0, 1, 0, 0, 0, 1, 0], "Food Poisoning"),
    ([1, 1, 0, 1, 1, 1, 1, 0, 1], "COVID-19"),
    ([1, 1, 1, 0, 1, 1, 0, 0, 1], "Common Cold"),
    ([0, 1, 1, 1, 1, 0, 1, 1, 0], "Malaria"),
    ([0, 0, 0, 0, 0, 0, 0, 1, 0], "Migraine"),
    ([1, 1, 1, 0, 1, 1, 0, 0, 1], "Asthma"),
    ([1, 0, 0, 0, 0, 1, 1, 0, 0], "Allergy"),
    ([0, 1, 0, 1, 1, 0, 0, 1, 0], "Stomach Infection"),
];

/// One labelled training row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub flags: Vec<bool>,
    pub label: String,
}

/// Feature names plus labelled rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSet {
    pub features: Vec<String>,
    pub rows: Vec<TrainingRow>,
}

impl TrainingSet {
    pub fn new(features: Vec<String>) -> Self {
        Self {
            features,
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push(&mut self, flags: Vec<bool>, label: impl Into<String>) {
        self.rows.push(TrainingRow {
            flags,
            label: label.into(),
        });
    }

    /// The fixed ten-row symptom table.
    pub fn reference() -> Self {
        let mut set = Self::new(SYMPTOM_FEATURES.iter().map(|f| f.to_string()).collect());
        for (flags, label) in REFERENCE_ROWS {
            set.push(flags.iter().map(|&f| f == 1).collect(), label);
        }
        set
    }

    /// Distinct labels, sorted.
    pub fn classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self.rows.iter().map(|r| r.label.clone()).collect();
        classes.sort();
        classes.dedup();
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        let set = TrainingSet::reference();
        assert_eq!(set.features.len(), 9);
        assert_eq!(set.rows.len(), 10);
        assert!(set.rows.iter().all(|r| r.flags.len() == 9));
    }

    #[test]
    fn test_classes_sorted_unique() {
        let classes = TrainingSet::reference().classes();
        assert_eq!(classes.len(), 10);
        assert_eq!(classes[0], "Allergy");
        assert_eq!(classes[1], "Asthma");
        assert_eq!(classes[2], "COVID-19");
        assert_eq!(classes[9], "Stomach Infection");
    }

    #[test]
    fn test_reference_row_values() {
        let set = TrainingSet::reference();
        let migraine = set.rows.iter().find(|r| r.label == "Migraine").unwrap();
        // Only Diarrhea is set
        assert_eq!(
            migraine.flags,
            vec![false, false, false, false, false, false, false, true, false]
        );
    }
}
