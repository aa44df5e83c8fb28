//! Symptom-to-disease classifier.
//!
//! A decision tree is fitted once on a fixed training table and then treated
//! as read-only configuration. Predictions are full rankings over every
//! trained disease label.

mod dataset;
mod tree;

pub use dataset::*;
pub use tree::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{ProbabilityMap, SymptomVector};

/// Diseases that call for urgent care when ranked first.
pub const EMERGENCY_DISEASES: [&str; 4] = ["COVID-19", "Dengue", "Malaria", "Asthma"];

/// Classifier errors.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Training set has no rows")]
    EmptyTrainingSet,

    #[error("Training set has no features")]
    NoFeatures,

    #[error("Row {row} has {found} flags, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// One entry of a prediction ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDisease {
    pub disease: String,
    /// Probability (0.0 - 1.0)
    pub probability: f64,
}

/// Suggested next step for the top-ranked disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareSuggestion {
    /// Visit an emergency department or specialist immediately
    Urgent,
    /// A general physician visit is enough
    Routine,
}

impl CareSuggestion {
    pub fn for_top(disease: &str) -> Self {
        if is_emergency(disease) {
            Self::Urgent
        } else {
            Self::Routine
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Urgent => "Please visit an Emergency or Specialist immediately!",
            Self::Routine => "You may consider visiting a General Physician.",
        }
    }
}

impl std::fmt::Display for CareSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Urgent => write!(f, "URGENT"),
            Self::Routine => write!(f, "ROUTINE"),
        }
    }
}

/// Whether `disease` is in [`EMERGENCY_DISEASES`].
pub fn is_emergency(disease: &str) -> bool {
    EMERGENCY_DISEASES.contains(&disease)
}

/// Fitted classifier behind a ranked-probability contract.
#[derive(Debug, Clone)]
pub struct ClassifierAdapter {
    features: Vec<String>,
    classes: Vec<String>,
    tree: DecisionTree,
}

impl ClassifierAdapter {
    /// Fit a tree on `set`.
    pub fn fit(set: &TrainingSet) -> ClassifierResult<Self> {
        if set.features.is_empty() {
            return Err(ClassifierError::NoFeatures);
        }
        if set.rows.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }
        if let Some((row, bad)) = set
            .rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.flags.len() != set.features.len())
        {
            return Err(ClassifierError::RowWidth {
                row,
                expected: set.features.len(),
                found: bad.flags.len(),
            });
        }

        let classes = set.classes();
        let samples: Vec<Vec<bool>> = set.rows.iter().map(|r| r.flags.clone()).collect();
        let labels: Vec<usize> = set
            .rows
            .iter()
            .map(|r| classes.binary_search(&r.label).unwrap_or_default())
            .collect();

        let tree = DecisionTree::fit(&samples, &labels, classes.len());
        info!(
            rows = set.rows.len(),
            classes = classes.len(),
            leaves = tree.leaf_count(),
            "symptom classifier fitted"
        );

        Ok(Self {
            features: set.features.clone(),
            classes,
            tree,
        })
    }

    /// Classifier fitted on [`TrainingSet::reference`].
    pub fn reference() -> ClassifierResult<Self> {
        Self::fit(&TrainingSet::reference())
    }

    /// Feature names in input order.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Trained labels in class order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Rank every trained disease for the reported symptoms.
    ///
    /// Sorted by probability descending; equal probabilities keep class order.
    pub fn predict(&self, symptoms: &SymptomVector) -> Vec<RankedDisease> {
        let flags = symptoms.to_flags(&self.features);
        let mut ranking: Vec<RankedDisease> = self
            .classes
            .iter()
            .zip(self.tree.predict_proba(&flags))
            .map(|(disease, &probability)| RankedDisease {
                disease: disease.clone(),
                probability,
            })
            .collect();

        ranking.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranking
    }
}

/// Ranking as a disease → probability map for storage.
pub fn probability_map(ranking: &[RankedDisease]) -> ProbabilityMap {
    ranking
        .iter()
        .map(|r| (r.disease.clone(), r.probability))
        .collect()
}
