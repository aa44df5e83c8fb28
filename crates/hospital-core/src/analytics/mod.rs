//! Descriptive statistics over patient and prediction records.
//!
//! Nothing here renders; front ends turn the output into tables and charts.

use serde::{Deserialize, Serialize};

use crate::models::Patient;

/// Patient field to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryField {
    Problem,
    Specialization,
    Doctor,
}

impl CategoryField {
    fn value<'a>(&self, patient: &'a Patient) -> &'a str {
        match self {
            Self::Problem => &patient.problem,
            Self::Specialization => &patient.assigned_specialization,
            Self::Doctor => &patient.assigned_doctor,
        }
    }
}

/// Numeric patient field to average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericField {
    Age,
}

impl NumericField {
    fn value(&self, patient: &Patient) -> f64 {
        match self {
            Self::Age => f64::from(patient.age),
        }
    }
}

/// Number of records sharing one category value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl CategoryCount {
    /// Percentage of `total` (0.0 - 100.0).
    pub fn share(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.count as f64 * 100.0 / total as f64
    }
}

/// Group items by exact key equality.
///
/// Ordered by descending count; equal counts keep first-seen order.
pub fn count_by<T, F>(items: &[T], key: F) -> Vec<CategoryCount>
where
    F: Fn(&T) -> &str,
{
    let mut counts: Vec<CategoryCount> = Vec::new();
    for item in items {
        let category = key(item);
        match counts.iter_mut().find(|c| c.category == category) {
            Some(existing) => existing.count += 1,
            None => counts.push(CategoryCount {
                category: category.to_string(),
                count: 1,
            }),
        }
    }

    // Stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Patient counts per value of `field`.
pub fn category_counts(patients: &[Patient], field: CategoryField) -> Vec<CategoryCount> {
    count_by(patients, |p| field.value(p))
}

/// A non-empty set of patients.
///
/// Averages are only defined here, so callers must handle the empty case
/// before asking for one.
#[derive(Debug, Clone, Copy)]
pub struct PatientCohort<'a> {
    patients: &'a [Patient],
}

impl<'a> PatientCohort<'a> {
    /// Returns `None` for an empty slice.
    pub fn new(patients: &'a [Patient]) -> Option<Self> {
        if patients.is_empty() {
            None
        } else {
            Some(Self { patients })
        }
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }
}

/// Arithmetic mean of `field` over the cohort.
pub fn mean_numeric(cohort: PatientCohort<'_>, field: NumericField) -> f64 {
    let total: f64 = cohort.patients.iter().map(|p| field.value(p)).sum();
    total / cohort.len() as f64
}

/// Dashboard figures for the patient collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_patients: usize,
    pub average_age: f64,
    pub by_problem: Vec<CategoryCount>,
    pub by_specialization: Vec<CategoryCount>,
}

/// Summarize patients, or `None` when there is nothing to analyze.
pub fn summarize(patients: &[Patient]) -> Option<AnalyticsSummary> {
    let cohort = PatientCohort::new(patients)?;
    Some(AnalyticsSummary {
        total_patients: cohort.len(),
        average_age: mean_numeric(cohort, NumericField::Age),
        by_problem: category_counts(patients, CategoryField::Problem),
        by_specialization: category_counts(patients, CategoryField::Specialization),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(id: i64, age: u32, problem: &str) -> Patient {
        Patient::new(id, format!("Patient {}", id), age, problem, None)
    }

    #[test]
    fn test_category_counts_descending() {
        let patients = vec![
            patient(1, 30, "Fever"),
            patient(2, 40, "Fever"),
            patient(3, 50, "Heart"),
        ];

        let counts = category_counts(&patients, CategoryField::Problem);
        assert_eq!(
            counts,
            vec![
                CategoryCount { category: "Fever".into(), count: 2 },
                CategoryCount { category: "Heart".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_category_counts_ties_keep_first_seen_order() {
        let patients = vec![
            patient(1, 30, "Skin"),
            patient(2, 40, "Heart"),
            patient(3, 50, "Heart"),
            patient(4, 50, "Skin"),
            patient(5, 50, "Ent"),
        ];

        let order: Vec<String> = category_counts(&patients, CategoryField::Problem)
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(order, vec!["Skin", "Heart", "Ent"]);
    }

    #[test]
    fn test_category_counts_exact_equality() {
        let patients = vec![patient(1, 30, "Fever"), patient(2, 40, "fever")];
        assert_eq!(category_counts(&patients, CategoryField::Problem).len(), 2);
    }

    #[test]
    fn test_mean_age() {
        let patients = vec![patient(1, 20, "Fever"), patient(2, 25, "Heart")];
        let cohort = PatientCohort::new(&patients).unwrap();
        assert_eq!(mean_numeric(cohort, NumericField::Age), 22.5);
    }

    #[test]
    fn test_empty_cohort_rejected() {
        assert!(PatientCohort::new(&[]).is_none());
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn test_summarize() {
        let patients = vec![
            patient(1, 10, "Fever"),
            patient(2, 20, "Fever"),
            patient(3, 60, "Ortho"),
        ];

        let summary = summarize(&patients).unwrap();
        assert_eq!(summary.total_patients, 3);
        assert_eq!(summary.average_age, 30.0);
        assert_eq!(summary.by_problem[0].category, "Fever");
        assert_eq!(summary.by_specialization.len(), 1);
        assert_eq!(summary.by_specialization[0].count, 3);
    }

    #[test]
    fn test_share() {
        let count = CategoryCount { category: "Fever".into(), count: 1 };
        assert_eq!(count.share(4), 25.0);
        assert_eq!(count.share(0), 0.0);
    }
}
