//! Patient models.

use serde::{Deserialize, Serialize};

use super::Doctor;

/// Recorded in place of a doctor name when no specialist could be routed.
pub const DOCTOR_NOT_AVAILABLE: &str = "Not Available";

/// Recorded in place of a specialization when no specialist could be routed.
pub const SPECIALIZATION_NOT_AVAILABLE: &str = "N/A";

/// Oldest age accepted at intake.
pub const MAX_AGE: u32 = 120;

/// A patient record, immutable after intake.
///
/// The assignment fields are a denormalized copy of the doctor at intake time.
/// They are either both taken from the same doctor or both hold the sentinels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    /// Sequential ID, starting at 1
    pub id: i64,
    /// Patient name
    pub name: String,
    /// Age in years (0-120)
    pub age: u32,
    /// Normalized problem keyword (e.g., "Fever")
    pub problem: String,
    /// Assigned doctor name, or "Not Available"
    pub assigned_doctor: String,
    /// Assigned specialization, or "N/A"
    pub assigned_specialization: String,
}

impl Patient {
    /// Build a patient, copying both assignment fields from `doctor` or
    /// falling back to the sentinels together.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        age: u32,
        problem: impl Into<String>,
        doctor: Option<&Doctor>,
    ) -> Self {
        let (assigned_doctor, assigned_specialization) = match doctor {
            Some(d) => (d.name.clone(), d.specialization.clone()),
            None => (
                DOCTOR_NOT_AVAILABLE.to_string(),
                SPECIALIZATION_NOT_AVAILABLE.to_string(),
            ),
        };

        Self {
            id,
            name: name.into(),
            age,
            problem: problem.into(),
            assigned_doctor,
            assigned_specialization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_with_doctor() {
        let doctor = Doctor::new(2, "Dr. Sharma", "Cardiologist");
        let patient = Patient::new(1, "Asha", 54, "Heart", Some(&doctor));

        assert_eq!(patient.assigned_doctor, "Dr. Sharma");
        assert_eq!(patient.assigned_specialization, "Cardiologist");
    }

    #[test]
    fn test_new_patient_without_doctor() {
        let patient = Patient::new(1, "Ravi", 30, "Broken_leg", None);

        assert_eq!(patient.assigned_doctor, DOCTOR_NOT_AVAILABLE);
        assert_eq!(patient.assigned_specialization, SPECIALIZATION_NOT_AVAILABLE);
    }
}
