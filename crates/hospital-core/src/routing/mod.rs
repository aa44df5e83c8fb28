//! Problem-to-specialist routing.
//!
//! Pipeline: raw problem → normalized keyword → specialization → first
//! registered doctor with that specialization.

mod normalizer;

pub use normalizer::*;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::Doctor;
use crate::store::{DirectoryStore, StoreResult};

/// Fixed keyword → specialization table.
pub const SPECIALIST_TABLE: [(&str, &str); 5] = [
    ("Fever", "General Physician"),
    ("Heart", "Cardiologist"),
    ("Skin", "Dermatologist"),
    ("Ortho", "Orthopedic"),
    ("Ent", "ENT Specialist"),
];

/// Maps normalized problem keywords to specializations.
#[derive(Debug, Clone)]
pub struct SpecialistRouter {
    /// Normalized keyword → specialization
    table: HashMap<String, String>,
}

impl Default for SpecialistRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecialistRouter {
    /// Create a router with the standard table.
    pub fn new() -> Self {
        Self {
            table: SPECIALIST_TABLE
                .iter()
                .map(|(keyword, spec)| (keyword.to_string(), spec.to_string()))
                .collect(),
        }
    }

    /// Add or replace a keyword mapping.
    pub fn add_route(&mut self, keyword: &str, specialization: &str) {
        self.table
            .insert(normalize_problem(keyword), specialization.to_string());
    }

    /// Specialization for a problem, if the keyword is known.
    pub fn specialization_for(&self, problem: &str) -> Option<&str> {
        self.table
            .get(&normalize_problem(problem))
            .map(String::as_str)
    }

    /// Find the doctor a patient with `problem` should see.
    ///
    /// Unknown keywords and unstaffed specializations both yield `None`.
    /// Among doctors sharing the specialization, the first registered wins.
    pub fn assign<S>(&self, problem: &str, store: &S) -> StoreResult<Option<Doctor>>
    where
        S: DirectoryStore + ?Sized,
    {
        let Some(specialization) = self.specialization_for(problem) else {
            debug!(problem, "no specialization for problem");
            return Ok(None);
        };

        let doctor = store
            .list_doctors()?
            .into_iter()
            .find(|d| d.specialization == specialization);

        match &doctor {
            Some(d) => debug!(problem, doctor = %d.name, "specialist assigned"),
            None => warn!(problem, specialization, "no doctor registered for specialization"),
        }

        Ok(doctor)
    }
}

/// Route with the standard table.
pub fn assign_specialist<S>(problem: &str, store: &S) -> StoreResult<Option<Doctor>>
where
    S: DirectoryStore + ?Sized,
{
    SpecialistRouter::new().assign(problem, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDirectory;

    #[test]
    fn test_specialization_lookup() {
        let router = SpecialistRouter::new();

        assert_eq!(router.specialization_for("fever"), Some("General Physician"));
        assert_eq!(router.specialization_for("HEART"), Some("Cardiologist"));
        assert_eq!(router.specialization_for(" skin "), Some("Dermatologist"));
        assert_eq!(router.specialization_for("Ortho"), Some("Orthopedic"));
        assert_eq!(router.specialization_for("ENT"), Some("ENT Specialist"));
        assert_eq!(router.specialization_for("broken_leg"), None);
        assert_eq!(router.specialization_for(""), None);
    }

    #[test]
    fn test_assign_first_registered() {
        let mut dir = MemoryDirectory::new();
        let d1 = dir.add_doctor("Dr. One", "Cardiologist").unwrap();
        dir.add_doctor("Dr. Two", "Cardiologist").unwrap();

        let assigned = assign_specialist("heart", &dir).unwrap();
        assert_eq!(assigned, Some(d1));
    }

    #[test]
    fn test_assign_unstaffed_specialization() {
        let mut dir = MemoryDirectory::new();
        dir.add_doctor("Dr. One", "Cardiologist").unwrap();

        assert_eq!(assign_specialist("skin", &dir).unwrap(), None);
    }

    #[test]
    fn test_specialization_exact_match() {
        let mut dir = MemoryDirectory::new();
        dir.add_doctor("Dr. Lower", "cardiologist").unwrap();

        assert_eq!(assign_specialist("heart", &dir).unwrap(), None);
    }

    #[test]
    fn test_custom_route() {
        let mut router = SpecialistRouter::new();
        router.add_route("EYE", "Ophthalmologist");

        let mut dir = MemoryDirectory::new();
        let doctor = dir.add_doctor("Dr. Rao", "Ophthalmologist").unwrap();

        assert_eq!(router.specialization_for("eye"), Some("Ophthalmologist"));
        assert_eq!(router.assign("Eye ", &dir).unwrap(), Some(doctor));
    }
}
