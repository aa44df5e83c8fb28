//! Doctor models.

use serde::{Deserialize, Serialize};

/// A registered doctor. Never mutated once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Doctor {
    /// Sequential ID, starting at 1
    pub id: i64,
    /// Display name (e.g., "Dr. Mehta")
    pub name: String,
    /// Practice area (e.g., "Cardiologist")
    pub specialization: String,
}

impl Doctor {
    pub fn new(id: i64, name: impl Into<String>, specialization: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            specialization: specialization.into(),
        }
    }
}

/// Doctors every console session starts with.
pub const DEFAULT_DOCTORS: [(&str, &str); 5] = [
    ("Dr. Mehta", "General Physician"),
    ("Dr. Sharma", "Cardiologist"),
    ("Dr. Patel", "Dermatologist"),
    ("Dr. Gupta", "Orthopedic"),
    ("Dr. Nair", "ENT Specialist"),
];
