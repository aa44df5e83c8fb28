//! Domain models for the hospital directory.

mod doctor;
mod patient;
mod prediction;

pub use doctor::*;
pub use patient::*;
pub use prediction::*;
