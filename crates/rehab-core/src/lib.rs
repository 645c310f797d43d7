//! rehab-core
//!
//! Pure domain types for the geriatric rehabilitation workflow: the
//! in-progress patient record, field identifiers, and the payloads
//! exchanged with the backend service. No HTTP dependency.

pub mod error;
pub mod fields;
pub mod models;
pub mod record;

pub use record::{add_disease, set_disease, DiseaseList, FieldValue, Gender, PatientRecord};
