//! rehab-instruments
//!
//! Clinical scale definitions and the scoring rules derived from them.
//! Pure data and pure functions: nothing here performs I/O, reads the
//! clock, or holds state between calls.

pub mod activity;
pub mod calculator;
pub mod composite;
pub mod error;
pub mod intake;
pub mod norms;
pub mod reducer;
pub mod scales;
pub mod scoring;
pub mod upload;

use error::InstrumentError;
use scales::ScaleDefinition;

/// Return all registered scales.
pub fn all_scales() -> &'static [ScaleDefinition] {
    &scales::SCALES
}

/// Look up a scale by ID.
pub fn get_scale(id: &str) -> Option<&'static ScaleDefinition> {
    all_scales().iter().find(|s| s.id.eq_ignore_ascii_case(id))
}

/// Look up a scale by ID, failing with [`InstrumentError::UnknownScale`].
pub fn require_scale(id: &str) -> Result<&'static ScaleDefinition, InstrumentError> {
    get_scale(id).ok_or_else(|| InstrumentError::UnknownScale(id.to_string()))
}
