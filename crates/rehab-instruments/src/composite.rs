//! Geriatric health index (`giz`).
//!
//! Seven inputs each contribute 0, 0.5 or 1 point. Points are tallied in
//! half-point units so the sum stays exact.

use rehab_core::{fields, FieldValue, PatientRecord};
use serde::Serialize;

/// Fields whose change invalidates the index.
pub const INDEX_INPUTS: [&str; 7] = [
    fields::BARTHEL_TOTAL,
    fields::LAWTON_TOTAL,
    fields::MMSE_TOTAL,
    fields::CHARLSON_INDEX,
    fields::MNA_TOTAL,
    fields::MEDICATIONS,
    fields::LIVING_SITUATION,
];

const LIVES_ALONE_MARKERS: [&str; 2] = ["один", "alone"];

/// Parsed index inputs. `None` marks a value that was entered but did not
/// parse; it earns no points. An empty field reads as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexInputs {
    pub barthel: Option<i64>,
    pub lawton: Option<i64>,
    pub mmse: Option<i64>,
    pub charlson: Option<i64>,
    pub mna: Option<f64>,
    pub medication_count: usize,
    pub lives_alone: bool,
}

fn int_or_zero(record: &PatientRecord, field: &str) -> Option<i64> {
    if record.is_set(field) {
        record.parse_int(field)
    } else {
        Some(0)
    }
}

fn float_or_zero(record: &PatientRecord, field: &str) -> Option<f64> {
    if record.is_set(field) {
        record.parse_float(field)
    } else {
        Some(0.0)
    }
}

/// Count of non-empty entries in the comma-separated medication field.
pub fn medication_count(value: Option<&FieldValue>) -> usize {
    match value {
        Some(FieldValue::Text(s)) => s.split(',').filter(|entry| !entry.is_empty()).count(),
        Some(FieldValue::List(items)) => items.iter().filter(|entry| !entry.is_empty()).count(),
        Some(FieldValue::Number(_)) => 1,
        Some(FieldValue::Null) | None => 0,
    }
}

pub fn lives_alone(living_situation: &str) -> bool {
    let lowered = living_situation.to_lowercase();
    LIVES_ALONE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

impl IndexInputs {
    pub fn from_record(record: &PatientRecord) -> Self {
        Self {
            barthel: int_or_zero(record, fields::BARTHEL_TOTAL),
            lawton: int_or_zero(record, fields::LAWTON_TOTAL),
            mmse: int_or_zero(record, fields::MMSE_TOTAL),
            charlson: int_or_zero(record, fields::CHARLSON_INDEX),
            mna: float_or_zero(record, fields::MNA_TOTAL),
            medication_count: medication_count(record.get(fields::MEDICATIONS)),
            lives_alone: lives_alone(record.text(fields::LIVING_SITUATION)),
        }
    }

    fn half_points(&self) -> u32 {
        let barthel = match self.barthel {
            Some(91..=100) => 2,
            _ => 0,
        };
        let lawton = match self.lawton {
            Some(6..=8) => 2,
            _ => 0,
        };
        let mmse = match self.mmse {
            Some(28..=30) => 2,
            Some(24..=27) => 1,
            _ => 0,
        };
        let charlson = match self.charlson {
            Some(0) => 2,
            Some(1..=2) => 1,
            _ => 0,
        };
        let mna = match self.mna {
            Some(v) if v >= 24.0 => 2,
            Some(v) if (17.0..=23.5).contains(&v) => 1,
            _ => 0,
        };
        let medications = match self.medication_count {
            0..=3 => 2,
            4..=6 => 1,
            _ => 0,
        };
        let living = if self.lives_alone { 0 } else { 2 };
        barthel + lawton + mmse + charlson + mna + medications + living
    }

    pub fn score(&self) -> f64 {
        f64::from(self.half_points()) / 2.0
    }
}

/// Index value formatted to one decimal place, e.g. `"6.0"`.
pub fn geriatric_index(record: &PatientRecord) -> String {
    format!("{:.1}", IndexInputs::from_record(record).score())
}
