//! Intake card rules that are not scales: BMI, select vocabularies, and the
//! submit gate.

use rehab_core::{fields, PatientRecord};

use crate::error::InstrumentError;

/// Physical-activity frequency as asked on the intake card (field `119`).
/// Narrower than the calculator's vocabulary.
pub const INTAKE_FREQUENCY_OPTIONS: [&str; 3] =
    ["<1 раза в месяц", "2–3 раза в неделю", "Ежедневно"];

/// Physical-activity duration as asked on the intake card (field `120`).
pub const INTAKE_DURATION_OPTIONS: [&str; 4] = ["<30 мин", "30–60 мин", "1–4 часа", "4 часов"];

pub const GENDER_OPTIONS: [&str; 2] = ["Мужской", "Женский"];

pub const LIVING_SITUATION_OPTIONS: [&str; 6] = [
    "Один(а)",
    "С супругом(ой)",
    "С детьми",
    "С родственниками",
    "В учреждении",
    "Другое",
];

/// Fixed option list of a select field, if it has one.
pub fn choices_for(field: &str) -> Option<&'static [&'static str]> {
    match field {
        fields::GENDER => Some(&GENDER_OPTIONS),
        fields::LIVING_SITUATION => Some(&LIVING_SITUATION_OPTIONS),
        "119" => Some(&INTAKE_FREQUENCY_OPTIONS),
        "120" => Some(&INTAKE_DURATION_OPTIONS),
        _ => None,
    }
}

/// BMI from height (cm) and weight (kg), one decimal place.
///
/// `None` unless both parse as non-zero numbers and height is positive.
pub fn derive_bmi(record: &PatientRecord) -> Option<String> {
    let height = record.parse_float(fields::HEIGHT_CM)?;
    let weight = record.parse_float(fields::WEIGHT_KG)?;
    if height <= 0.0 || weight == 0.0 {
        return None;
    }
    let metres = height / 100.0;
    Some(format!("{:.1}", weight / (metres * metres)))
}

/// Required fields that are still empty, in form order.
pub fn missing_required(record: &PatientRecord) -> Vec<&'static str> {
    fields::REQUIRED_AT_SUBMIT
        .into_iter()
        .filter(|field| !record.is_set(field))
        .collect()
}

/// Submit gate: every required field must be filled.
pub fn check_required(record: &PatientRecord) -> Result<(), InstrumentError> {
    let missing = missing_required(record);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(InstrumentError::MissingRequired(
            missing.into_iter().map(String::from).collect(),
        ))
    }
}
