//! Plain-text rendering of backend reports and local records.

use std::fmt::Write;

use rehab_client::dashboard::LevelHistogram;
use rehab_core::models::card::PatientCard;
use rehab_core::models::patient::{PatientSummary, LEVEL_LABELS};
use rehab_core::models::program::PatientProgram;
use rehab_core::models::upload::NewPatient;
use rehab_core::{fields, DiseaseList, FieldValue, PatientRecord};
use rehab_instruments::activity::ActivityProfile;
use rehab_instruments::intake::missing_required;
use rehab_instruments::norms::{norm_for, out_of_range_fields};

pub fn field_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => "—".to_string(),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::List(items) => items.join(", "),
    }
}

fn json_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "—".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn patients(list: &[PatientSummary]) -> String {
    if list.is_empty() {
        return "Наблюдаемые пациенты отсутствуют.\n".to_string();
    }
    let mut out = String::new();
    for patient in list {
        let _ = writeln!(
            out,
            "{:>8}  {:<8}  {}",
            patient.code,
            patient.gender().unwrap_or("—"),
            patient.activity_label().unwrap_or("Не оценено"),
        );
    }
    out
}

pub fn histogram(histogram: &LevelHistogram) -> String {
    let mut out = String::new();
    for (label, count) in LEVEL_LABELS.iter().zip(histogram.counts()) {
        let _ = writeln!(out, "{label:<22} {count:>4}  {}", "#".repeat(count as usize));
    }
    let _ = writeln!(out, "{:<22} {:>4}", "Не оценено", histogram.unassessed());
    out
}

pub fn card(card: &PatientCard) -> String {
    let mut out = String::new();
    for (title, section) in card.ordered_sections() {
        let _ = writeln!(out, "== {title} ==");
        for (key, value) in section {
            let _ = writeln!(out, "  {key}: {}", json_value(value));
        }
    }
    if !card.scale_interpretations.is_empty() {
        let _ = writeln!(out, "== Интерпретация шкал ==");
        for (scale, result) in &card.scale_interpretations {
            let _ = writeln!(
                out,
                "  {scale}: {} ({})",
                json_value(&result.score),
                result.interpretation.as_deref().unwrap_or("—"),
            );
        }
    }
    out
}

pub fn program(program: &PatientProgram) -> String {
    let mut out = String::new();
    let info = &program.patient_info;
    if let Some(code) = &info.code {
        let _ = writeln!(out, "Пациент: {}", json_value(code));
    }
    if let Some(gender) = &info.gender {
        let _ = writeln!(out, "Пол: {gender}");
    }
    for (title, items) in program.ordered_categories() {
        let _ = writeln!(out, "== {title} ==");
        for (i, item) in items.iter().enumerate() {
            let _ = writeln!(out, "  {}. {item}", i + 1);
        }
    }
    out
}

/// Derived fields, abnormal values and submit readiness of a record.
pub fn record_report(record: &PatientRecord, profile: &ActivityProfile) -> String {
    let mut out = String::new();
    let derived = [fields::BMI, fields::GERIATRIC_INDEX]
        .into_iter()
        .chain(rehab_instruments::all_scales().iter().map(|s| s.total_field))
        .chain(profile.groups().map(|g| g.level_field))
        .chain(profile.computes_overall.then_some(fields::OVERALL_LEVEL));
    for field in derived {
        if let Some(value) = record.get(field) {
            let _ = writeln!(out, "{field:<18} {}", field_value(value));
        }
    }

    if let Ok(diseases) = DiseaseList::read(record) {
        for (name, stage) in diseases.entries() {
            let _ = writeln!(out, "болезнь: {name} [{stage}]");
        }
    }

    let gender = record.gender();
    for field in out_of_range_fields(record) {
        let value = record.get(field).map(field_value).unwrap_or_default();
        let norm = norm_for(field)
            .map(|n| n.describe(gender))
            .unwrap_or_default();
        let _ = writeln!(out, "вне нормы: {field} = {value} (норма {norm})");
    }

    let missing = missing_required(record);
    if missing.is_empty() {
        let _ = writeln!(out, "готово к отправке");
    } else {
        let _ = writeln!(out, "не заполнены: {}", missing.join(", "));
    }
    out
}

pub fn new_patients(rows: &[NewPatient]) -> String {
    let mut out = String::new();
    for row in rows {
        if row.is_complete() {
            let _ = writeln!(out, "{}: все данные на месте", row.code);
        } else {
            let _ = writeln!(out, "{}: не хватает {}", row.code, row.missing_columns.len());
            for column in &row.missing_columns {
                let _ = writeln!(out, "    {column}");
            }
        }
    }
    out
}
