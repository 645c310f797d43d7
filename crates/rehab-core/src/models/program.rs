use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Patient header of the rehabilitation program report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProgramPatientInfo {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<serde_json::Value>,
    #[serde(default)]
    pub screening_number: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

/// Response of `GET /patient-program/{code}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientProgram {
    pub patient_info: ProgramPatientInfo,
    /// Category key to ordered recommendation lines.
    pub rehabilitation_program: BTreeMap<String, Vec<String>>,
}

/// Program categories in display order, with their headings.
pub const PROGRAM_CATEGORIES: [(&str, &str); 12] = [
    ("vaccination", "Вакцинация"),
    ("swallowing_issues", "Нарушения глотания"),
    ("assistive_devices", "Вспомогательные средства"),
    ("mobility", "Мобильность"),
    ("mental_health", "Психическое здоровье"),
    ("sleep", "Сон"),
    ("osteoporosis", "Остеопороз"),
    ("physical_activity", "Физическая активность"),
    ("social_support", "Социальная поддержка"),
    ("lifestyle_modification", "Модификация образа жизни"),
    ("nutrition", "Питание"),
    ("additional_recommendations", "Дополнительные рекомендации"),
];

impl PatientProgram {
    /// Categories with at least one recommendation, in display order.
    pub fn ordered_categories(&self) -> Vec<(&'static str, &[String])> {
        PROGRAM_CATEGORIES
            .iter()
            .filter_map(|(key, title)| {
                self.rehabilitation_program
                    .get(*key)
                    .filter(|items| !items.is_empty())
                    .map(|items| (*title, items.as_slice()))
            })
            .collect()
    }
}
