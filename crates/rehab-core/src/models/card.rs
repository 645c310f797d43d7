use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::record::PatientRecord;

/// Body of `POST /create-card`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub data: PatientRecord,
}

/// Score and verbal interpretation for one scale on the patient card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleInterpretation {
    #[serde(default)]
    pub score: serde_json::Value,
    #[serde(default)]
    pub interpretation: Option<String>,
}

/// A flat key to value section of the patient card report.
pub type CardSection = BTreeMap<String, serde_json::Value>;

/// Response of `GET /patient-card/{code}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientCard {
    #[serde(default)]
    pub scale_interpretations: BTreeMap<String, ScaleInterpretation>,
    #[serde(flatten)]
    pub sections: BTreeMap<String, CardSection>,
}

/// Report sections in display order, with their headings.
pub const CARD_SECTIONS: [(&str, &str); 29] = [
    ("general_info", "Общая информация"),
    ("age_not_obstacle", "Шкала 'Возраст не помеха'"),
    ("social_history", "Социальный анамнез"),
    ("epidemiological_history", "Эпидемиологический анамнез"),
    ("chronic_diseases", "Хронические заболевания"),
    ("chronic_pain", "Хроническая боль"),
    ("hospitalization", "Госпитализация"),
    (
        "risk_factors",
        "Факторы риска хронических неинфекционных заболеваний",
    ),
    ("assistive_devices", "Использование вспомогательных средств"),
    (
        "falls_fractures_densitometry",
        "Падения и переломы, денситометрия",
    ),
    ("examination", "Осмотр"),
    ("lab_results", "Результаты лабораторных исследований"),
    (
        "instrumental_results",
        "Результаты инструментальных исследований",
    ),
    ("drug_therapy", "Лекарственная терапия"),
    (
        "clinical_frailty_scale",
        "Клиническая шкала старческой астении",
    ),
    ("barthel_scale", "Шкала Бартел (ADL)"),
    ("lawton_scale", "Шкала Лоутон (IADL)"),
    (
        "sppb_scale",
        "Краткая батарея тестов физического функционирования (SPPB)",
    ),
    ("get_up_and_go_test", "Тест 'Встань и иди'"),
    ("two_minute_walk_test", "Двухминутный тест с ходьбой"),
    (
        "physical_activity_level",
        "Стратификация по уровню физической активности",
    ),
    ("dynamometry", "Динамометрия"),
    ("mna_scale", "Краткая шкала оценки питания (MNA)"),
    (
        "mmse_scale",
        "Краткая шкала оценки психического статуса (MMSE)",
    ),
    ("moca_scale", "Шкала MOCA"),
    ("eq5d_scale", "Оценка качества жизни (EQ-5D)"),
    ("today_status", "Состояние на сегодняшний день"),
    (
        "geriatric_health_index",
        "Оценка гериатрического индекса здоровья",
    ),
    ("medical_conditions", "Медицинские условия"),
];

impl PatientCard {
    /// Non-empty sections in display order, unknown sections last.
    pub fn ordered_sections(&self) -> Vec<(&str, &CardSection)> {
        let mut ordered: Vec<(&str, &CardSection)> = CARD_SECTIONS
            .iter()
            .filter_map(|(key, title)| {
                self.sections
                    .get(*key)
                    .filter(|s| !s.is_empty())
                    .map(|s| (*title, s))
            })
            .collect();
        ordered.extend(
            self.sections
                .iter()
                .filter(|(key, s)| {
                    !s.is_empty() && !CARD_SECTIONS.iter().any(|(k, _)| k == key)
                })
                .map(|(key, s)| (key.as_str(), s)),
        );
        ordered
    }
}
