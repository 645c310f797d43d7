use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Marker that precedes the closing parenthesis of a level label,
/// e.g. `Средний(3 ур.)`.
const LEVEL_SUFFIX: &str = "ур.)";

const UNASSESSED: [&str; 3] = ["None", "Не оценено", "Не определён"];

/// Display labels for physical-activity classes 1 through 5.
pub const LEVEL_LABELS: [&str; 5] = [
    "Низкий(1 ур.)",
    "Ниже среднего(2 ур.)",
    "Средний(3 ур.)",
    "Выше среднего(4 ур.)",
    "Высокий(5 ур.)",
];

/// Label for a predicted class; classes outside 1..=5 fall back to `Класс N`.
pub fn level_label(class: i64) -> String {
    usize::try_from(class)
        .ok()
        .and_then(|c| c.checked_sub(1))
        .and_then(|i| LEVEL_LABELS.get(i))
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Класс {class}"))
}

/// Extract the level digit from a label such as `Средний(3 ур.)` or
/// `Класс 3`.
pub fn level_from_label(label: &str) -> Option<u8> {
    level_in_parens(label).or_else(|| {
        let rest = label.split_once("Класс")?.1.trim_start();
        rest.chars().next()?.to_digit(10).map(|d| d as u8)
    })
}

fn level_in_parens(label: &str) -> Option<u8> {
    label.match_indices('(').find_map(|(i, _)| {
        let rest = &label[i + 1..];
        let digit = rest.chars().next()?.to_digit(10)?;
        let tail = rest[1..].trim_start();
        tail.starts_with(LEVEL_SUFFIX).then_some(digit as u8)
    })
}

/// One row of `GET /patients`.
///
/// `patient_info` is a comma-joined string: gender first, then an optional
/// activity-level label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientSummary {
    pub code: i64,
    pub patient_info: String,
}

impl PatientSummary {
    fn info_part(&self, index: usize) -> Option<&str> {
        self.patient_info
            .split(',')
            .map(str::trim)
            .nth(index)
            .filter(|s| !s.is_empty())
    }

    pub fn gender(&self) -> Option<&str> {
        self.info_part(0)
    }

    /// The activity label, unless the patient has not been assessed.
    pub fn activity_label(&self) -> Option<&str> {
        self.info_part(1).filter(|s| !UNASSESSED.contains(s))
    }

    /// Activity level 1..=5 parsed from the label.
    pub fn activity_level(&self) -> Option<u8> {
        self.activity_label()
            .and_then(level_in_parens)
            .filter(|level| (1..=5).contains(level))
    }
}

/// One row of `GET /level-fa/patients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LevelFaPatient {
    pub code: i64,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Calculator seed values from `GET /level-fa/patients/{code}`.
///
/// Columns arrive as stored: numbers for measurements, text for the
/// categorical answers, an integer 0..=4 for the four-metre walk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculatorSeed {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub col_14: Option<serde_json::Value>,
    #[serde(default)]
    pub col_58: Option<serde_json::Value>,
    #[serde(default)]
    pub col_59: Option<serde_json::Value>,
    #[serde(default)]
    pub col_85: Option<serde_json::Value>,
    #[serde(default)]
    pub col_232: Option<serde_json::Value>,
    #[serde(default)]
    pub col_249: Option<serde_json::Value>,
    #[serde(default)]
    pub col_252: Option<serde_json::Value>,
    #[serde(default)]
    pub col_245: Option<serde_json::Value>,
    #[serde(default)]
    pub activity_level: Option<serde_json::Value>,
}
