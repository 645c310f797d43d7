//! Gap-filling rules for spreadsheet rows of new patients.
//!
//! The backend reports which model columns a row is missing. Values typed
//! in by hand are checked against the column's rule before they are
//! written into the row.

use std::collections::BTreeMap;

use rehab_core::models::upload::NewPatient;
use rehab_core::FieldValue;

use crate::calculator::{DURATION_OPTIONS, FREQUENCY_OPTIONS};
use crate::scoring::ScoreRange;

pub const PATIENT_CODE_COLUMN: &str = "Код_карты_пациента";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    Integer,
    Float { decimal_places: u8 },
    Categorical(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRule {
    pub column: &'static str,
    pub kind: ColumnKind,
    pub range: ScoreRange,
}

pub static COLUMN_RULES: [ColumnRule; 9] = [
    ColumnRule {
        column: "ВОЗРАСТ_НЕ_ПОМЕХА_количество_баллов_(СКРИНИНГ_«ВОЗРАСТ_НЕ_ПОМЕХА»)",
        kind: ColumnKind::Integer,
        range: ScoreRange::between(0.0, 7.0),
    },
    ColumnRule {
        column: "Физическая_активность_-_кратность_(Факторы_риска_хронических_неинфекционных_заболеваний)",
        kind: ColumnKind::Categorical(&FREQUENCY_OPTIONS),
        range: ScoreRange::UNBOUNDED,
    },
    ColumnRule {
        column: "Физическая_активность_-_продолжительность_(Факторы_риска_хронических_неинфекционных_заболеваний)",
        kind: ColumnKind::Categorical(&DURATION_OPTIONS),
        range: ScoreRange::UNBOUNDED,
    },
    ColumnRule {
        column: "ИМТ_(кг/м^2)_(Осмотр)",
        kind: ColumnKind::Float { decimal_places: 2 },
        range: ScoreRange::UNBOUNDED,
    },
    ColumnRule {
        column: "индекс_Бартел_количество_баллов_(Шкала_базовой_активности_в_повседневной_жизни_(индекс_Бартел)_-ADL)",
        kind: ColumnKind::Integer,
        range: ScoreRange::between(0.0, 100.0),
    },
    ColumnRule {
        column: "SPPB_количество_баллов_(Краткая_батарея_тестов_физического_функционирования_(SPPB))",
        kind: ColumnKind::Integer,
        range: ScoreRange::between(0.0, 12.0),
    },
    ColumnRule {
        column: "Тест_«встань_и_иди»_(сек)_(≤10_–_норма;_≥14_-_риск_падений):_(Тест_«встань_и_иди»)",
        kind: ColumnKind::Float { decimal_places: 2 },
        range: ScoreRange::UNBOUNDED,
    },
    ColumnRule {
        column: "Ходьба_на_4_м_(Время__секунды)_(Краткая_батарея_тестов_физического_функционирования_(SPPB))",
        kind: ColumnKind::Integer,
        range: ScoreRange::between(0.0, 4.0),
    },
    ColumnRule {
        column: "Уровень_(Стратификация_по_уровню_физической_активности)",
        kind: ColumnKind::Integer,
        range: ScoreRange::between(1.0, 5.0),
    },
];

pub fn rule_for(column: &str) -> Option<&'static ColumnRule> {
    COLUMN_RULES.iter().find(|r| r.column == column)
}

impl ColumnRule {
    pub fn accepts(&self, value: &str) -> bool {
        let number = match self.kind {
            ColumnKind::Categorical(options) => return options.contains(&value),
            ColumnKind::Integer => match FieldValue::text(value).parse_float() {
                Some(n) if n.fract() == 0.0 => n,
                _ => return false,
            },
            ColumnKind::Float { decimal_places } => {
                let Some(n) = FieldValue::text(value).parse_float() else {
                    return false;
                };
                let decimals = value.split('.').nth(1).map_or(0, |d| d.chars().count());
                if decimals > usize::from(decimal_places) {
                    return false;
                }
                n
            }
        };
        self.range.contains(number)
    }
}

/// Columns without a rule accept anything.
pub fn validate_column_value(column: &str, value: &str) -> bool {
    rule_for(column).is_none_or(|rule| rule.accepts(value))
}

/// Result of applying hand-typed values to a row.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualFill {
    pub patient: NewPatient,
    /// Columns whose typed value failed validation.
    pub rejected: Vec<String>,
}

/// Write accepted values for the row's missing columns.
///
/// Columns left empty or rejected stay in `missing_columns`.
pub fn apply_manual_inputs(patient: &NewPatient, inputs: &BTreeMap<String, String>) -> ManualFill {
    let mut next = patient.clone();
    let mut still_missing = Vec::new();
    let mut rejected = Vec::new();

    for column in &patient.missing_columns {
        match inputs.get(column).map(|v| v.trim()).filter(|v| !v.is_empty()) {
            Some(value) if validate_column_value(column, value) => {
                next.data
                    .insert(column.clone(), serde_json::Value::String(value.to_string()));
            }
            Some(_) => {
                rejected.push(column.clone());
                still_missing.push(column.clone());
            }
            None => still_missing.push(column.clone()),
        }
    }

    next.missing_columns = still_missing;
    ManualFill {
        patient: next,
        rejected,
    }
}

/// Whether any row still has gaps.
pub fn has_missing(patients: &[NewPatient]) -> bool {
    patients.iter().any(|p| !p.is_complete())
}
