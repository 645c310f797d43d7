//! Input gate for the physical-activity prediction model.
//!
//! The eight parameters are checked in form order and the first failure
//! aborts with a message naming the field. Accepted input is encoded to the
//! numeric vector the model endpoint expects.

use rehab_core::models::patient::CalculatorSeed;
use rehab_core::models::prediction::ModelPredictionRequest;
use rehab_core::FieldValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::scoring::ScoreRange;

pub const FREQUENCY_OPTIONS: [&str; 5] = [
    "<1 раза в месяц",
    "<1 раза в неделю",
    "1 раз в неделю",
    "2-3 раза в неделю",
    "Ежедневно",
];

pub const DURATION_OPTIONS: [&str; 4] = ["<30 мин", "30-60 мин", "1-4 часа", ">4 часов"];

pub const WALK_OPTIONS: [&str; 5] = [
    "Не может выполнить",
    "≥8,71 с",
    "6,21–8,70 с",
    "4,82–6,20 с",
    "≤4,81 с",
];

const AGE_SCORE_RANGE: ScoreRange = ScoreRange::between(0.0, 7.0);
const BMI_RANGE: ScoreRange = ScoreRange::between(10.0, 50.0);
const BARTHEL_RANGE: ScoreRange = ScoreRange::between(0.0, 100.0).with_step(5.0);
const SPPB_RANGE: ScoreRange = ScoreRange::between(0.0, 12.0).with_step(1.0);
const GET_UP_AND_GO_RANGE: ScoreRange = ScoreRange::at_least(0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CalculatorParam {
    AgeFrailtyScore,
    ActivityFrequency,
    ActivityDuration,
    Bmi,
    BarthelIndex,
    Sppb,
    GetUpAndGo,
    FourMetreWalk,
}

impl CalculatorParam {
    pub const ALL: [CalculatorParam; 8] = [
        CalculatorParam::AgeFrailtyScore,
        CalculatorParam::ActivityFrequency,
        CalculatorParam::ActivityDuration,
        CalculatorParam::Bmi,
        CalculatorParam::BarthelIndex,
        CalculatorParam::Sppb,
        CalculatorParam::GetUpAndGo,
        CalculatorParam::FourMetreWalk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CalculatorParam::AgeFrailtyScore => "Бал 'Возраст не помеха'",
            CalculatorParam::ActivityFrequency => "Физическая активность - кратность",
            CalculatorParam::ActivityDuration => "Физическая активность - продолжительность",
            CalculatorParam::Bmi => "ИМТ",
            CalculatorParam::BarthelIndex => "Индекс Бартел",
            CalculatorParam::Sppb => "SPPB",
            CalculatorParam::GetUpAndGo => "Тест 'Встань и иди'",
            CalculatorParam::FourMetreWalk => "Ходьба на 4 м",
        }
    }

    /// Column name of the parameter in the clinical database.
    pub fn column(&self) -> &'static str {
        match self {
            CalculatorParam::AgeFrailtyScore => "col_14",
            CalculatorParam::ActivityFrequency => "col_58",
            CalculatorParam::ActivityDuration => "col_59",
            CalculatorParam::Bmi => "col_85",
            CalculatorParam::BarthelIndex => "col_232",
            CalculatorParam::Sppb => "col_249",
            CalculatorParam::GetUpAndGo => "col_252",
            CalculatorParam::FourMetreWalk => "col_245",
        }
    }

    fn rule(&self) -> Rule {
        match self {
            CalculatorParam::AgeFrailtyScore => Rule::Numeric(AGE_SCORE_RANGE),
            CalculatorParam::ActivityFrequency => Rule::OneOf(&FREQUENCY_OPTIONS),
            CalculatorParam::ActivityDuration => Rule::OneOf(&DURATION_OPTIONS),
            CalculatorParam::Bmi => Rule::Numeric(BMI_RANGE),
            CalculatorParam::BarthelIndex => Rule::Numeric(BARTHEL_RANGE),
            CalculatorParam::Sppb => Rule::Numeric(SPPB_RANGE),
            CalculatorParam::GetUpAndGo => Rule::Numeric(GET_UP_AND_GO_RANGE),
            CalculatorParam::FourMetreWalk => Rule::OneOf(&WALK_OPTIONS),
        }
    }

    fn range_message(&self) -> &'static str {
        match self {
            CalculatorParam::AgeFrailtyScore => "Бал 'Возраст не помеха' должен быть от 0 до 7",
            CalculatorParam::Bmi => "ИМТ должен быть от 10 до 50",
            CalculatorParam::BarthelIndex => "Индекс Бартел должен быть от 0 до 100 и кратен 5",
            CalculatorParam::Sppb => "SPPB должен быть целым числом от 0 до 12",
            CalculatorParam::GetUpAndGo => "Время теста 'Встань и иди' не может быть отрицательным",
            _ => "Недопустимое значение",
        }
    }
}

enum Rule {
    Numeric(ScoreRange),
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    #[error("Пожалуйста, заполните поле {}", .0.label())]
    Missing(CalculatorParam),

    #[error("{}", .param.range_message())]
    OutOfRange { param: CalculatorParam, value: String },

    #[error("Недопустимое значение поля {}: {value}", .param.label())]
    UnknownOption { param: CalculatorParam, value: String },
}

impl CalculatorError {
    pub fn param(&self) -> CalculatorParam {
        match self {
            CalculatorError::Missing(param) => *param,
            CalculatorError::OutOfRange { param, .. } => *param,
            CalculatorError::UnknownOption { param, .. } => *param,
        }
    }
}

/// Raw calculator form values, as typed or selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculatorInput {
    pub age_frailty_score: String,
    pub activity_frequency: String,
    pub activity_duration: String,
    pub bmi: String,
    pub barthel_index: String,
    pub sppb: String,
    pub get_up_and_go: String,
    pub four_metre_walk: String,
}

fn seed_text(value: &Option<serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Walk category text for a stored integer code, `""` when unknown.
pub fn walk_option_for_code(value: &Option<serde_json::Value>) -> String {
    let code = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().map(|f| f.trunc() as i64),
        Some(serde_json::Value::String(s)) => FieldValue::text(s.as_str()).parse_int(),
        _ => None,
    };
    code.and_then(|c| usize::try_from(c).ok())
        .and_then(|i| WALK_OPTIONS.get(i))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

impl CalculatorInput {
    /// Prefill from a stored patient. Zero is kept as `"0"`.
    pub fn from_seed(seed: &CalculatorSeed) -> Self {
        Self {
            age_frailty_score: seed_text(&seed.col_14),
            activity_frequency: seed_text(&seed.col_58),
            activity_duration: seed_text(&seed.col_59),
            bmi: seed_text(&seed.col_85),
            barthel_index: seed_text(&seed.col_232),
            sppb: seed_text(&seed.col_249),
            get_up_and_go: seed_text(&seed.col_252),
            four_metre_walk: walk_option_for_code(&seed.col_245),
        }
    }

    pub fn get(&self, param: CalculatorParam) -> &str {
        match param {
            CalculatorParam::AgeFrailtyScore => &self.age_frailty_score,
            CalculatorParam::ActivityFrequency => &self.activity_frequency,
            CalculatorParam::ActivityDuration => &self.activity_duration,
            CalculatorParam::Bmi => &self.bmi,
            CalculatorParam::BarthelIndex => &self.barthel_index,
            CalculatorParam::Sppb => &self.sppb,
            CalculatorParam::GetUpAndGo => &self.get_up_and_go,
            CalculatorParam::FourMetreWalk => &self.four_metre_walk,
        }
    }

    pub fn set(&mut self, param: CalculatorParam, value: impl Into<String>) {
        let slot = match param {
            CalculatorParam::AgeFrailtyScore => &mut self.age_frailty_score,
            CalculatorParam::ActivityFrequency => &mut self.activity_frequency,
            CalculatorParam::ActivityDuration => &mut self.activity_duration,
            CalculatorParam::Bmi => &mut self.bmi,
            CalculatorParam::BarthelIndex => &mut self.barthel_index,
            CalculatorParam::Sppb => &mut self.sppb,
            CalculatorParam::GetUpAndGo => &mut self.get_up_and_go,
            CalculatorParam::FourMetreWalk => &mut self.four_metre_walk,
        };
        *slot = value.into();
    }

    /// Validate all eight parameters and encode them for the model.
    ///
    /// Empty fields are reported before any range or option check.
    pub fn validate(&self) -> Result<ModelPredictionRequest, CalculatorError> {
        if let Some(param) = CalculatorParam::ALL
            .into_iter()
            .find(|p| self.get(*p).trim().is_empty())
        {
            return Err(CalculatorError::Missing(param));
        }

        let mut values = [0.0; 8];
        for (slot, param) in values.iter_mut().zip(CalculatorParam::ALL) {
            *slot = encode(param, self.get(param))?;
        }
        Ok(ModelPredictionRequest { values })
    }
}

fn encode(param: CalculatorParam, raw: &str) -> Result<f64, CalculatorError> {
    let raw = raw.trim();
    match param.rule() {
        Rule::Numeric(range) => FieldValue::text(raw)
            .parse_float()
            .filter(|v| range.contains(*v))
            .ok_or_else(|| CalculatorError::OutOfRange {
                param,
                value: raw.to_string(),
            }),
        Rule::OneOf(options) => options
            .iter()
            .position(|option| *option == raw)
            .map(|i| i as f64)
            .ok_or_else(|| CalculatorError::UnknownOption {
                param,
                value: raw.to_string(),
            }),
    }
}
