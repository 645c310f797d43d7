//! Physical-activity level classification.
//!
//! Each exercise group maps the selected progress option of its fields to
//! an ordinal level and aggregates them. Two workflows classify the same
//! exercises with slightly different vocabularies and rules, so each is a
//! named [`ActivityProfile`] fed to the one [`classify`] function.

use std::collections::BTreeSet;

use rehab_core::{fields, FieldValue, PatientRecord};
use serde::Serialize;

use crate::scoring::rounded_mean;

/// How the per-field levels of a group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// Rounded half-up mean.
    Mean,
    Max,
}

/// What a set field contributes when its option is not on the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmatched {
    Skip,
    Score(u8),
}

/// Group level when none of its fields contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenEmpty {
    Null,
    Zero,
}

#[derive(Debug, Clone, Copy)]
pub struct ActivityGroup {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    /// `ladder[i]` lists the options worth level `i + 1`.
    pub ladder: &'static [&'static [&'static str]],
    pub aggregation: Aggregation,
    pub unmatched: Unmatched,
    pub when_empty: WhenEmpty,
    pub level_field: &'static str,
}

impl ActivityGroup {
    pub fn level_of(&self, option: &str) -> Option<u8> {
        self.ladder
            .iter()
            .position(|rung| rung.contains(&option))
            .map(|i| (i + 1) as u8)
    }

    /// Level of the group, `None` when empty under [`WhenEmpty::Null`].
    pub fn classify(&self, record: &PatientRecord) -> Option<u8> {
        let levels: Vec<u8> = self
            .fields
            .iter()
            .filter_map(|field| record.get(field).filter(|v| v.is_set()))
            .filter_map(|value| {
                let matched = match value {
                    FieldValue::Text(option) => self.level_of(option),
                    _ => None,
                };
                match (matched, self.unmatched) {
                    (Some(level), _) => Some(level),
                    (None, Unmatched::Score(score)) => Some(score),
                    (None, Unmatched::Skip) => None,
                }
            })
            .collect();

        if levels.is_empty() {
            return match self.when_empty {
                WhenEmpty::Null => None,
                WhenEmpty::Zero => Some(0),
            };
        }

        Some(match self.aggregation {
            Aggregation::Mean => {
                let sum: u32 = levels.iter().map(|&l| u32::from(l)).sum();
                rounded_mean(sum, levels.len() as u32)
            }
            Aggregation::Max => levels.iter().copied().max().unwrap_or(0),
        })
    }
}

/// A workflow's classifier configuration.
#[derive(Debug, Clone, Copy)]
pub struct ActivityProfile {
    pub name: &'static str,
    pub anaerobic: ActivityGroup,
    pub cardio: ActivityGroup,
    pub balance: ActivityGroup,
    pub stretching: ActivityGroup,
    /// Whether the workflow also derives `overall_level`.
    pub computes_overall: bool,
}

impl ActivityProfile {
    pub fn groups(&self) -> [&ActivityGroup; 4] {
        [&self.anaerobic, &self.cardio, &self.balance, &self.stretching]
    }

    pub fn depends_on(&self, field: &str) -> bool {
        self.groups().iter().any(|g| g.fields.contains(&field))
    }

    pub fn depends_on_any(&self, changed: &BTreeSet<String>) -> bool {
        changed.iter().any(|field| self.depends_on(field))
    }
}

/// Derived levels for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityLevels {
    pub anaerobic: Option<u8>,
    pub cardio: Option<u8>,
    pub balance: Option<u8>,
    pub stretching: Option<u8>,
    /// Only present when the profile computes it.
    pub overall: Option<u8>,
}

/// Rounded mean of the non-zero sub-levels; zero when there are none.
pub fn overall_level(sub_levels: &[Option<u8>]) -> u8 {
    let present: Vec<u32> = sub_levels
        .iter()
        .filter_map(|l| *l)
        .filter(|&l| l > 0)
        .map(u32::from)
        .collect();
    if present.is_empty() {
        0
    } else {
        rounded_mean(present.iter().sum(), present.len() as u32)
    }
}

pub fn classify(profile: &ActivityProfile, record: &PatientRecord) -> ActivityLevels {
    let anaerobic = profile.anaerobic.classify(record);
    let cardio = profile.cardio.classify(record);
    let balance = profile.balance.classify(record);
    let stretching = profile.stretching.classify(record);
    let overall = profile
        .computes_overall
        .then(|| overall_level(&[anaerobic, cardio, balance, stretching]));

    ActivityLevels {
        anaerobic,
        cardio,
        balance,
        stretching,
        overall,
    }
}

impl ActivityLevels {
    /// Write the derived levels back into a copy of `record`.
    pub fn write_into(&self, profile: &ActivityProfile, record: &PatientRecord) -> PatientRecord {
        let as_value = |level: Option<u8>| match level {
            Some(l) => FieldValue::Number(f64::from(l)),
            None => FieldValue::Null,
        };
        let mut next = record
            .with(profile.anaerobic.level_field, as_value(self.anaerobic))
            .with(profile.cardio.level_field, as_value(self.cardio))
            .with(profile.balance.level_field, as_value(self.balance))
            .with(profile.stretching.level_field, as_value(self.stretching));
        if let Some(overall) = self.overall {
            next = next.with(fields::OVERALL_LEVEL, FieldValue::Number(f64::from(overall)));
        }
        next
    }
}

const ANAEROBIC_LADDER: &[&[&str]] = &[&["1x10"], &["2x10"], &["2x12"], &["3x10"], &["3x12"]];

const CARDIO_LADDER: &[&[&str]] = &[
    &["2 подхода по 2–5 минут"],
    &["3 подхода по 8 минут"],
    &["3 подхода по 10 минут"],
    &["3 подхода по 15 минут"],
    &["2 подхода по 20 минут"],
];

pub const FIGURE_EIGHT_OPTION: &str = "3 подхода по 2 круга";

/// Intake card: step and count variants share a rung, figure-eight
/// walking counts as the top rung.
const CARD_BALANCE_LADDER: &[&[&str]] = &[
    &["3 подхода по 10 шагов", "3 подхода по 10 счетов"],
    &["3 подхода по 15 шагов", "3 подхода по 15 счетов"],
    &["3 подхода по 20 шагов", "3 подхода по 20 счетов"],
    &["3 подхода по 25 шагов", "3 подхода по 25 счетов"],
    &[
        "3 подхода по 30 шагов",
        "3 подхода по 30 счетов",
        FIGURE_EIGHT_OPTION,
    ],
];

/// Quick assessment offers step counts only.
const QUICK_BALANCE_LADDER: &[&[&str]] = &[
    &["3 подхода по 10 шагов"],
    &["3 подхода по 15 шагов"],
    &["3 подхода по 20 шагов"],
    &["3 подхода по 25 шагов"],
    &["3 подхода по 30 шагов", FIGURE_EIGHT_OPTION],
];

const STRETCHING_LADDER: &[&[&str]] = &[&["3x2"], &["3x3"]];

/// Classifier used by the full intake card.
pub static INTAKE_CARD: ActivityProfile = ActivityProfile {
    name: "intake_card",
    anaerobic: ActivityGroup {
        name: "anaerobic",
        fields: &fields::ANAEROBIC_EXERCISES,
        ladder: ANAEROBIC_LADDER,
        aggregation: Aggregation::Mean,
        unmatched: Unmatched::Score(0),
        when_empty: WhenEmpty::Null,
        level_field: fields::ANAEROBIC_LEVEL,
    },
    cardio: ActivityGroup {
        name: "cardio",
        fields: &[fields::CARDIO_WALKING],
        ladder: CARDIO_LADDER,
        aggregation: Aggregation::Max,
        unmatched: Unmatched::Score(0),
        when_empty: WhenEmpty::Zero,
        level_field: fields::CARDIO_LEVEL,
    },
    balance: ActivityGroup {
        name: "balance",
        fields: &fields::BALANCE_EXERCISES,
        ladder: CARD_BALANCE_LADDER,
        aggregation: Aggregation::Max,
        unmatched: Unmatched::Score(0),
        when_empty: WhenEmpty::Zero,
        level_field: fields::BALANCE_LEVEL,
    },
    stretching: ActivityGroup {
        name: "stretching",
        fields: &fields::STRETCHING_EXERCISES,
        ladder: STRETCHING_LADDER,
        aggregation: Aggregation::Max,
        unmatched: Unmatched::Score(1),
        when_empty: WhenEmpty::Zero,
        level_field: fields::STRETCHING_LEVEL,
    },
    computes_overall: false,
};

/// Classifier used by the quick physical-activity assessment.
pub static QUICK_ASSESSMENT: ActivityProfile = ActivityProfile {
    name: "quick_assessment",
    anaerobic: ActivityGroup {
        name: "anaerobic",
        fields: &fields::ANAEROBIC_EXERCISES,
        ladder: ANAEROBIC_LADDER,
        aggregation: Aggregation::Mean,
        unmatched: Unmatched::Skip,
        when_empty: WhenEmpty::Zero,
        level_field: fields::ANAEROBIC_LEVEL,
    },
    cardio: ActivityGroup {
        name: "cardio",
        fields: &[fields::CARDIO_WALKING],
        ladder: CARDIO_LADDER,
        aggregation: Aggregation::Mean,
        unmatched: Unmatched::Skip,
        when_empty: WhenEmpty::Zero,
        level_field: fields::CARDIO_LEVEL,
    },
    balance: ActivityGroup {
        name: "balance",
        fields: &fields::BALANCE_EXERCISES,
        ladder: QUICK_BALANCE_LADDER,
        aggregation: Aggregation::Mean,
        unmatched: Unmatched::Skip,
        when_empty: WhenEmpty::Zero,
        level_field: fields::BALANCE_LEVEL,
    },
    stretching: ActivityGroup {
        name: "stretching",
        fields: &fields::STRETCHING_EXERCISES,
        ladder: STRETCHING_LADDER,
        aggregation: Aggregation::Mean,
        unmatched: Unmatched::Skip,
        when_empty: WhenEmpty::Zero,
        level_field: fields::STRETCHING_LEVEL,
    },
    computes_overall: true,
};

pub fn profile_by_name(name: &str) -> Option<&'static ActivityProfile> {
    [&INTAKE_CARD, &QUICK_ASSESSMENT]
        .into_iter()
        .find(|p| p.name == name)
}
