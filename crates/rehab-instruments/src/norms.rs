//! Reference ranges for laboratory and examination fields.
//!
//! A value is flagged only when it parses as a number and falls strictly
//! outside the applicable range. Gender-split norms need the record's
//! gender; without it nothing is flagged.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rehab_core::{FieldValue, Gender, PatientRecord};

use crate::scoring::ScoreRange;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Norm {
    Unconditional(ScoreRange),
    ByGender { male: ScoreRange, female: ScoreRange },
}

impl Norm {
    /// The range that applies to the given gender, if one can be chosen.
    pub fn range_for(&self, gender: Option<Gender>) -> Option<ScoreRange> {
        match (self, gender) {
            (Norm::Unconditional(range), _) => Some(*range),
            (Norm::ByGender { male, .. }, Some(Gender::Male)) => Some(*male),
            (Norm::ByGender { female, .. }, Some(Gender::Female)) => Some(*female),
            (Norm::ByGender { .. }, None) => None,
        }
    }

    /// Text shown next to the input, e.g. `"130 - 170"` or `"60 - "`.
    ///
    /// Gender-split norms fall back to the female range when gender is
    /// unknown, matching the form's display.
    pub fn describe(&self, gender: Option<Gender>) -> String {
        let range = self
            .range_for(gender)
            .or_else(|| self.range_for(Some(Gender::Female)))
            .unwrap_or(ScoreRange::UNBOUNDED);
        range.to_string()
    }
}

const fn both(min: f64, max: f64) -> ScoreRange {
    ScoreRange::between(min, max)
}

const fn min(min: f64) -> ScoreRange {
    ScoreRange::at_least(min)
}

const fn max(max: f64) -> ScoreRange {
    ScoreRange::at_most(max)
}

static NORMS: LazyLock<BTreeMap<&'static str, Norm>> = LazyLock::new(|| {
    use Norm::{ByGender, Unconditional};

    BTreeMap::from([
        ("11", Unconditional(both(19.0, 25.0))),
        ("22", ByGender { male: min(23.0), female: min(22.0) }),
        ("23", Unconditional(min(31.0))),
        ("67", ByGender { male: both(130.0, 170.0), female: both(120.0, 150.0) }),
        ("68", ByGender { male: both(4.0, 5.5), female: both(3.5, 5.0) }),
        ("69", Unconditional(both(4.0, 9.0))),
        ("70", Unconditional(both(1.0, 3.0))),
        ("71", Unconditional(both(150.0, 400.0))),
        ("72", ByGender { male: both(0.0, 15.0), female: both(0.0, 20.0) }),
        ("73", Unconditional(both(65.0, 85.0))),
        ("74", Unconditional(both(35.0, 50.0))),
        ("75", ByGender { male: both(62.0, 115.0), female: both(44.0, 97.0) }),
        ("76", Unconditional(min(60.0))),
        ("77", Unconditional(both(4.0, 5.6))),
        ("78", Unconditional(both(3.3, 5.5))),
        ("79", Unconditional(both(10.0, 40.0))),
        ("80", Unconditional(both(10.0, 40.0))),
        ("81", Unconditional(both(3.0, 17.0))),
        ("82", ByGender { male: both(202.0, 416.0), female: both(143.0, 339.0) }),
        ("83", Unconditional(max(5.2))),
        ("84", Unconditional(max(3.0))),
        ("85", ByGender { male: min(1.0), female: min(1.2) }),
        ("86", Unconditional(max(1.7))),
        ("87", Unconditional(both(1.12, 1.32))),
        ("88", Unconditional(both(2.20, 2.60))),
        ("89", Unconditional(max(5.0))),
        ("90", Unconditional(both(10.0, 30.0))),
        ("91", ByGender { male: both(30.0, 400.0), female: both(15.0, 150.0) }),
        ("92", Unconditional(min(30.0))),
        ("93", Unconditional(both(0.4, 4.0))),
        ("94", Unconditional(both(200.0, 900.0))),
        ("95", Unconditional(both(3.0, 20.0))),
        ("396", Unconditional(max(3.0))),
    ])
});

pub fn norm_for(field: &str) -> Option<&'static Norm> {
    NORMS.get(field)
}

/// Whether `value` lies outside the reference range of `field`.
pub fn is_out_of_range(field: &str, value: &FieldValue, gender: Option<Gender>) -> bool {
    let Some(norm) = norm_for(field) else {
        return false;
    };
    if !value.is_set() {
        return false;
    }
    let Some(number) = value.parse_float() else {
        return false;
    };
    norm.range_for(gender)
        .is_some_and(|range| !range.contains(number))
}

/// Fields of `record` currently flagged as abnormal, in field order.
pub fn out_of_range_fields(record: &PatientRecord) -> Vec<&str> {
    let gender = record.gender();
    record
        .iter()
        .filter(|(field, value)| is_out_of_range(field, value, gender))
        .map(|(field, _)| field)
        .collect()
}
