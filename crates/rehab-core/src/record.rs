use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::fields;

pub const MALE_LABEL: &str = "Мужской";
pub const FEMALE_LABEL: &str = "Женский";

/// A single value held by a record field.
///
/// Form inputs produce text, derived fields are written back as numbers,
/// multi-select inputs produce lists. Paired disease lists are stored as
/// text holding a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Whether the field counts as filled in. Empty text, empty lists and
    /// null do not.
    pub fn is_set(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Number(n) => !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::List(items) => !items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value using leading-prefix parsing: `"12"`, `" 12abc"` and
    /// `"12.9"` all give 12. Numbers are truncated toward zero.
    pub fn parse_int(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            FieldValue::Text(s) => parse_int_prefix(s),
            _ => None,
        }
    }

    /// Floating-point value using leading-prefix parsing: `"4.5"` and
    /// `"4.5 г/л"` both give 4.5.
    pub fn parse_float(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if !n.is_nan() => Some(*n),
            FieldValue::Text(s) => parse_float_prefix(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Patient gender as captured by field `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            MALE_LABEL => Some(Gender::Male),
            FEMALE_LABEL => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => MALE_LABEL,
            Gender::Female => FEMALE_LABEL,
        }
    }
}

/// The in-progress patient record for one editing session.
///
/// Updates go through [`PatientRecord::with`], which returns a new record
/// rather than mutating in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl PatientRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Return a copy of this record with `field` set to `value`.
    pub fn with(&self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let mut next = self.clone();
        next.fields.insert(field.into(), value.into());
        next
    }

    pub fn is_set(&self, field: &str) -> bool {
        self.get(field).is_some_and(FieldValue::is_set)
    }

    /// Text value of a field, or `""` when absent or not text.
    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn parse_int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::parse_int)
    }

    pub fn parse_float(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::parse_float)
    }

    /// Any set gender other than the male label reads as female. An empty
    /// field has no gender.
    pub fn gender(&self) -> Option<Gender> {
        let label = self.text(fields::GENDER).trim();
        if label.is_empty() {
            return None;
        }
        Some(Gender::from_label(label).unwrap_or(Gender::Female))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read a JSON string-array blob. Absent or empty fields read as an
    /// empty list.
    pub fn list_blob(&self, field: &str) -> Result<Vec<String>, CoreError> {
        match self.get(field) {
            None | Some(FieldValue::Null) => Ok(Vec::new()),
            Some(FieldValue::Text(s)) if s.is_empty() => Ok(Vec::new()),
            Some(FieldValue::Text(s)) => Ok(serde_json::from_str(s)?),
            Some(FieldValue::List(items)) => Ok(items.clone()),
            Some(FieldValue::Number(_)) => Err(CoreError::NotAListBlob {
                field: field.to_string(),
            }),
        }
    }

    pub fn with_list_blob(&self, field: &str, items: &[String]) -> Result<Self, CoreError> {
        Ok(self.with(field, serde_json::to_string(items)?))
    }
}

impl FromIterator<(String, FieldValue)> for PatientRecord {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Chronic disease names and their stages, kept as two parallel blobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiseaseList {
    pub names: Vec<String>,
    pub stages: Vec<String>,
}

impl DiseaseList {
    pub fn read(record: &PatientRecord) -> Result<Self, CoreError> {
        Ok(Self {
            names: record.list_blob(fields::CHRONIC_DISEASES)?,
            stages: record.list_blob(fields::CHRONIC_DISEASE_STAGES)?,
        })
    }

    /// Name and stage pairs. A missing stage reads as empty.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().enumerate().map(|(i, name)| {
            let stage = self.stages.get(i).map(String::as_str).unwrap_or("");
            (name.as_str(), stage)
        })
    }

    pub fn write(&self, record: &PatientRecord) -> Result<PatientRecord, CoreError> {
        record
            .with_list_blob(fields::CHRONIC_DISEASES, &self.names)?
            .with_list_blob(fields::CHRONIC_DISEASE_STAGES, &self.stages)
    }
}

/// Append an empty disease entry to both lists.
pub fn add_disease(record: &PatientRecord) -> Result<PatientRecord, CoreError> {
    let mut list = DiseaseList::read(record)?;
    list.names.push(String::new());
    list.stages.push(String::new());
    list.write(record)
}

/// Overwrite the name and stage of the disease at `index`.
pub fn set_disease(
    record: &PatientRecord,
    index: usize,
    name: &str,
    stage: &str,
) -> Result<PatientRecord, CoreError> {
    let mut list = DiseaseList::read(record)?;
    let len = list.names.len();
    if index >= len {
        return Err(CoreError::DiseaseIndex { index, len });
    }
    list.names[index] = name.to_string();
    if list.stages.len() < len {
        list.stages.resize(len, String::new());
    }
    list.stages[index] = stage.to_string();
    list.write(record)
}
