use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A spreadsheet row for a patient not yet known to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewPatient {
    pub code: String,
    pub data: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub missing_columns: Vec<String>,
}

impl NewPatient {
    pub fn is_complete(&self) -> bool {
        self.missing_columns.is_empty()
    }
}

/// Response of `POST /api/check-new-patients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum CheckNewPatientsResponse {
    NoNewPatients {
        #[serde(default)]
        message: Option<String>,
    },
    NewPatientsFound {
        #[serde(default)]
        message: Option<String>,
        new_patients: Vec<NewPatient>,
        #[serde(default)]
        new_codes: Vec<String>,
    },
}

impl CheckNewPatientsResponse {
    pub fn new_patients(&self) -> &[NewPatient] {
        match self {
            CheckNewPatientsResponse::NoNewPatients { .. } => &[],
            CheckNewPatientsResponse::NewPatientsFound { new_patients, .. } => new_patients,
        }
    }
}

/// Body and response of `POST /api/fill-synthetic-patient`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SyntheticFill {
    pub data: BTreeMap<String, serde_json::Value>,
}
