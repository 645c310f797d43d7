//! Typed calls to every backend endpoint.
//!
//! Each call either returns the decoded response or a [`ClientError`].
//! Checks that can fail without the backend run first; nothing is retried.

use rehab_core::models::card::{CreateCardRequest, PatientCard};
use rehab_core::models::patient::{level_from_label, CalculatorSeed, LevelFaPatient, PatientSummary};
use rehab_core::models::prediction::{
    BatchPredictionResponse, MessageResponse, ModelPredictionResponse, SaveFaResultRequest,
    SaveLfkResultRequest, SinglePredictionRequest, SinglePredictionResponse,
};
use rehab_core::models::program::PatientProgram;
use rehab_core::models::upload::{CheckNewPatientsResponse, NewPatient, SyntheticFill};
use rehab_core::PatientRecord;
use rehab_instruments::calculator::CalculatorInput;
use rehab_instruments::intake::check_required;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ClientError;
use crate::spreadsheet::SpreadsheetFile;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        decode(endpoint, response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        info!(endpoint = path, "GET");
        self.send(path, self.http.get(self.url(path))).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        info!(endpoint = path, "POST");
        self.send(path, self.http.post(self.url(path)).json(body)).await
    }

    /// `POST /create-card`. The required fields are checked locally first.
    pub async fn create_card(&self, record: &PatientRecord) -> Result<MessageResponse, ClientError> {
        check_required(record)?;
        let body = CreateCardRequest {
            data: record.clone(),
        };
        self.post("/create-card", &body).await
    }

    /// `GET /patients`
    pub async fn patients(&self) -> Result<Vec<PatientSummary>, ClientError> {
        self.get("/patients").await
    }

    /// `POST /predict-activity`: re-score every patient on the backend.
    pub async fn predict_activity(&self) -> Result<BatchPredictionResponse, ClientError> {
        info!(endpoint = "/predict-activity", "POST");
        self.send(
            "/predict-activity",
            self.http.post(self.url("/predict-activity")),
        )
        .await
    }

    /// `GET /level-fa/patients`
    pub async fn level_fa_patients(&self) -> Result<Vec<LevelFaPatient>, ClientError> {
        self.get("/level-fa/patients").await
    }

    /// `GET /level-fa/patients/{code}`: stored values to prefill the calculator.
    pub async fn calculator_seed(&self, code: i64) -> Result<CalculatorSeed, ClientError> {
        self.get(&format!("/level-fa/patients/{code}")).await
    }

    /// Validate the calculator form and ask the model for a class.
    ///
    /// An invalid form fails with [`ClientError::Validation`] naming the
    /// first offending field; the model is not called.
    pub async fn predict_model(
        &self,
        input: &CalculatorInput,
    ) -> Result<ModelPredictionResponse, ClientError> {
        let request = input.validate()?;
        self.post("/level-fa/predict-model", &request).await
    }

    /// `POST /level-fa/predict-activity-single`
    pub async fn predict_activity_single(
        &self,
        code: i64,
    ) -> Result<SinglePredictionResponse, ClientError> {
        info!(code, "predicting activity level");
        self.post(
            "/level-fa/predict-activity-single",
            &SinglePredictionRequest { code },
        )
        .await
    }

    /// Save a predicted level, given as its display label.
    pub async fn save_fa_result(&self, code: i64, label: &str) -> Result<MessageResponse, ClientError> {
        let fa_level = level_from_label(label).ok_or_else(|| {
            ClientError::Validation(format!("не удалось определить уровень из «{label}»"))
        })?;
        info!(code, fa_level, "saving activity level");
        self.post(
            "/level-fa/save-fa-result",
            &SaveFaResultRequest { code, fa_level },
        )
        .await
    }

    /// Save the exercise-therapy level. A zero level has not been determined.
    pub async fn save_lfk_result(
        &self,
        code: i64,
        overall_level: u8,
    ) -> Result<MessageResponse, ClientError> {
        if overall_level == 0 {
            return Err(ClientError::Validation(
                "Пожалуйста, выберите пациента и определите уровень ЛФК.".to_string(),
            ));
        }
        info!(code, lfk_level = overall_level, "saving exercise therapy level");
        self.post(
            "/level-fa/save-lfk-result",
            &SaveLfkResultRequest {
                code,
                lfk_level: overall_level,
            },
        )
        .await
    }

    /// `GET /patient-card/{code}`
    pub async fn patient_card(&self, code: i64) -> Result<PatientCard, ClientError> {
        self.get(&format!("/patient-card/{code}")).await
    }

    /// `GET /patient-program/{code}`
    pub async fn patient_program(&self, code: i64) -> Result<PatientProgram, ClientError> {
        self.get(&format!("/patient-program/{code}")).await
    }

    /// Upload a spreadsheet and list the patients the backend does not know.
    pub async fn check_new_patients(
        &self,
        file: &SpreadsheetFile,
    ) -> Result<CheckNewPatientsResponse, ClientError> {
        let path = "/api/check-new-patients";
        info!(endpoint = path, file = %file.file_name, bytes = file.bytes.len(), "uploading spreadsheet");
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.mime_type())?;
        let form = Form::new().part("file", part);
        self.send(path, self.http.post(self.url(path)).multipart(form))
            .await
    }

    /// Let the backend fill the gaps of one row with synthetic values.
    ///
    /// Returns the row with the filled data and no missing columns.
    pub async fn fill_synthetic(&self, patient: &NewPatient) -> Result<NewPatient, ClientError> {
        info!(code = %patient.code, missing = patient.missing_columns.len(), "filling row");
        let body = SyntheticFill {
            data: patient.data.clone(),
        };
        let filled: SyntheticFill = self.post("/api/fill-synthetic-patient", &body).await?;
        Ok(NewPatient {
            code: patient.code.clone(),
            data: filled.data,
            missing_columns: Vec::new(),
        })
    }

    /// Commit the reviewed rows.
    pub async fn upload_new_patients(
        &self,
        patients: &[NewPatient],
    ) -> Result<MessageResponse, ClientError> {
        self.post("/api/upload-new-patients-data", patients).await
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        let message = rejection_message(status.as_u16(), &body);
        warn!(endpoint, status = status.as_u16(), %message, "backend rejected request");
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        });
    }
    Ok(serde_json::from_slice(&body)?)
}

/// The `detail` field of an error body, or a generic message with the status.
fn rejection_message(status: u16, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());
    match detail {
        Some(serde_json::Value::String(s)) if !s.is_empty() => s,
        Some(serde_json::Value::String(_) | serde_json::Value::Null) | None => {
            format!("server error: {status}")
        }
        Some(other) => other.to_string(),
    }
}
