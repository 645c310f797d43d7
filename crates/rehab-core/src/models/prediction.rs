use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Response of the batch re-scoring endpoint `POST /predict-activity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchPredictionResponse {
    pub message: String,
    pub updated_count: u64,
    #[serde(default)]
    pub failed_predictions: Vec<serde_json::Value>,
}

/// Body of `POST /level-fa/predict-model`, ordered as the calculator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelPredictionRequest {
    pub values: [f64; 8],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelPredictionResponse {
    pub predicted_class: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SinglePredictionRequest {
    pub code: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SinglePredictionResponse {
    pub message: String,
    pub activity_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaveFaResultRequest {
    pub code: i64,
    pub fa_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaveLfkResultRequest {
    pub code: i64,
    pub lfk_level: u8,
}

/// Plain acknowledgement returned by save and commit endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
