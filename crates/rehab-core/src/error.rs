use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("field {field} is not a list blob")]
    NotAListBlob { field: String },

    #[error("disease index {index} out of bounds (list has {len} entries)")]
    DiseaseIndex { index: usize, len: usize },
}
