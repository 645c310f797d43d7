//! Upload gate for spreadsheet files.

use std::path::Path;

use crate::error::ClientError;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// A spreadsheet that passed the gate, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SpreadsheetFile {
    pub fn mime_type(&self) -> &'static str {
        if self.file_name.to_lowercase().ends_with(".xls") {
            "application/vnd.ms-excel"
        } else {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        }
    }
}

/// Check name and size before anything is read or sent.
pub fn check_spreadsheet(file_name: &str, size: u64) -> Result<(), ClientError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    if !extension.is_some_and(|e| ALLOWED_EXTENSIONS.contains(&e.as_str())) {
        return Err(ClientError::Validation(
            "Пожалуйста, выберите файл Excel (.xlsx или .xls)".to_string(),
        ));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(ClientError::Validation(
            "Размер файла не должен превышать 10MB".to_string(),
        ));
    }
    Ok(())
}

/// Read a spreadsheet from disk after checking its name and size.
pub async fn read_spreadsheet(path: &Path) -> Result<SpreadsheetFile, ClientError> {
    let io_err = |source| ClientError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;
    check_spreadsheet(&file_name, metadata.len())?;

    let bytes = tokio::fs::read(path).await.map_err(io_err)?;
    // The file may have grown since the metadata call.
    check_spreadsheet(&file_name, bytes.len() as u64)?;
    Ok(SpreadsheetFile { file_name, bytes })
}
