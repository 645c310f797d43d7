use pretty_assertions::assert_eq;
use rehab_client::spreadsheet::{check_spreadsheet, read_spreadsheet, MAX_UPLOAD_BYTES};
use rehab_client::{BackendClient, ClientError};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn spreadsheet(suffix: &str, len: u64) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new()
        .prefix("patients")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.as_file().set_len(len).unwrap();
    file
}

async fn upload(server: &MockServer, file: &tempfile::NamedTempFile) -> Result<(), ClientError> {
    let client = BackendClient::new(server.uri());
    let spreadsheet = read_spreadsheet(file.path()).await?;
    client.check_new_patients(&spreadsheet).await?;
    Ok(())
}

#[test]
fn extension_allow_list() {
    assert!(check_spreadsheet("пациенты.xlsx", 1024).is_ok());
    assert!(check_spreadsheet("OLD.XLS", 1024).is_ok());
    assert!(check_spreadsheet("patients.csv", 1024).is_err());
    assert!(check_spreadsheet("xlsx", 1024).is_err());
}

#[test]
fn size_limit_is_inclusive() {
    assert!(check_spreadsheet("a.xlsx", MAX_UPLOAD_BYTES).is_ok());
    let err = check_spreadsheet("a.xlsx", MAX_UPLOAD_BYTES + 1).unwrap_err();
    assert_eq!(err.to_string(), "Размер файла не должен превышать 10MB");
}

#[tokio::test]
async fn oversized_file_is_rejected_before_upload() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = spreadsheet(".xlsx", 12 * 1024 * 1024);
    let err = upload(&server, &file).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn csv_file_is_rejected_before_upload() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = spreadsheet(".csv", 100);
    let err = upload(&server, &file).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Пожалуйста, выберите файл Excel (.xlsx или .xls)"
    );
}

#[tokio::test]
async fn missing_file_reports_path() {
    let err = read_spreadsheet(std::path::Path::new("/nonexistent/patients.xlsx"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Io { .. }));
}
