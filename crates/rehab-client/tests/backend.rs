use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rehab_client::spreadsheet::SpreadsheetFile;
use rehab_client::{BackendClient, ClientError};
use rehab_core::fields;
use rehab_core::models::upload::NewPatient;
use rehab_core::PatientRecord;
use rehab_instruments::calculator::{CalculatorInput, CalculatorParam};
use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_refusing_all_requests() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    server
}

fn complete_card() -> PatientRecord {
    PatientRecord::new()
        .with(fields::CARD_CODE, "A-17")
        .with(fields::GENDER, "Женский")
        .with(fields::HEIGHT_CM, "160")
        .with(fields::WEIGHT_KG, "55")
        .with(fields::BMI, "21.5")
        .with(fields::CHRONIC_DISEASES, r#"["Гипертония"]"#)
}

fn calculator_input() -> CalculatorInput {
    CalculatorInput {
        age_frailty_score: "3".into(),
        activity_frequency: "Ежедневно".into(),
        activity_duration: "30-60 мин".into(),
        bmi: "22".into(),
        barthel_index: "100".into(),
        sppb: "12".into(),
        get_up_and_go: "7".into(),
        four_metre_walk: "≤4,81 с".into(),
    }
}

#[tokio::test]
async fn lists_patients() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"code": 101, "patient_info": "Мужской, Средний(3 ур.)"},
            {"code": 102, "patient_info": "Женский, None"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let patients = BackendClient::new(server.uri()).patients().await.unwrap();
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].activity_level(), Some(3));
    assert_eq!(patients[1].activity_level(), None);
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/level-fa/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"code": 7}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(format!("{}/", server.uri()));
    let patients = client.level_fa_patients().await.unwrap();
    assert_eq!(patients[0].code, 7);
    assert_eq!(patients[0].gender, None);
}

#[tokio::test]
async fn rejection_surfaces_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-card"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Карта с таким кодом уже существует"})),
        )
        .mount(&server)
        .await;

    let err = BackendClient::new(server.uri())
        .create_card(&complete_card())
        .await
        .unwrap_err();
    match err {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Карта с таким кодом уже существует");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn rejection_without_detail_names_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict-activity"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = BackendClient::new(server.uri())
        .predict_activity()
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "server error: 503");
}

#[tokio::test]
async fn incomplete_card_is_not_sent() {
    let server = server_refusing_all_requests().await;
    let record = complete_card().with(fields::BMI, "");
    let err = BackendClient::new(server.uri())
        .create_card(&record)
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn card_is_wrapped_in_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-card"))
        .and(body_json(json!({"data": {
            "1": "A-17", "10": "55", "11": "21.5", "2": "Женский",
            "30": "[\"Гипертония\"]", "9": "160"
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = BackendClient::new(server.uri())
        .create_card(&complete_card())
        .await
        .unwrap();
    assert_eq!(response.message, "ok");
}

#[tokio::test]
async fn batch_prediction_reports_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict-activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Готово.", "updated_count": 12
        })))
        .mount(&server)
        .await;

    let result = BackendClient::new(server.uri())
        .predict_activity()
        .await
        .unwrap();
    assert_eq!(result.updated_count, 12);
    assert!(result.failed_predictions.is_empty());
}

#[tokio::test]
async fn model_receives_encoded_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/level-fa/predict-model"))
        .and(body_json(json!({"values": [3.0, 4.0, 1.0, 22.0, 100.0, 12.0, 7.0, 4.0]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predicted_class": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let prediction = BackendClient::new(server.uri())
        .predict_model(&calculator_input())
        .await
        .unwrap();
    assert_eq!(prediction.predicted_class, 5);
}

#[tokio::test]
async fn invalid_calculator_input_is_not_sent() {
    let server = server_refusing_all_requests().await;
    let mut input = calculator_input();
    input.set(CalculatorParam::BarthelIndex, "97");
    let err = BackendClient::new(server.uri())
        .predict_model(&input)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Индекс Бартел должен быть от 0 до 100 и кратен 5"
    );
}

#[tokio::test]
async fn calculator_seed_prefills_input() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/level-fa/patients/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 42, "gender": "Мужской", "col_14": 0, "col_58": "1 раз в неделю",
            "col_59": "<30 мин", "col_85": 31.2, "col_232": 85, "col_249": 6,
            "col_252": 12.5, "col_245": 1, "activity_level": null
        })))
        .mount(&server)
        .await;

    let seed = BackendClient::new(server.uri())
        .calculator_seed(42)
        .await
        .unwrap();
    let input = CalculatorInput::from_seed(&seed);
    assert_eq!(input.age_frailty_score, "0");
    assert_eq!(input.four_metre_walk, "≥8,71 с");
    assert!(input.validate().is_ok());
}

#[tokio::test]
async fn saves_level_parsed_from_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/level-fa/save-fa-result"))
        .and(body_json(json!({"code": 42, "fa_level": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "saved"})))
        .expect(1)
        .mount(&server)
        .await;

    BackendClient::new(server.uri())
        .save_fa_result(42, "Выше среднего(4 ур.)")
        .await
        .unwrap();
}

#[tokio::test]
async fn undetermined_levels_are_not_saved() {
    let server = server_refusing_all_requests().await;
    let client = BackendClient::new(server.uri());
    assert!(client.save_lfk_result(42, 0).await.unwrap_err().is_validation());
    assert!(client.save_fa_result(42, "Не оценено").await.unwrap_err().is_validation());
}

#[tokio::test]
async fn single_prediction_returns_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/level-fa/predict-activity-single"))
        .and(body_json(json!({"code": 42})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok", "activity_level": "Средний(3 ур.)"
        })))
        .mount(&server)
        .await;

    let result = BackendClient::new(server.uri())
        .predict_activity_single(42)
        .await
        .unwrap();
    assert_eq!(result.activity_level, "Средний(3 ур.)");
}

#[tokio::test]
async fn patient_card_sections_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patient-card/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "general_info": {"Код": 42, "Пол": "Мужской"},
            "scale_interpretations": {
                "Бартел": {"score": 90, "interpretation": "Лёгкая зависимость"},
                "MMSE": {"score": null, "interpretation": null}
            }
        })))
        .mount(&server)
        .await;

    let card = BackendClient::new(server.uri())
        .patient_card(42)
        .await
        .unwrap();
    assert_eq!(card.sections["general_info"]["Пол"], json!("Мужской"));
    assert_eq!(card.scale_interpretations.len(), 2);
    assert_eq!(card.scale_interpretations["MMSE"].interpretation, None);
}

#[tokio::test]
async fn patient_program_keeps_recommendation_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patient-program/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patient_info": {"code": 42, "gender": "Женский"},
            "rehabilitation_program": {"Питание": ["Белок", "Вода"]}
        })))
        .mount(&server)
        .await;

    let program = BackendClient::new(server.uri())
        .patient_program(42)
        .await
        .unwrap();
    assert_eq!(
        program.rehabilitation_program["Питание"],
        vec!["Белок".to_string(), "Вода".to_string()]
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = BackendClient::new(server.uri()).patients().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn spreadsheet_check_lists_new_patients() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/check-new-patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "new_patients_found",
            "message": "Найдено 1",
            "new_patients": [{"code": "1042", "data": {"Пол": "Женский"}, "missing_columns": ["ИМТ_(кг/м^2)_(Осмотр)"]}],
            "new_codes": ["1042"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = SpreadsheetFile {
        file_name: "patients.xlsx".into(),
        bytes: vec![0x50, 0x4b, 0x03, 0x04],
    };
    let response = BackendClient::new(server.uri())
        .check_new_patients(&file)
        .await
        .unwrap();
    assert_eq!(response.new_patients().len(), 1);
    assert!(!response.new_patients()[0].is_complete());
}

#[tokio::test]
async fn synthetic_fill_clears_missing_columns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fill-synthetic-patient"))
        .and(body_json(json!({"data": {"Пол": "Женский"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"Пол": "Женский", "ИМТ_(кг/м^2)_(Осмотр)": 24.1}
        })))
        .mount(&server)
        .await;

    let row = NewPatient {
        code: "1042".into(),
        data: BTreeMap::from([("Пол".to_string(), json!("Женский"))]),
        missing_columns: vec!["ИМТ_(кг/м^2)_(Осмотр)".into()],
    };
    let filled = BackendClient::new(server.uri())
        .fill_synthetic(&row)
        .await
        .unwrap();
    assert!(filled.is_complete());
    assert_eq!(filled.code, "1042");
    assert_eq!(filled.data["ИМТ_(кг/м^2)_(Осмотр)"], json!(24.1));
}

#[tokio::test]
async fn upload_sends_rows_as_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-new-patients-data"))
        .and(body_json(json!([{"code": "1042", "data": {}, "missing_columns": []}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Загружено 1"})))
        .expect(1)
        .mount(&server)
        .await;

    let row = NewPatient {
        code: "1042".into(),
        data: BTreeMap::new(),
        missing_columns: Vec::new(),
    };
    let response = BackendClient::new(server.uri())
        .upload_new_patients(&[row])
        .await
        .unwrap();
    assert_eq!(response.message, "Загружено 1");
}
