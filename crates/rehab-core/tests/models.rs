use pretty_assertions::assert_eq;
use rehab_core::models::card::PatientCard;
use rehab_core::models::patient::{level_from_label, level_label, PatientSummary};
use rehab_core::models::program::PatientProgram;
use rehab_core::models::upload::CheckNewPatientsResponse;

fn summary(info: &str) -> PatientSummary {
    PatientSummary {
        code: 1,
        patient_info: info.to_string(),
    }
}

#[test]
fn summary_splits_gender_and_level() {
    let p = summary("Женский, Выше среднего(4 ур.)");
    assert_eq!(p.gender(), Some("Женский"));
    assert_eq!(p.activity_label(), Some("Выше среднего(4 ур.)"));
    assert_eq!(p.activity_level(), Some(4));
}

#[test]
fn unassessed_patients_have_no_level() {
    assert_eq!(summary("Мужской, None").activity_label(), None);
    assert_eq!(summary("Мужской, Не оценено").activity_level(), None);
    assert_eq!(summary("Мужской").activity_level(), None);
    assert_eq!(summary("Мужской, Класс 7").activity_level(), None);
}

#[test]
fn labels_round_trip_through_level() {
    for class in 1..=5 {
        assert_eq!(level_from_label(&level_label(class)), Some(class as u8));
    }
    assert_eq!(level_label(9), "Класс 9");
    assert_eq!(level_from_label("Класс 9"), Some(9));
    assert_eq!(level_from_label("Средний( 3 ур.)"), None);
    assert_eq!(level_from_label("Средний(3  ур.)"), Some(3));
}

#[test]
fn check_response_reads_both_statuses() {
    let none: CheckNewPatientsResponse =
        serde_json::from_str(r#"{"status":"no_new_patients","message":"Новых пациентов не найдено"}"#)
            .unwrap();
    assert!(none.new_patients().is_empty());

    let found: CheckNewPatientsResponse = serde_json::from_str(
        r#"{"status":"new_patients_found","new_patients":[
            {"code":"77","data":{"Код_карты_пациента":77},"missing_columns":["ИМТ_(кг/м^2)_(Осмотр)"]}
        ]}"#,
    )
    .unwrap();
    assert_eq!(found.new_patients().len(), 1);
    assert!(!found.new_patients()[0].is_complete());
}

#[test]
fn card_sections_follow_display_order() {
    let card: PatientCard = serde_json::from_str(
        r#"{
            "examination": {"ИМТ": 24.1},
            "general_info": {"Код карты": 12},
            "lab_results": {},
            "scale_interpretations": {"Шкала MOCA": {"score": 27, "interpretation": "Норма"}}
        }"#,
    )
    .unwrap();
    let titles: Vec<&str> = card.ordered_sections().iter().map(|(t, _)| *t).collect();
    assert_eq!(titles, vec!["Общая информация", "Осмотр"]);
    assert_eq!(
        card.scale_interpretations["Шкала MOCA"].interpretation.as_deref(),
        Some("Норма")
    );
}

#[test]
fn program_skips_empty_categories() {
    let program: PatientProgram = serde_json::from_str(
        r#"{
            "patient_info": {"code": 5, "gender": "Женский"},
            "rehabilitation_program": {
                "nutrition": ["Белок 1,2 г/кг"],
                "sleep": [],
                "vaccination": ["Грипп", "Пневмококк"]
            }
        }"#,
    )
    .unwrap();
    let titles: Vec<&str> = program.ordered_categories().iter().map(|(t, _)| *t).collect();
    assert_eq!(titles, vec!["Вакцинация", "Питание"]);
}
