use pretty_assertions::assert_eq;
use rehab_client::dashboard::LevelHistogram;
use rehab_core::models::patient::PatientSummary;

fn summary(code: i64, info: &str) -> PatientSummary {
    PatientSummary {
        code,
        patient_info: info.to_string(),
    }
}

#[test]
fn patients_are_counted_per_level() {
    let patients = [
        summary(1, "Мужской, Средний(3 ур.)"),
        summary(2, "Женский, Высокий(5 ур.)"),
        summary(3, "Женский, Средний(3 ур.)"),
        summary(4, "Мужской, None"),
        summary(5, "Женский, Не оценено"),
        summary(6, "Женский"),
    ];
    let histogram = LevelHistogram::from_patients(&patients);
    assert_eq!(histogram.counts(), [0, 0, 2, 0, 1]);
    assert_eq!(histogram.unassessed(), 3);
    assert_eq!(histogram.total(), 6);
    assert_eq!(histogram.count(3), 2);
    assert_eq!(histogram.count(0), 0);
    assert_eq!(histogram.count(6), 0);
}

#[test]
fn empty_list_gives_zero_counts() {
    let histogram = LevelHistogram::from_patients(&[]);
    assert_eq!(histogram.counts(), [0; 5]);
    assert_eq!(histogram.total(), 0);
}
