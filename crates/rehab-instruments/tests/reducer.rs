use pretty_assertions::assert_eq;
use rehab_core::{fields, FieldValue, PatientRecord};
use rehab_instruments::activity::{INTAKE_CARD, QUICK_ASSESSMENT};
use rehab_instruments::reducer::{apply_edit, recompute_all, EditSession};

const BARTHEL_ITEMS: [(&str, &str); 10] = [
    ("844", "10"),
    ("845", "5"),
    ("846", "0"),
    ("847", "5"),
    ("848", "10"),
    ("849", "10"),
    ("850", "10"),
    ("851", "15"),
    ("852", "10"),
    ("853", "15"),
];

#[test]
fn item_edit_updates_total_and_index() {
    let mut session = EditSession::new(&INTAKE_CARD);
    for (field, value) in BARTHEL_ITEMS {
        session.edit(field, value);
    }
    let record = session.record();
    assert_eq!(record.get(fields::BARTHEL_TOTAL), Some(&FieldValue::from(90_i64)));
    // Barthel 90 earns nothing; Charlson 0, no medications, not alone.
    assert_eq!(record.text(fields::GERIATRIC_INDEX), "3.0");
}

#[test]
fn edit_does_not_touch_the_input_record() {
    let before = PatientRecord::new().with(fields::HEIGHT_CM, "170");
    let after = apply_edit(&before, fields::WEIGHT_KG, "70", &INTAKE_CARD);
    assert_eq!(before.get(fields::BMI), None);
    assert_eq!(after.text(fields::BMI), "24.2");
}

#[test]
fn unrelated_edit_leaves_derived_fields_alone() {
    let record = PatientRecord::new().with(fields::CARD_CODE, "A-17");
    let next = apply_edit(&record, fields::CARD_CODE, "A-18", &INTAKE_CARD);
    assert_eq!(next.len(), 1);
}

#[test]
fn full_index_cascade() {
    let record = [
        (fields::BARTHEL_TOTAL, "95"),
        (fields::LAWTON_TOTAL, "7"),
        (fields::MMSE_TOTAL, "29"),
        (fields::CHARLSON_INDEX, "0"),
        (fields::MNA_TOTAL, "25"),
    ]
    .into_iter()
    .fold(PatientRecord::new(), |r, (f, v)| r.with(f, v));
    let record = apply_edit(&record, fields::MEDICATIONS, "аспирин,метформин", &INTAKE_CARD);
    let record = apply_edit(&record, fields::LIVING_SITUATION, "alone", &INTAKE_CARD);
    assert_eq!(record.text(fields::GERIATRIC_INDEX), "6.0");
}

#[test]
fn activity_edit_writes_levels() {
    let record = apply_edit(&PatientRecord::new(), "anaerobic_squat", "3x10", &QUICK_ASSESSMENT);
    assert_eq!(record.get(fields::ANAEROBIC_LEVEL), Some(&FieldValue::Number(4.0)));
    assert_eq!(record.get(fields::OVERALL_LEVEL), Some(&FieldValue::Number(4.0)));
}

#[test]
fn loading_keeps_stored_totals_without_items() {
    let stored = PatientRecord::new()
        .with(fields::MMSE_TOTAL, "27")
        .with(fields::GENDER, "Женский");
    let loaded = recompute_all(&stored, &INTAKE_CARD);
    assert_eq!(loaded.text(fields::MMSE_TOTAL), "27");
    assert_eq!(loaded.get(fields::CARDIO_LEVEL), None);
    assert!(loaded.is_set(fields::GERIATRIC_INDEX));
}

#[test]
fn recompute_is_idempotent() {
    let mut session = EditSession::new(&INTAKE_CARD);
    for (field, value) in BARTHEL_ITEMS {
        session.edit(field, value);
    }
    session.edit(fields::HEIGHT_CM, "165");
    session.edit(fields::WEIGHT_KG, "80");
    session.edit("stretch_arms", "3x3");
    let once = recompute_all(session.record(), &INTAKE_CARD);
    let twice = recompute_all(&once, &INTAKE_CARD);
    assert_eq!(&once, session.record());
    assert_eq!(once, twice);
}

#[test]
fn revisions_identify_stale_responses() {
    let mut session = EditSession::new(&QUICK_ASSESSMENT);
    let sent = session.edit("anaerobic_squat", "1x10");
    assert!(session.is_current(sent));
    session.edit("anaerobic_squat", "2x10");
    assert!(!session.is_current(sent));
    assert_eq!(session.revision(), 2);
}

#[test]
fn session_flags_abnormal_values() {
    let mut session = EditSession::new(&INTAKE_CARD);
    session.edit(fields::HEIGHT_CM, "160");
    session.edit(fields::WEIGHT_KG, "90");
    assert_eq!(session.flagged_fields(), vec![fields::BMI]);
}

#[test]
fn huge_item_edit_keeps_the_total_saturated() {
    let max = "9223372036854775807";
    let record = PatientRecord::new().with("844", max);
    let record = apply_edit(&record, "845", max, &INTAKE_CARD);
    assert_eq!(
        record.get(fields::BARTHEL_TOTAL),
        Some(&FieldValue::from(i64::MAX))
    );
}
