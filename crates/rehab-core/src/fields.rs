//! Field identifiers used by the intake card.
//!
//! Most identifiers are the numeric column codes of the clinical database;
//! the activity-progress fields use named keys.

pub const CARD_CODE: &str = "1";
pub const GENDER: &str = "2";
pub const HEIGHT_CM: &str = "9";
pub const WEIGHT_KG: &str = "10";
pub const BMI: &str = "11";
pub const CHARLSON_INDEX: &str = "27";
pub const CHRONIC_DISEASES: &str = "30";
pub const CHRONIC_DISEASE_STAGES: &str = "30_stage";
pub const LIVING_SITUATION: &str = "102";
pub const MEDICATIONS: &str = "336";

pub const SPPB_TOTAL: &str = "424";
pub const LAWTON_TOTAL: &str = "433";
pub const MMSE_TOTAL: &str = "562";
pub const MOCA_TOTAL: &str = "623";
pub const EQ5D_TOTAL: &str = "396";
pub const MNA_TOTAL: &str = "415";
pub const BARTHEL_TOTAL: &str = "854";

/// Geriatric health index.
pub const GERIATRIC_INDEX: &str = "giz";

/// Fields that must be non-empty before a card can be submitted.
pub const REQUIRED_AT_SUBMIT: [&str; 6] = [
    CARD_CODE,
    GENDER,
    HEIGHT_CM,
    WEIGHT_KG,
    BMI,
    CHRONIC_DISEASES,
];

pub const ANAEROBIC_LEVEL: &str = "anaerobic_level";
pub const CARDIO_LEVEL: &str = "cardio_level";
pub const BALANCE_LEVEL: &str = "balance_level";
pub const STRETCHING_LEVEL: &str = "stretching_level";
pub const OVERALL_LEVEL: &str = "overall_level";

pub const ANAEROBIC_EXERCISES: [&str; 9] = [
    "anaerobic_squat",
    "anaerobic_expander",
    "anaerobic_pushup",
    "anaerobic_leg",
    "anaerobic_sideleg",
    "standing_toes",
    "standing_sideleg",
    "standing_chair",
    "standing_squat",
];

pub const CARDIO_WALKING: &str = "cardio_walking";

pub const BALANCE_EIGHT_WALKING: &str = "balance_eight_walking";

pub const BALANCE_EXERCISES: [&str; 5] = [
    "balance_line_walking",
    "balance_knee_bend",
    "balance_toes_heels",
    "balance_toes_heels_walking",
    BALANCE_EIGHT_WALKING,
];

pub const STRETCHING_EXERCISES: [&str; 7] = [
    "stretch_arms",
    "stretch_shoulders",
    "stretch_thighs",
    "stretch_neck",
    "stretch_ankle",
    "stretch_shoulder_upper_back",
    "stretch_hamstring",
];
