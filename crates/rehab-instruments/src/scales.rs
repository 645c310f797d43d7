use rehab_core::{fields, PatientRecord};
use serde::Serialize;

/// A questionnaire whose item scores sum to a total field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub items: &'static [&'static str],
    pub total_field: &'static str,
}

impl ScaleDefinition {
    /// Editing any item, or the total itself, triggers a recompute.
    pub fn is_triggered_by(&self, field: &str) -> bool {
        self.total_field == field || self.items.contains(&field)
    }

    /// Sum of integer-parsed item values; missing or unparsable items
    /// count as zero. The sum saturates instead of overflowing.
    pub fn total(&self, record: &PatientRecord) -> i64 {
        self.items
            .iter()
            .map(|item| record.parse_int(item).unwrap_or(0))
            .fold(0_i64, i64::saturating_add)
    }
}

pub static SCALES: [ScaleDefinition; 7] = [
    ScaleDefinition {
        id: "sppb",
        name: "SPPB",
        items: &["419", "420", "421", "422", "423"],
        total_field: fields::SPPB_TOTAL,
    },
    ScaleDefinition {
        id: "barthel",
        name: "Barthel",
        items: &[
            "844", "845", "846", "847", "848", "849", "850", "851", "852", "853",
        ],
        total_field: fields::BARTHEL_TOTAL,
    },
    ScaleDefinition {
        id: "lawton",
        name: "Lawton",
        items: &["425", "426", "427", "428", "429", "430", "431", "432"],
        total_field: fields::LAWTON_TOTAL,
    },
    ScaleDefinition {
        id: "mmse",
        name: "MMSE",
        items: &[
            "551", "552", "553", "554", "555", "556", "557", "558", "559", "560",
        ],
        total_field: fields::MMSE_TOTAL,
    },
    ScaleDefinition {
        id: "moca",
        name: "MOCA",
        items: &[
            "610", "611", "612", "613", "614", "615", "616", "617", "618", "619", "620", "621",
            "622",
        ],
        total_field: fields::MOCA_TOTAL,
    },
    ScaleDefinition {
        id: "eq5d",
        name: "EQ-5D",
        items: &["391", "392", "393", "394", "395"],
        total_field: fields::EQ5D_TOTAL,
    },
    ScaleDefinition {
        id: "mna",
        name: "MNA",
        items: &[
            "397", "398", "399", "400", "401", "402", "403", "404", "405", "406", "407", "408",
            "409", "410", "411", "412",
        ],
        total_field: fields::MNA_TOTAL,
    },
];
