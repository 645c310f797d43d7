//! Patient-list summaries for the doctor dashboard.

use rehab_core::models::patient::PatientSummary;
use serde::Serialize;

/// Patient counts per activity level 1..=5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelHistogram {
    counts: [u32; 5],
    unassessed: u32,
}

impl LevelHistogram {
    pub fn from_patients(patients: &[PatientSummary]) -> Self {
        let mut histogram = Self::default();
        for patient in patients {
            match patient.activity_level() {
                Some(level) => histogram.counts[usize::from(level - 1)] += 1,
                None => histogram.unassessed += 1,
            }
        }
        histogram
    }

    /// Counts for levels 1 through 5, in order.
    pub fn counts(&self) -> [u32; 5] {
        self.counts
    }

    pub fn count(&self, level: u8) -> u32 {
        usize::from(level)
            .checked_sub(1)
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Patients without a parsable level.
    pub fn unassessed(&self) -> u32 {
        self.unassessed
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum::<u32>() + self.unassessed
    }
}
