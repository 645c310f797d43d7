//! Field-edit reducer.
//!
//! An edit produces a new record with every derived field whose inputs
//! changed recomputed. Derivations run in dependency order (BMI, scale
//! totals, geriatric index, activity levels) and each one adds the fields
//! it writes to the changed set, so a scale item edit flows through to the
//! index in the same step.

use std::collections::BTreeSet;

use rehab_core::{fields, FieldValue, PatientRecord};
use tracing::debug;

use crate::activity::{classify, ActivityProfile};
use crate::composite::{geriatric_index, INDEX_INPUTS};
use crate::intake::derive_bmi;
use crate::{all_scales, norms};

/// Why a recompute runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Edit,
    /// Loading a stored record: a scale total with none of its items
    /// present is kept as stored.
    Load,
}

/// Apply a single field edit and recompute what depends on it.
pub fn apply_edit(
    record: &PatientRecord,
    field: &str,
    value: impl Into<FieldValue>,
    profile: &ActivityProfile,
) -> PatientRecord {
    let next = record.with(field, value);
    let changed = BTreeSet::from([field.to_string()]);
    recompute(next, changed, profile, Pass::Edit)
}

/// Recompute every derived field, e.g. after loading a record.
pub fn recompute_all(record: &PatientRecord, profile: &ActivityProfile) -> PatientRecord {
    let changed = record.iter().map(|(field, _)| field.to_string()).collect();
    recompute(record.clone(), changed, profile, Pass::Load)
}

fn recompute(
    mut record: PatientRecord,
    mut changed: BTreeSet<String>,
    profile: &ActivityProfile,
    pass: Pass,
) -> PatientRecord {
    if (changed.contains(fields::HEIGHT_CM) || changed.contains(fields::WEIGHT_KG))
        && let Some(bmi) = derive_bmi(&record)
    {
        debug!(bmi = %bmi, "recomputed BMI");
        record = record.with(fields::BMI, bmi);
        changed.insert(fields::BMI.to_string());
    }

    for scale in all_scales() {
        if !changed.iter().any(|f| scale.is_triggered_by(f)) {
            continue;
        }
        if pass == Pass::Load && !scale.items.iter().any(|item| record.is_set(item)) {
            continue;
        }
        let total = scale.total(&record);
        debug!(scale = scale.id, total, "recomputed scale total");
        record = record.with(scale.total_field, total);
        changed.insert(scale.total_field.to_string());
    }

    if INDEX_INPUTS.iter().any(|f| changed.contains(*f)) {
        let index = geriatric_index(&record);
        debug!(giz = %index, "recomputed geriatric index");
        record = record.with(fields::GERIATRIC_INDEX, index);
    }

    if profile.depends_on_any(&changed) {
        let levels = classify(profile, &record);
        debug!(profile = profile.name, ?levels, "recomputed activity levels");
        record = levels.write_into(profile, &record);
    }

    record
}

/// One editing session: the current record and a revision counter.
///
/// Every edit bumps the revision. A caller that sends the record somewhere
/// can hold on to the revision it sent and ask [`EditSession::is_current`]
/// when the response comes back.
#[derive(Debug, Clone)]
pub struct EditSession {
    record: PatientRecord,
    revision: u64,
    profile: &'static ActivityProfile,
}

impl EditSession {
    pub fn new(profile: &'static ActivityProfile) -> Self {
        Self {
            record: PatientRecord::new(),
            revision: 0,
            profile,
        }
    }

    /// Start from an existing record, deriving all computed fields.
    pub fn from_record(record: &PatientRecord, profile: &'static ActivityProfile) -> Self {
        Self {
            record: recompute_all(record, profile),
            revision: 0,
            profile,
        }
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn profile(&self) -> &'static ActivityProfile {
        self.profile
    }

    /// Apply an edit and return the new revision.
    pub fn edit(&mut self, field: &str, value: impl Into<FieldValue>) -> u64 {
        self.record = apply_edit(&self.record, field, value, self.profile);
        self.revision += 1;
        self.revision
    }

    pub fn is_current(&self, revision: u64) -> bool {
        self.revision == revision
    }

    /// Fields currently outside their reference range.
    pub fn flagged_fields(&self) -> Vec<&str> {
        norms::out_of_range_fields(&self.record)
    }

    pub fn into_record(self) -> PatientRecord {
        self.record
    }
}
