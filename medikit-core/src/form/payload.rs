//! Wire payload shaping for medication submission.
//!
//! `MedicationPayload::from_draft` is the single, total translation from
//! the accumulated form state to the backend's POST /medication shape.
//! Field renames and the schedule-dependent branches all live here, so the
//! translation can be tested without any IO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::draft::{MedicationDraft, Recipient};
use crate::schedule::{Frequency, FrequencyKind};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// One dose entry in the outgoing payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct DosePayload {
    /// Dose amount, numeric text as entered
    pub dose: String,
    /// Scheduled time, RFC 3339
    pub reception_time: DateTime<Utc>,
}

/// Outgoing POST /medication body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct MedicationPayload {
    /// Medication name
    pub medicine_name: String,
    /// Physical form, lowercase wire label
    pub forms: String,
    /// Strength, numeric text
    pub strength: String,
    /// Strength unit
    pub unit: String,
    /// Free-form notes
    pub description: String,
    /// Who the plan is for
    #[serde(rename = "forWhom")]
    pub for_whom: Recipient,
    /// Connected account id when `for_whom` is `relative`
    pub relative_id: Option<String>,
    /// First day of the plan
    pub start_date: DateTime<Utc>,
    /// Schedule; `specificDays` only for on-specific-days plans
    pub frequency: Frequency,
    /// Dose entries; always empty for as-needed plans
    pub times: Vec<DosePayload>,
}

impl MedicationPayload {
    /// Shape the outgoing payload from a draft.
    ///
    /// Total over all drafts: missing selections become empty strings,
    /// which step validation rules out before submission is reachable.
    pub fn from_draft(draft: &MedicationDraft) -> Self {
        let times = if draft.frequency == FrequencyKind::AsNeeded {
            // As-needed plans never carry dose times, no matter what was
            // entered while another kind was selected.
            Vec::new()
        } else {
            (0..draft.num_times)
                .map(|i| DosePayload {
                    dose: draft.dosage.clone(),
                    reception_time: draft
                        .times
                        .get(i)
                        .copied()
                        .unwrap_or(draft.start_date),
                })
                .collect()
        };

        let frequency = Frequency {
            kind: draft.frequency,
            specific_days: if draft.frequency == FrequencyKind::OnSpecificDays {
                draft.specific_days.clone()
            } else {
                Vec::new()
            },
        };

        Self {
            medicine_name: draft.name.clone(),
            forms: draft.form.map(|f| f.as_str().to_string()).unwrap_or_default(),
            strength: draft.strength.clone(),
            unit: draft.unit.map(|u| u.as_str().to_string()).unwrap_or_default(),
            description: draft.notes.clone(),
            for_whom: draft.recipient,
            relative_id: draft.relative_id.clone(),
            start_date: draft.start_date,
            frequency,
            times,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::draft::{DoseUnit, MedicationForm};
    use crate::schedule::DayOfWeek;
    use chrono::TimeZone;

    fn ibuprofen_draft() -> MedicationDraft {
        let mut d =
            MedicationDraft::new_at(Utc.with_ymd_and_hms(2025, 2, 3, 0, 0, 0).unwrap());
        d.name = "Ibuprofen".to_string();
        d.form = Some(MedicationForm::Tablet);
        d.strength = "500".to_string();
        d.unit = Some(DoseUnit::Mg);
        d.dosage = "1".to_string();
        d
    }

    #[test]
    fn test_daily_two_times_scenario() {
        let mut draft = ibuprofen_draft();
        draft.set_frequency(FrequencyKind::Daily);
        draft.set_num_times(2);
        draft.set_time(0, Utc.with_ymd_and_hms(2025, 2, 3, 8, 0, 0).unwrap());
        draft.set_time(1, Utc.with_ymd_and_hms(2025, 2, 3, 20, 0, 0).unwrap());

        let payload = MedicationPayload::from_draft(&draft);
        assert_eq!(payload.medicine_name, "Ibuprofen");
        assert_eq!(payload.forms, "tablet");
        assert_eq!(payload.unit, "mg");
        assert_eq!(payload.times.len(), 2);
        assert_eq!(payload.times[0].dose, "1");
        assert_eq!(
            payload.times[0].reception_time,
            Utc.with_ymd_and_hms(2025, 2, 3, 8, 0, 0).unwrap()
        );
        assert_eq!(
            payload.times[1].reception_time,
            Utc.with_ymd_and_hms(2025, 2, 3, 20, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_as_needed_always_empties_times() {
        let mut draft = ibuprofen_draft();
        draft.set_frequency(FrequencyKind::Daily);
        draft.set_num_times(3);
        // Switching back discards the dose-time plumbing on the wire
        draft.frequency = FrequencyKind::AsNeeded;

        let payload = MedicationPayload::from_draft(&draft);
        assert!(payload.times.is_empty());
        assert_eq!(payload.frequency.kind, FrequencyKind::AsNeeded);
    }

    #[test]
    fn test_specific_days_included_only_for_that_kind() {
        let mut draft = ibuprofen_draft();
        draft.set_frequency(FrequencyKind::OnSpecificDays);
        draft.toggle_day(DayOfWeek::Monday);
        draft.toggle_day(DayOfWeek::Thursday);

        let payload = MedicationPayload::from_draft(&draft);
        assert_eq!(
            payload.frequency.specific_days,
            vec![DayOfWeek::Monday, DayOfWeek::Thursday]
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json["frequency"]["specificDays"],
            serde_json::json!(["Monday", "Thursday"])
        );

        draft.set_frequency(FrequencyKind::Daily);
        let payload = MedicationPayload::from_draft(&draft);
        assert!(payload.frequency.specific_days.is_empty());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["frequency"].get("specificDays").is_none());
    }

    #[test]
    fn test_wire_field_names() {
        let draft = ibuprofen_draft();
        let json = serde_json::to_value(MedicationPayload::from_draft(&draft)).unwrap();

        assert!(json.get("medicine_name").is_some());
        assert!(json.get("forms").is_some());
        assert_eq!(json["forWhom"], "myself");
        assert!(json.get("relative_id").is_some());
        assert!(json.get("start_date").is_some());
        assert_eq!(json["frequency"]["type"], "As Needed");
    }

    #[test]
    fn test_missing_times_fall_back_to_start_date() {
        let mut draft = ibuprofen_draft();
        draft.set_frequency(FrequencyKind::Daily);
        draft.num_times = 2; // bypass set_num_times, leave times short

        let payload = MedicationPayload::from_draft(&draft);
        assert_eq!(payload.times.len(), 2);
        assert_eq!(payload.times[1].reception_time, draft.start_date);
    }
}
