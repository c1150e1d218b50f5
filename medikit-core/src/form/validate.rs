//! Per-step validation predicates over the shared draft.
//!
//! Validation is pure and re-evaluated on every call; nothing is cached.
//! A `ValidationError` never leaves the form layer and is never sent to
//! the server.

use crate::form::draft::{MedicationDraft, Recipient};
use crate::form::wizard::WizardStep;
use crate::schedule::FrequencyKind;

/// Why a step refused to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Details step: no medication name entered
    #[error("Medication name is required")]
    MissingName,

    /// Details step: relative selected but no family member chosen
    #[error("Select a family member for this medication")]
    MissingRelative,

    /// Dosing step: no form chosen
    #[error("Medication form is required")]
    MissingForm,

    /// Dosing step: no strength entered
    #[error("Strength is required")]
    MissingStrength,

    /// Dosing step: no unit chosen
    #[error("Unit is required")]
    MissingUnit,

    /// Dosing step: no dose amount entered
    #[error("Dosage is required")]
    MissingDosage,

    /// Schedule step: fewer times entered than doses per day
    #[error("Set a time for each dose")]
    MissingDoseTimes,

    /// Schedule step: on-specific-days schedule with no days selected
    #[error("Select at least one day")]
    MissingDays,
}

/// Validate the draft for one step.
///
/// `Submitted` always validates; the terminal submit is gated by the
/// `Schedule` predicate through the final `advance`.
pub fn validate(step: WizardStep, draft: &MedicationDraft) -> Result<(), ValidationError> {
    match step {
        WizardStep::Details => validate_details(draft),
        WizardStep::Dosing => validate_dosing(draft),
        WizardStep::Schedule => validate_schedule(draft),
        WizardStep::Submitted => Ok(()),
    }
}

/// Whether the draft passes the given step's predicate.
pub fn is_valid(step: WizardStep, draft: &MedicationDraft) -> bool {
    validate(step, draft).is_ok()
}

fn validate_details(draft: &MedicationDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if draft.recipient == Recipient::Relative && draft.relative_id.is_none() {
        return Err(ValidationError::MissingRelative);
    }
    Ok(())
}

fn validate_dosing(draft: &MedicationDraft) -> Result<(), ValidationError> {
    if draft.form.is_none() {
        return Err(ValidationError::MissingForm);
    }
    if draft.strength.trim().is_empty() {
        return Err(ValidationError::MissingStrength);
    }
    if draft.unit.is_none() {
        return Err(ValidationError::MissingUnit);
    }
    if draft.dosage.trim().is_empty() {
        return Err(ValidationError::MissingDosage);
    }
    Ok(())
}

fn validate_schedule(draft: &MedicationDraft) -> Result<(), ValidationError> {
    match draft.frequency {
        // Start date is typed and always present, so nothing can be missing.
        FrequencyKind::AsNeeded => Ok(()),
        FrequencyKind::Daily => validate_dose_times(draft),
        FrequencyKind::OnSpecificDays => {
            if draft.specific_days.is_empty() {
                return Err(ValidationError::MissingDays);
            }
            validate_dose_times(draft)
        }
    }
}

fn validate_dose_times(draft: &MedicationDraft) -> Result<(), ValidationError> {
    if draft.num_times == 0 || draft.times.len() < draft.num_times {
        return Err(ValidationError::MissingDoseTimes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::draft::{DoseUnit, MedicationForm};
    use chrono::{TimeZone, Utc};

    fn draft() -> MedicationDraft {
        MedicationDraft::new_at(Utc.with_ymd_and_hms(2025, 2, 3, 8, 0, 0).unwrap())
    }

    #[test]
    fn test_details_requires_name() {
        let mut d = draft();
        assert_eq!(
            validate(WizardStep::Details, &d),
            Err(ValidationError::MissingName)
        );
        d.name = "Ibuprofen".to_string();
        assert!(validate(WizardStep::Details, &d).is_ok());
    }

    #[test]
    fn test_details_relative_requires_id() {
        let mut d = draft();
        d.name = "Ibuprofen".to_string();
        d.recipient = Recipient::Relative;
        assert_eq!(
            validate(WizardStep::Details, &d),
            Err(ValidationError::MissingRelative)
        );
        d.relative_id = Some("u-9".to_string());
        assert!(validate(WizardStep::Details, &d).is_ok());
    }

    #[test]
    fn test_dosing_requires_all_fields() {
        let mut d = draft();
        assert_eq!(
            validate(WizardStep::Dosing, &d),
            Err(ValidationError::MissingForm)
        );
        d.form = Some(MedicationForm::Tablet);
        assert_eq!(
            validate(WizardStep::Dosing, &d),
            Err(ValidationError::MissingStrength)
        );
        d.strength = "500".to_string();
        assert_eq!(
            validate(WizardStep::Dosing, &d),
            Err(ValidationError::MissingUnit)
        );
        d.unit = Some(DoseUnit::Mg);
        assert!(validate(WizardStep::Dosing, &d).is_ok());

        d.dosage.clear();
        assert_eq!(
            validate(WizardStep::Dosing, &d),
            Err(ValidationError::MissingDosage)
        );
    }

    #[test]
    fn test_as_needed_schedule_always_valid() {
        let d = draft();
        assert!(validate(WizardStep::Schedule, &d).is_ok());
    }

    #[test]
    fn test_specific_days_requires_selection() {
        let mut d = draft();
        d.set_frequency(crate::schedule::FrequencyKind::OnSpecificDays);
        assert_eq!(
            validate(WizardStep::Schedule, &d),
            Err(ValidationError::MissingDays)
        );
        d.toggle_day(crate::schedule::DayOfWeek::Monday);
        assert!(validate(WizardStep::Schedule, &d).is_ok());
    }

    #[test]
    fn test_daily_requires_enough_times() {
        let mut d = draft();
        d.set_frequency(crate::schedule::FrequencyKind::Daily);
        assert!(validate(WizardStep::Schedule, &d).is_ok());

        d.num_times = 3;
        assert_eq!(
            validate(WizardStep::Schedule, &d),
            Err(ValidationError::MissingDoseTimes)
        );
    }
}
