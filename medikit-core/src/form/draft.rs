//! The shared form-state record behind the add-medication wizard.
//!
//! One draft lives for the duration of a wizard run. Every step reads and
//! writes the same record; navigating backward never clears what a later
//! step already entered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::{DayOfWeek, FrequencyKind};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Physical form of a medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum MedicationForm {
    Tablet,
    Capsule,
    Liquid,
    Injection,
    Inhaler,
    Topical,
    Drops,
    Suppository,
    Patch,
}

impl MedicationForm {
    /// All selectable forms, in display order.
    pub const ALL: [MedicationForm; 9] = [
        MedicationForm::Tablet,
        MedicationForm::Capsule,
        MedicationForm::Liquid,
        MedicationForm::Injection,
        MedicationForm::Inhaler,
        MedicationForm::Topical,
        MedicationForm::Drops,
        MedicationForm::Suppository,
        MedicationForm::Patch,
    ];

    /// Lowercase wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicationForm::Tablet => "tablet",
            MedicationForm::Capsule => "capsule",
            MedicationForm::Liquid => "liquid",
            MedicationForm::Injection => "injection",
            MedicationForm::Inhaler => "inhaler",
            MedicationForm::Topical => "topical",
            MedicationForm::Drops => "drops",
            MedicationForm::Suppository => "suppository",
            MedicationForm::Patch => "patch",
        }
    }
}

/// Strength unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum DoseUnit {
    #[serde(rename = "mg")]
    Mg,
    #[serde(rename = "mcg")]
    Mcg,
    #[serde(rename = "g")]
    G,
    #[serde(rename = "ml")]
    Ml,
    #[serde(rename = "%")]
    Percent,
}

impl DoseUnit {
    /// All selectable units, in display order.
    pub const ALL: [DoseUnit; 5] = [
        DoseUnit::Mg,
        DoseUnit::Mcg,
        DoseUnit::G,
        DoseUnit::Ml,
        DoseUnit::Percent,
    ];

    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DoseUnit::Mg => "mg",
            DoseUnit::Mcg => "mcg",
            DoseUnit::G => "g",
            DoseUnit::Ml => "ml",
            DoseUnit::Percent => "%",
        }
    }
}

/// Who the medication is for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Recipient {
    /// The signed-in account
    #[default]
    Myself,
    /// A connected family member, identified by `relative_id`
    Relative,
}

/// Mutable form state accumulated across the wizard steps.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationDraft {
    /// Medication name (Details step)
    pub name: String,
    /// Who this plan is for (Details step)
    pub recipient: Recipient,
    /// Connected account id when `recipient` is `Relative`
    pub relative_id: Option<String>,
    /// Free-form notes (Details step)
    pub notes: String,
    /// Physical form (Dosing step)
    pub form: Option<MedicationForm>,
    /// Strength as numeric text (Dosing step)
    pub strength: String,
    /// Strength unit (Dosing step)
    pub unit: Option<DoseUnit>,
    /// Dose amount as numeric text (Dosing step)
    pub dosage: String,
    /// First day of the plan (Schedule step)
    pub start_date: DateTime<Utc>,
    /// Schedule kind (Schedule step)
    pub frequency: FrequencyKind,
    /// Selected weekdays, used only with `OnSpecificDays`
    pub specific_days: Vec<DayOfWeek>,
    /// Doses per day
    pub num_times: usize,
    /// Clock time of each dose; at least `num_times` entries once valid
    pub times: Vec<DateTime<Utc>>,
}

impl MedicationDraft {
    /// A fresh draft anchored at the given reference time.
    ///
    /// The reference time seeds both the start date and the single initial
    /// dose time, which keeps drafts deterministic under test.
    pub fn new_at(reference: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            recipient: Recipient::Myself,
            relative_id: None,
            notes: String::new(),
            form: None,
            strength: String::new(),
            unit: None,
            dosage: "1".to_string(),
            start_date: reference,
            frequency: FrequencyKind::AsNeeded,
            specific_days: Vec::new(),
            num_times: 1,
            times: vec![reference],
        }
    }

    /// Switch the schedule kind.
    ///
    /// Changing kind resets the dose count to 1 and the time list to a
    /// single entry. The selected weekdays survive only a switch to
    /// `OnSpecificDays`; any other target clears them.
    pub fn set_frequency(&mut self, kind: FrequencyKind) {
        self.frequency = kind;
        if kind != FrequencyKind::OnSpecificDays {
            self.specific_days.clear();
        }
        let first = self.times.first().copied().unwrap_or(self.start_date);
        self.num_times = 1;
        self.times = vec![first];
    }

    /// Set how many doses per day, clamped to at least 1.
    ///
    /// Existing times keep their values; new slots are seeded from the last
    /// entered time so the prefix is always preserved.
    pub fn set_num_times(&mut self, n: usize) {
        let n = n.max(1);
        let fill = self.times.last().copied().unwrap_or(self.start_date);
        self.times.truncate(n);
        while self.times.len() < n {
            self.times.push(fill);
        }
        self.num_times = n;
    }

    /// Set the clock time of one dose. Out-of-range indices are ignored.
    pub fn set_time(&mut self, index: usize, time: DateTime<Utc>) {
        if let Some(slot) = self.times.get_mut(index) {
            *slot = time;
        }
    }

    /// Toggle a weekday in the specific-days selection.
    pub fn toggle_day(&mut self, day: DayOfWeek) {
        if let Some(pos) = self.specific_days.iter().position(|d| *d == day) {
            self.specific_days.remove(pos);
        } else {
            self.specific_days.push(day);
        }
    }
}

impl Default for MedicationDraft {
    fn default() -> Self {
        Self::new_at(Utc::now())
    }
}
