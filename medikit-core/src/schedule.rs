//! Schedule model shared by form drafts, wire payloads, and fetched plans.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// How often a medication is taken.
///
/// Wire labels match the backend exactly, including the embedded spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum FrequencyKind {
    /// No fixed schedule, taken as required.
    #[serde(rename = "As Needed")]
    AsNeeded,
    /// Taken every day at fixed times.
    #[serde(rename = "Daily")]
    Daily,
    /// Taken on a chosen subset of weekdays.
    #[serde(rename = "On specific days")]
    OnSpecificDays,
}

impl FrequencyKind {
    /// Whether this kind carries per-day dose times.
    ///
    /// `AsNeeded` plans have an empty dose list; the other kinds require one.
    pub fn has_dose_times(&self) -> bool {
        matches!(self, FrequencyKind::Daily | FrequencyKind::OnSpecificDays)
    }
}

/// Day of the week, serialized as the full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All seven days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Three-letter label for compact display.
    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Mon",
            DayOfWeek::Tuesday => "Tue",
            DayOfWeek::Wednesday => "Wed",
            DayOfWeek::Thursday => "Thu",
            DayOfWeek::Friday => "Fri",
            DayOfWeek::Saturday => "Sat",
            DayOfWeek::Sunday => "Sun",
        }
    }
}

/// Frequency section of a medication record.
///
/// `specificDays` appears on the wire only when days were actually selected,
/// which step validation guarantees for `OnSpecificDays` submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Frequency {
    /// Schedule kind
    #[serde(rename = "type")]
    pub kind: FrequencyKind,
    /// Selected weekdays, only meaningful for `OnSpecificDays`
    #[serde(
        rename = "specificDays",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub specific_days: Vec<DayOfWeek>,
}

impl Frequency {
    /// An as-needed schedule.
    pub fn as_needed() -> Self {
        Self {
            kind: FrequencyKind::AsNeeded,
            specific_days: Vec::new(),
        }
    }

    /// A daily schedule.
    pub fn daily() -> Self {
        Self {
            kind: FrequencyKind::Daily,
            specific_days: Vec::new(),
        }
    }

    /// A schedule on the given weekdays.
    pub fn on_days(days: impl IntoIterator<Item = DayOfWeek>) -> Self {
        Self {
            kind: FrequencyKind::OnSpecificDays,
            specific_days: days.into_iter().collect(),
        }
    }
}
