//! Server-owned entities mirrored client-side.
//!
//! Every record is created and identified by the backend; the client never
//! assigns ids. Collections of these types live in the entity stores of
//! `medikit-client` and are replaced wholesale on each refetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::Frequency;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// A record with a stable server-assigned identifier.
///
/// Stores use this to deduplicate snapshots (last write wins).
pub trait Entity {
    /// The server-assigned identifier.
    fn id(&self) -> &str;
}

/// An account on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct User {
    /// Server identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Display name
    pub username: String,
    /// Email, when the server exposes it
    #[serde(default)]
    pub email: Option<String>,
    /// Mobile number, when the server exposes it
    #[serde(default)]
    pub mobile: Option<String>,
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// State of a connection between two accounts.
///
/// Transitions happen only through an explicit accept/reject mutation;
/// there is no automatic expiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Awaiting a decision from the receiver
    #[default]
    Pending,
    /// Receiver accepted the request
    Accepted,
    /// Receiver rejected the request
    Rejected,
}

impl ConnectionStatus {
    /// Wire form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Accepted => "accepted",
            ConnectionStatus::Rejected => "rejected",
        }
    }
}

/// A social connection (family member or caregiver) or a pending request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Connection {
    /// Server identifier of the connection record
    #[serde(rename = "_id")]
    pub id: String,
    /// Identifier of the other account
    #[serde(rename = "userId", default)]
    pub user_id: String,
    /// Display name of the other account
    pub username: String,
    /// Current status
    #[serde(default)]
    pub status: ConnectionStatus,
}

impl Entity for Connection {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A single scheduled dose within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Dose {
    /// Dose amount, numeric text as entered
    pub dose: String,
    /// Scheduled clock time
    pub reception_time: DateTime<Utc>,
    /// Remaining fill count, 0 when the server omits it
    #[serde(default)]
    pub remaining: u32,
}

/// A medication plan as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct MedicationPlan {
    /// Server identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Medication name
    pub medicine_name: String,
    /// Form (tablet, capsule, ...), lowercase wire label
    pub forms: String,
    /// Strength, numeric text
    pub strength: String,
    /// Strength unit
    pub unit: String,
    /// Free-form notes
    #[serde(default)]
    pub description: String,
    /// First day of the plan
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Schedule
    pub frequency: Frequency,
    /// Scheduled doses; empty for as-needed plans
    #[serde(default)]
    pub times: Vec<Dose>,
}

impl Entity for MedicationPlan {
    fn id(&self) -> &str {
        &self.id
    }
}

impl MedicationPlan {
    /// Whether the dose list agrees with the schedule kind.
    ///
    /// Only `Daily` and `OnSpecificDays` plans may carry dose times.
    pub fn schedule_consistent(&self) -> bool {
        self.frequency.kind.has_dose_times() || self.times.is_empty()
    }
}
