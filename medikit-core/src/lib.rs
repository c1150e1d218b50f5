//! Medikit Core - domain model for the Medikit health client
//!
//! Pure, IO-free building blocks shared by every Medikit frontend:
//! - Server-owned entities (users, connections, medication plans)
//! - The schedule model with its exact wire labels
//! - The add-medication draft record and wizard state machine
//! - Wire payload shaping for submission
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            MedicationWizard              │
//! │  (tagged-union steps, gated advance)     │
//! └───────┬───────────────────┬──────────────┘
//!         │ validates         │ shapes
//!         ▼                   ▼
//! ┌───────────────┐   ┌──────────────────┐
//! │ MedicationDraft│  │ MedicationPayload│
//! │ (form state)  │   │ (wire DTO)       │
//! └───────────────┘   └──────────────────┘
//! ```
//!
//! The async client in `medikit-client` layers entity stores and the HTTP
//! gateway on top of these types.

pub mod entity;
pub mod form;
pub mod schedule;

// Re-export main types for convenience
pub use entity::{Connection, ConnectionStatus, Dose, Entity, MedicationPlan, User};
pub use form::{
    DosePayload, DoseUnit, MedicationDraft, MedicationForm, MedicationPayload, MedicationWizard,
    Recipient, ValidationError, WizardStep,
};
pub use schedule::{DayOfWeek, Frequency, FrequencyKind};
