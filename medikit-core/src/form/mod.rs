//! Multi-step form core: draft record, validation, wizard state machine,
//! and wire payload shaping.

pub mod draft;
pub mod payload;
pub mod validate;
pub mod wizard;

pub use draft::{DoseUnit, MedicationDraft, MedicationForm, Recipient};
pub use payload::{DosePayload, MedicationPayload};
pub use validate::{is_valid, validate, ValidationError};
pub use wizard::{advance, retreat, MedicationWizard, WizardStep};
