//! Tagged-union state machine for the add-medication wizard.
//!
//! The wizard is a linear sequence of named steps with forward progression
//! gated by per-step validation. The state is an explicit enum rather than
//! a step index, so every transition is an exhaustive match the compiler
//! checks.
//!
//! ```text
//! Details ──next──▶ Dosing ──next──▶ Schedule ──next──▶ Submitted
//!    ▲                │  ▲              │  ▲               │
//!    └──────back──────┘  └─────back─────┘  └──────back─────┘
//! ```
//!
//! `Submitted` means the draft passed every gate; the caller then shapes
//! the wire payload and performs the terminal submit. A failed submit is
//! handled with `back()`, which returns to `Schedule` with the draft
//! untouched.

use crate::form::draft::MedicationDraft;
use crate::form::validate::{validate, ValidationError};

/// One state of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Name, recipient, notes
    Details,
    /// Form, strength, unit, dosage
    Dosing,
    /// Start date, frequency, dose times
    Schedule,
    /// Terminal: all gates passed, submit in flight or done
    Submitted,
}

impl WizardStep {
    /// The entry state of every wizard run.
    pub const FIRST: WizardStep = WizardStep::Details;

    /// Whether this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        *self == WizardStep::Submitted
    }
}

/// Advance one step, gated by the current step's validation predicate.
///
/// Pure: the draft is only read. On a validation failure the caller keeps
/// the current step.
pub fn advance(step: WizardStep, draft: &MedicationDraft) -> Result<WizardStep, ValidationError> {
    validate(step, draft)?;
    Ok(match step {
        WizardStep::Details => WizardStep::Dosing,
        WizardStep::Dosing => WizardStep::Schedule,
        WizardStep::Schedule => WizardStep::Submitted,
        WizardStep::Submitted => WizardStep::Submitted,
    })
}

/// Step backward. Always allowed; the first step stays put.
pub fn retreat(step: WizardStep) -> WizardStep {
    match step {
        WizardStep::Details => WizardStep::Details,
        WizardStep::Dosing => WizardStep::Details,
        WizardStep::Schedule => WizardStep::Dosing,
        WizardStep::Submitted => WizardStep::Schedule,
    }
}

/// A wizard run: current step plus the shared draft.
///
/// `cancel` restores the draft captured at construction, which is the
/// "reset the entire form-state record to its initial value" exit path.
#[derive(Debug, Clone)]
pub struct MedicationWizard {
    step: WizardStep,
    draft: MedicationDraft,
    initial: MedicationDraft,
}

impl MedicationWizard {
    /// Start a run with the given initial draft.
    pub fn new(draft: MedicationDraft) -> Self {
        Self {
            step: WizardStep::FIRST,
            initial: draft.clone(),
            draft,
        }
    }

    /// Current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Read access to the draft.
    pub fn draft(&self) -> &MedicationDraft {
        &self.draft
    }

    /// Mutable access for the step views.
    pub fn draft_mut(&mut self) -> &mut MedicationDraft {
        &mut self.draft
    }

    /// Try to move forward. Leaves the step unchanged on failure.
    pub fn next(&mut self) -> Result<WizardStep, ValidationError> {
        self.step = advance(self.step, &self.draft)?;
        Ok(self.step)
    }

    /// Move backward, preserving everything already entered.
    pub fn back(&mut self) -> WizardStep {
        self.step = retreat(self.step);
        self.step
    }

    /// Abandon the run: reset the draft and return to the first step.
    pub fn cancel(&mut self) {
        self.draft = self.initial.clone();
        self.step = WizardStep::FIRST;
    }

    /// Whether the run reached the terminal state.
    pub fn is_submitted(&self) -> bool {
        self.step.is_terminal()
    }
}

impl Default for MedicationWizard {
    fn default() -> Self {
        Self::new(MedicationDraft::default())
    }
}
