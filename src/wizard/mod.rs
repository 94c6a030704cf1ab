//! Multi-step booking wizard, modeled as an explicit state machine so it
//! can sit behind any rendering layer.
//!
//! Four linear steps collect the customer identity, the visit date and
//! slot, the service details, and a final summary. Advancing re-runs the
//! validators for every field the current step owns; submission re-runs
//! all of them before the draft reaches the store.

use crate::domain::appointment::{Appointment, AppointmentDraft};
use crate::errors::StoreError;
use crate::storage::AppointmentStore;
use crate::validation::{self, Field, FieldErrors, ValidationMode};

/// Pages of the booking flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Customer,
    DateTime,
    Details,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Customer,
        WizardStep::DateTime,
        WizardStep::Details,
        WizardStep::Summary,
    ];

    /// Fields the step's gate re-validates before advancing.
    pub fn fields(self) -> &'static [Field] {
        match self {
            WizardStep::Customer => &[
                Field::ClientName,
                Field::Phone,
                Field::Email,
                Field::DocumentType,
                Field::DocumentNumber,
            ],
            WizardStep::DateTime => &[Field::Date, Field::Time],
            WizardStep::Details => &[Field::Service],
            WizardStep::Summary => &[],
        }
    }

    /// One-based position, as shown by the step indicator.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Customer => 1,
            WizardStep::DateTime => 2,
            WizardStep::Details => 3,
            WizardStep::Summary => 4,
        }
    }

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Customer => Some(WizardStep::DateTime),
            WizardStep::DateTime => Some(WizardStep::Details),
            WizardStep::Details => Some(WizardStep::Summary),
            WizardStep::Summary => None,
        }
    }

    fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Customer => None,
            WizardStep::DateTime => Some(WizardStep::Customer),
            WizardStep::Details => Some(WizardStep::DateTime),
            WizardStep::Summary => Some(WizardStep::Details),
        }
    }
}

/// Step transition refused because the current step has invalid fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("completa los campos del paso {}", .step.number())]
pub struct StepBlocked {
    pub step: WizardStep,
    pub errors: FieldErrors,
}

/// Submission outcome when the wizard cannot hand off to the store.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The final gate found invalid fields; the wizard stays on the
    /// summary and the UI shows a generic fix-the-errors notice.
    #[error("corrige los errores del formulario")]
    Invalid(FieldErrors),
    #[error("la confirmación solo está disponible en el resumen")]
    NotAtSummary,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The booking flow's state: current step, the draft being filled, and
/// the per-field messages currently on screen.
#[derive(Debug, Default)]
pub struct BookingWizard {
    step: WizardStep,
    draft: AppointmentDraft,
    errors: FieldErrors,
}

impl BookingWizard {
    /// Starts at the customer step with an empty draft; the status
    /// defaults to `programada`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Replaces one field's value and re-validates it immediately.
    /// Touching either document field re-checks the number, whose rule
    /// depends on the selected type.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::ClientName => self.draft.client_name = value.to_string(),
            Field::Phone => self.draft.phone = value.to_string(),
            Field::Email => self.draft.email = value.to_string(),
            Field::DocumentType => self.draft.document_type = value.to_string(),
            Field::DocumentNumber => self.draft.document_number = value.to_string(),
            Field::Date => self.draft.date = value.to_string(),
            Field::Time => self.draft.time = value.to_string(),
            Field::Service => self.draft.service = value.to_string(),
        }
        self.revalidate(field);
        if field == Field::DocumentType {
            self.revalidate(Field::DocumentNumber);
        }
    }

    /// Free-text notes carry no validator.
    pub fn set_notes(&mut self, value: &str) {
        self.draft.notes = value.to_string();
    }

    fn revalidate(&mut self, field: Field) {
        match validation::validate_field(field, &self.draft, ValidationMode::Create) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(err) => {
                self.errors.insert(field, err.message);
            }
        }
    }

    /// Whether the current step's gate would let the user through.
    pub fn can_advance(&self) -> bool {
        validation::validate_fields(self.step.fields(), &self.draft, ValidationMode::Create)
            .is_empty()
    }

    /// Re-validates every field the current step owns. On failure the
    /// step does not change and all of the step's messages are surfaced
    /// at once.
    pub fn advance(&mut self) -> Result<WizardStep, StepBlocked> {
        let failures =
            validation::validate_fields(self.step.fields(), &self.draft, ValidationMode::Create);
        if !failures.is_empty() {
            self.errors.extend(failures.clone());
            return Err(StepBlocked {
                step: self.step,
                errors: failures,
            });
        }
        for field in self.step.fields() {
            self.errors.remove(field);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Moves back one step. Never blocked, never leaves the first step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Final gate: re-validates the union of all fields, stores the
    /// appointment, and resets the wizard for the next booking.
    pub fn submit(
        &mut self,
        store: &mut dyn AppointmentStore,
    ) -> Result<Appointment, SubmitError> {
        if self.step != WizardStep::Summary {
            return Err(SubmitError::NotAtSummary);
        }
        match validation::validated_data(&self.draft, ValidationMode::Create) {
            Err(failures) => {
                self.errors = failures.clone();
                Err(SubmitError::Invalid(failures))
            }
            Ok(data) => {
                let stored = store.create(data)?;
                *self = Self::default();
                Ok(stored)
            }
        }
    }
}
