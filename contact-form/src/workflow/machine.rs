use log::{debug, info, warn};
use uuid::Uuid;

use super::{Effect, Event, Notice, Stage, SubmitControl};
use crate::error::{SubmissionError, ValidationFailure};
use crate::field::{FieldId, FieldState, FieldValue, FormSpec};
use crate::messages::Messages;
use crate::record::{Receipt, SubmissionRecord};
use crate::validation::{FieldError, ValidationResult, validate};

/// State of one form instance.
///
/// Construct one per form at page initialization and route every event for
/// that form through [`handle`](Self::handle).
#[derive(Debug, Clone)]
pub struct Workflow {
    form_id: String,
    fields: Vec<FieldState>,
    consent_id: FieldId,
    consent: bool,
    consent_error: bool,
    stage: Stage,
    messages: Messages,
}

impl Workflow {
    pub fn new(spec: FormSpec, messages: Messages) -> Self {
        Self {
            form_id: spec.id,
            fields: spec.fields.into_iter().map(FieldState::new).collect(),
            consent_id: spec.consent,
            consent: false,
            consent_error: false,
            stage: Stage::Idle,
            messages,
        }
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.id().as_str() == id)
    }

    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.field(id).map(FieldState::value)
    }

    pub fn consent_id(&self) -> &FieldId {
        &self.consent_id
    }

    pub fn consent(&self) -> bool {
        self.consent
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.stage, Stage::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.stage, Stage::Submitting(_))
    }

    /// The record awaiting confirmation or in flight.
    pub fn pending_record(&self) -> Option<&SubmissionRecord> {
        self.stage.record()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Apply one event and return the effects the host must carry out, in order.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::Input { field, value } => self.on_input(&field, value, &mut effects),
            Event::Blur { field } => self.on_blur(&field, &mut effects),
            Event::Consent(checked) => self.on_consent(checked, &mut effects),
            Event::Submit => self.on_submit(&mut effects),
            Event::Confirm => self.on_confirm(&mut effects),
            Event::Cancel => self.on_cancel(&mut effects),
            Event::Settled {
                submission,
                outcome,
            } => self.on_settled(submission, outcome, &mut effects),
        }
        effects
    }

    fn on_input(&mut self, field: &FieldId, value: FieldValue, effects: &mut Vec<Effect>) {
        let Some(index) = self.index_of(field) else {
            warn!("{}: input for unknown field '{}'", self.form_id, field);
            return;
        };

        self.fields[index].set_value(value);

        // Untouched fields are not flagged while typing; only a field that is
        // already showing an error is re-checked.
        if self.fields[index].is_marked_invalid() {
            self.validate_field(index, effects);
        }
    }

    fn on_blur(&mut self, field: &FieldId, effects: &mut Vec<Effect>) {
        match self.index_of(field) {
            Some(index) => {
                self.validate_field(index, effects);
            }
            None if *field == self.consent_id => {}
            None => warn!("{}: blur for unknown field '{}'", self.form_id, field),
        }
    }

    fn on_consent(&mut self, checked: bool, effects: &mut Vec<Effect>) {
        self.consent = checked;
        if checked && self.consent_error {
            self.consent_error = false;
            effects.push(Effect::ClearError {
                field: self.consent_id.clone(),
            });
        }
    }

    fn on_submit(&mut self, effects: &mut Vec<Effect>) {
        match &self.stage {
            Stage::Idle => {}
            Stage::Submitting(record) => {
                debug!(
                    "{}: submission {} in flight, ignoring submit",
                    self.form_id, record.id
                );
                return;
            }
            other => {
                debug!("{}: ignoring submit while {}", self.form_id, other);
                return;
            }
        }

        self.enter(Stage::Validating);
        let result = self.validate_all(effects);
        if let Some(first) = result.first_error() {
            debug!(
                "{}: submit rejected, {} failing control(s), first '{}': {}",
                self.form_id,
                result.errors().len(),
                first.field,
                first.failure
            );
            self.enter(Stage::Idle);
            return;
        }

        self.await_confirmation(self.capture(), effects);
    }

    fn on_confirm(&mut self, effects: &mut Vec<Effect>) {
        let confirmed = match &self.stage {
            Stage::AwaitingConfirmation(record) => record.clone(),
            other => {
                debug!("{}: ignoring confirm while {}", self.form_id, other);
                return;
            }
        };

        // Values may have changed behind the confirmation; check again before
        // anything leaves the form.
        self.enter(Stage::Validating);
        let result = self.validate_all(effects);
        if let Some(first) = result.first_error() {
            warn!(
                "{}: confirmation no longer valid, {} failing control(s), first '{}': {}",
                self.form_id,
                result.errors().len(),
                first.field,
                first.failure
            );
            effects.push(Effect::HideConfirmation);
            effects.push(Effect::SubmitControl(SubmitControl::resting(&self.messages)));
            self.enter(Stage::Idle);
            return;
        }

        // Only the values the user saw in the summary may be sent.
        let current = self.capture();
        if !current.same_contents(&confirmed) {
            debug!(
                "{}: values changed since {} was shown, asking again",
                self.form_id, confirmed.id
            );
            self.await_confirmation(current, effects);
            return;
        }

        info!("{}: dispatching submission {}", self.form_id, confirmed.id);
        effects.push(Effect::HideConfirmation);
        effects.push(Effect::SubmitControl(SubmitControl::busy(&self.messages)));
        effects.push(Effect::Dispatch(confirmed.clone()));
        self.enter(Stage::Submitting(confirmed));
    }

    fn on_cancel(&mut self, effects: &mut Vec<Effect>) {
        if !matches!(self.stage, Stage::AwaitingConfirmation(_)) {
            debug!("{}: ignoring cancel while {}", self.form_id, self.stage);
            return;
        }

        effects.push(Effect::HideConfirmation);
        effects.push(Effect::SubmitControl(SubmitControl::resting(&self.messages)));
        self.enter(Stage::Idle);
    }

    fn on_settled(
        &mut self,
        submission: Uuid,
        outcome: Result<Receipt, SubmissionError>,
        effects: &mut Vec<Effect>,
    ) {
        let in_flight = match &self.stage {
            Stage::Submitting(record) => record.id,
            other => {
                warn!(
                    "{}: completion for {} arrived while {}",
                    self.form_id, submission, other
                );
                return;
            }
        };

        let receipt_id = outcome.as_ref().ok().map(|r| r.submission_id);
        if submission != in_flight || receipt_id.is_some_and(|id| id != in_flight) {
            warn!(
                "{}: ignoring completion for {}, {} is in flight",
                self.form_id, submission, in_flight
            );
            return;
        }

        match outcome {
            Ok(receipt) => {
                info!(
                    "{}: submission {} accepted",
                    self.form_id, receipt.submission_id
                );
                self.enter(Stage::Success);
                effects.push(Effect::Notice(Notice::success(&self.messages.success)));
                effects.push(Effect::SubmitControl(SubmitControl::resting(&self.messages)));
                self.reset(effects);
                self.enter(Stage::Idle);
            }
            Err(error) => {
                warn!("{}: submission failed: {}", self.form_id, error);
                self.enter(Stage::Idle);
                effects.push(Effect::SubmitControl(SubmitControl::resting(&self.messages)));
                effects.push(Effect::Notice(Notice::error(&self.messages.failure)));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn enter(&mut self, next: Stage) {
        debug!("{}: {} -> {}", self.form_id, self.stage, next);
        self.stage = next;
    }

    fn index_of(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id() == id)
    }

    /// Validate one field, store the verdict and emit the matching effect.
    fn validate_field(&mut self, index: usize, effects: &mut Vec<Effect>) -> Option<FieldError> {
        let field = &mut self.fields[index];
        let verdict = validate(field.spec(), field.value(), &self.messages);
        let id = field.id().clone();

        let error = verdict.failure().map(|failure| FieldError {
            field: id.clone(),
            failure,
            message: verdict.message().to_string(),
        });

        effects.push(match &error {
            Some(error) => Effect::ShowError {
                field: id,
                message: error.message.clone(),
            },
            None => Effect::ClearError { field: id },
        });
        field.set_verdict(verdict);
        error
    }

    /// The full pass run on submit and again on confirm.
    fn validate_all(&mut self, effects: &mut Vec<Effect>) -> ValidationResult {
        let mut errors: Vec<FieldError> = (0..self.fields.len())
            .filter_map(|index| self.validate_field(index, effects))
            .collect();

        if self.consent {
            self.consent_error = false;
            effects.push(Effect::ClearError {
                field: self.consent_id.clone(),
            });
        } else {
            let message = self
                .messages
                .for_failure(ValidationFailure::ConsentNotGiven)
                .to_string();
            self.consent_error = true;
            effects.push(Effect::ShowError {
                field: self.consent_id.clone(),
                message: message.clone(),
            });
            errors.push(FieldError {
                field: self.consent_id.clone(),
                failure: ValidationFailure::ConsentNotGiven,
                message,
            });
        }

        ValidationResult::from_errors(errors)
    }

    /// Show the summary for `record` and hold the submit control until the
    /// user confirms or cancels.
    fn await_confirmation(&mut self, record: SubmissionRecord, effects: &mut Vec<Effect>) {
        effects.push(Effect::ShowConfirmation {
            summary: self.messages.confirmation_summary(&record),
        });
        effects.push(Effect::SubmitControl(SubmitControl::locked(&self.messages)));
        self.enter(Stage::AwaitingConfirmation(record));
    }

    fn capture(&self) -> SubmissionRecord {
        SubmissionRecord::capture(&self.form_id, &self.fields, self.consent)
    }

    /// Clear every value and every visible error.
    fn reset(&mut self, effects: &mut Vec<Effect>) {
        effects.push(Effect::ClearValues);
        for field in &mut self.fields {
            field.reset();
            effects.push(Effect::ClearError {
                field: field.id().clone(),
            });
        }
        self.consent = false;
        self.consent_error = false;
        effects.push(Effect::ClearError {
            field: self.consent_id.clone(),
        });
    }
}
