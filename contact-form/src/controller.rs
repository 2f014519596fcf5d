//! Drives a [`Workflow`] against a view and a backend.
//!
//! The controller is the only place where effects leave the pure state
//! machine: presentation effects go to the view, `Dispatch` starts the one
//! submission a form may have in flight. Completion comes back as an
//! [`Event::Settled`] tagged with the record id; the controller is the only
//! source of those events and refuses them from callers.
//!
//! # Example
//!
//! ```no_run
//! use contact_form::prelude::*;
//!
//! # async fn run() {
//! let config = FormConfig::default();
//! let backend = SimulatedBackend::new(config.submission_delay);
//! let mut form = Controller::new(FormSpec::contact(), config, PageView::default(), backend);
//!
//! form.input("name", "Aki Tanaka");
//! form.input("email", "aki@example.com");
//! form.input("message", "Hello");
//! form.set_consent(true);
//! form.submit();
//! form.confirm();
//! form.settle().await;
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use uuid::Uuid;

use crate::backend::SubmissionBackend;
use crate::config::FormConfig;
use crate::error::SubmissionError;
use crate::field::{FieldId, FieldValue, FormSpec};
use crate::record::{Receipt, SubmissionRecord};
use crate::view::FormView;
use crate::workflow::{Effect, Event, SubmitControl, Workflow};

type Outcome = Result<Receipt, SubmissionError>;

/// One form instance: workflow, view, backend and the pending submission.
///
/// Must be used from within a tokio runtime, since confirming a submission
/// spawns the backend call.
pub struct Controller<V: FormView> {
    workflow: Workflow,
    view: V,
    backend: Arc<dyn SubmissionBackend>,
    timeout: Duration,
    pending: Option<Pending>,
}

/// The spawned backend call for one dispatched record.
struct Pending {
    submission: Uuid,
    handle: JoinHandle<Outcome>,
}

impl<V: FormView> Controller<V> {
    /// Mount a form. The view's submit control is set to its resting state.
    pub fn new(
        spec: FormSpec,
        config: FormConfig,
        mut view: V,
        backend: impl SubmissionBackend + 'static,
    ) -> Self {
        view.set_submit_control(&SubmitControl::resting(&config.messages));
        Self {
            workflow: Workflow::new(spec, config.messages),
            view,
            backend: Arc::new(backend),
            timeout: config.submission_timeout,
            pending: None,
        }
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed one event through the workflow and apply its effects.
    ///
    /// Completions are produced by the controller itself, so an
    /// [`Event::Settled`] passed in here is dropped.
    pub fn handle(&mut self, event: Event) {
        if let Event::Settled { submission, .. } = &event {
            warn!(
                "{}: refusing completion for {} from outside the controller",
                self.workflow.form_id(),
                submission
            );
            return;
        }
        self.process(event);
    }

    fn process(&mut self, event: Event) {
        for effect in self.workflow.handle(event) {
            match effect {
                Effect::Dispatch(record) => self.dispatch(record),
                other => self.view.apply(&other),
            }
        }
    }

    pub fn input(&mut self, field: impl Into<FieldId>, value: impl Into<FieldValue>) {
        self.handle(Event::input(field, value));
    }

    pub fn blur(&mut self, field: impl Into<FieldId>) {
        self.handle(Event::blur(field));
    }

    pub fn set_consent(&mut self, checked: bool) {
        self.handle(Event::Consent(checked));
    }

    pub fn submit(&mut self) {
        self.handle(Event::Submit);
    }

    pub fn confirm(&mut self) {
        self.handle(Event::Confirm);
    }

    pub fn cancel(&mut self) {
        self.handle(Event::Cancel);
    }

    /// Wait for the in-flight submission, if any, and apply its completion.
    pub async fn settle(&mut self) -> Option<Outcome> {
        let Pending { submission, handle } = self.pending.take()?;
        let outcome = flatten(handle.await);
        self.process(Event::settled(submission, outcome.clone()));
        Some(outcome)
    }

    /// Process events from `events` until the sender side closes.
    ///
    /// Completion of an in-flight submission is interleaved with user events.
    /// Once the channel closes, any pending submission is settled before the
    /// controller is handed back.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>) -> Self {
        loop {
            let next = match self.pending.as_mut() {
                Some(pending) => {
                    let submission = pending.submission;
                    tokio::select! {
                        joined = &mut pending.handle => Next::Settled(submission, flatten(joined)),
                        event = events.recv() => Next::Event(event),
                    }
                }
                None => Next::Event(events.recv().await),
            };

            match next {
                Next::Event(Some(event)) => self.handle(event),
                Next::Event(None) => break,
                Next::Settled(submission, outcome) => {
                    self.pending = None;
                    self.process(Event::settled(submission, outcome));
                }
            }
        }

        debug!("{}: event channel closed", self.workflow.form_id());
        self.settle().await;
        self
    }

    fn dispatch(&mut self, record: SubmissionRecord) {
        // The workflow only dispatches from AWAITING_CONFIRMATION, so a
        // leftover task belongs to a record it no longer tracks.
        if let Some(stale) = self.pending.take() {
            warn!(
                "{}: abandoning stale submission {} for {}",
                self.workflow.form_id(),
                stale.submission,
                record.id
            );
            stale.handle.abort();
        }

        let submission = record.id;
        let backend = Arc::clone(&self.backend);
        let limit = self.timeout;
        let handle = tokio::spawn(async move {
            match tokio::time::timeout(limit, backend.submit(&record)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(SubmissionError::TimedOut(limit)),
            }
        });
        self.pending = Some(Pending { submission, handle });
    }
}

impl<V: FormView> Drop for Controller<V> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}

enum Next {
    Event(Option<Event>),
    Settled(Uuid, Outcome),
}

fn flatten(joined: Result<Outcome, JoinError>) -> Outcome {
    joined.unwrap_or_else(|e| Err(SubmissionError::Transport(e.to_string())))
}
