//! Tests for the submission state machine, without a view or a backend.

use contact_form::error::{SubmissionError, ValidationFailure};
use contact_form::field::{FieldId, FieldValue, FormSpec};
use contact_form::messages::Messages;
use contact_form::record::{Receipt, SubmissionRecord};
use contact_form::workflow::{Effect, Event, Notice, Stage, SubmitControl, Workflow};
use uuid::Uuid;

fn workflow() -> Workflow {
    Workflow::new(FormSpec::contact(), Messages::default())
}

fn filled() -> Workflow {
    let mut wf = workflow();
    wf.handle(Event::input("name", "Aki Tanaka"));
    wf.handle(Event::input("email", "aki@example.com"));
    wf.handle(Event::input("message", "資料請求をお願いします。"));
    wf.handle(Event::Consent(true));
    wf
}

fn shown_errors(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::ShowError { field, .. } => Some(field.as_str()),
            _ => None,
        })
        .collect()
}

fn dispatched(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::Dispatch(_)))
        .count()
}

fn receipt(wf: &Workflow) -> Receipt {
    Receipt::new(wf.pending_record().expect("record in flight"))
}

fn in_flight(wf: &Workflow) -> Uuid {
    wf.pending_record().expect("record in flight").id
}

// ============================================================================
// Triggering policy
// ============================================================================

#[test]
fn test_input_on_untouched_field_is_not_flagged() {
    let mut wf = workflow();
    let effects = wf.handle(Event::input("email", "not-an"));
    assert!(effects.is_empty());
    assert!(!wf.field("email").unwrap().is_marked_invalid());
}

#[test]
fn test_blur_always_validates() {
    let mut wf = workflow();
    wf.handle(Event::input("email", "not-an-email"));

    let effects = wf.handle(Event::blur("email"));
    assert_eq!(
        effects,
        vec![Effect::ShowError {
            field: FieldId::from("email"),
            message: Messages::default().malformed_email,
        }]
    );

    let effects = wf.handle(Event::blur("phone"));
    assert_eq!(
        effects,
        vec![Effect::ClearError {
            field: FieldId::from("phone")
        }]
    );
}

#[test]
fn test_input_on_invalid_field_gives_live_feedback() {
    let mut wf = workflow();
    wf.handle(Event::blur("email"));
    assert!(wf.field("email").unwrap().is_marked_invalid());

    // still wrong: error switches from missing to malformed
    let effects = wf.handle(Event::input("email", "aki@"));
    assert_eq!(
        effects,
        vec![Effect::ShowError {
            field: FieldId::from("email"),
            message: Messages::default().malformed_email,
        }]
    );

    let effects = wf.handle(Event::input("email", "aki@example.com"));
    assert_eq!(
        effects,
        vec![Effect::ClearError {
            field: FieldId::from("email")
        }]
    );

    // fixed, so further typing is quiet again
    assert!(wf.handle(Event::input("email", "aki@example")).is_empty());
}

#[test]
fn test_unknown_field_events_are_ignored() {
    let mut wf = workflow();
    assert!(wf.handle(Event::input("nope", "x")).is_empty());
    assert!(wf.handle(Event::blur("nope")).is_empty());
    assert!(wf.handle(Event::blur("consent")).is_empty());
    assert!(wf.is_idle());
}

#[test]
fn test_repeated_blur_does_not_accumulate() {
    let mut wf = workflow();
    let first = wf.handle(Event::blur("name"));
    let second = wf.handle(Event::blur("name"));
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

// ============================================================================
// Submit
// ============================================================================

#[test]
fn test_submit_with_empty_form_flags_every_required_control() {
    let mut wf = workflow();
    let effects = wf.handle(Event::Submit);

    assert_eq!(shown_errors(&effects), vec!["name", "email", "message", "consent"]);
    assert!(wf.is_idle());
    assert!(wf.pending_record().is_none());
}

#[test]
fn test_submit_without_consent_is_rejected() {
    let mut wf = filled();
    wf.handle(Event::Consent(false));

    let effects = wf.handle(Event::Submit);

    assert_eq!(shown_errors(&effects), vec!["consent"]);
    assert!(effects.contains(&Effect::ShowError {
        field: FieldId::from("consent"),
        message: Messages::default()
            .for_failure(ValidationFailure::ConsentNotGiven)
            .to_string(),
    }));
    assert!(!effects.iter().any(|e| matches!(e, Effect::ShowConfirmation { .. })));
    assert_eq!(wf.stage(), &Stage::Idle);
}

#[test]
fn test_submit_with_malformed_email_stays_idle() {
    let mut wf = filled();
    wf.handle(Event::input("email", "not-an-email"));

    let effects = wf.handle(Event::Submit);

    assert_eq!(shown_errors(&effects), vec!["email"]);
    assert!(wf.is_idle());
}

#[test]
fn test_valid_submit_awaits_confirmation_with_snapshot() {
    let mut wf = filled();
    let effects = wf.handle(Event::Submit);

    assert!(shown_errors(&effects).is_empty());
    let Stage::AwaitingConfirmation(record) = wf.stage() else {
        panic!("expected confirmation, got {}", wf.stage());
    };

    for field in wf.fields() {
        assert_eq!(record.value(field.id().as_str()), Some(field.value()));
    }
    assert!(record.consent);

    assert!(effects.contains(&Effect::SubmitControl(SubmitControl::locked(
        &Messages::default()
    ))));

    let summary = effects
        .iter()
        .find_map(|e| match e {
            Effect::ShowConfirmation { summary } => Some(summary.clone()),
            _ => None,
        })
        .expect("confirmation shown");
    assert!(summary.contains("Aki Tanaka"));
    assert!(summary.contains("aki@example.com"));
}

#[test]
fn test_submit_while_awaiting_confirmation_is_ignored() {
    let mut wf = filled();
    wf.handle(Event::Submit);
    let record = wf.pending_record().cloned();

    assert!(wf.handle(Event::Submit).is_empty());
    assert_eq!(wf.pending_record().cloned(), record);
}

#[test]
fn test_consent_tick_clears_its_error() {
    let mut wf = filled();
    wf.handle(Event::Consent(false));
    wf.handle(Event::Submit);

    let effects = wf.handle(Event::Consent(true));
    assert_eq!(
        effects,
        vec![Effect::ClearError {
            field: FieldId::from("consent")
        }]
    );

    // no error showing, nothing to clear
    assert!(wf.handle(Event::Consent(true)).is_empty());
    assert!(wf.handle(Event::Consent(false)).is_empty());
}

// ============================================================================
// Confirmation
// ============================================================================

#[test]
fn test_cancel_returns_to_idle_with_values_intact() {
    let mut wf = filled();
    wf.handle(Event::Submit);

    let effects = wf.handle(Event::Cancel);

    assert_eq!(
        effects,
        vec![
            Effect::HideConfirmation,
            Effect::SubmitControl(SubmitControl::resting(&Messages::default())),
        ]
    );
    assert!(wf.is_idle());
    assert!(wf.pending_record().is_none());
    assert_eq!(wf.value("name"), Some(&FieldValue::from("Aki Tanaka")));
    assert!(wf.consent());
}

#[test]
fn test_confirm_dispatches_once_and_disables_submit() {
    let mut wf = filled();
    wf.handle(Event::Submit);

    let effects = wf.handle(Event::Confirm);

    assert!(effects.contains(&Effect::SubmitControl(SubmitControl::busy(
        &Messages::default()
    ))));
    assert_eq!(dispatched(&effects), 1);
    assert!(wf.is_submitting());

    assert!(wf.handle(Event::Submit).is_empty());
    assert!(wf.handle(Event::Confirm).is_empty());
    assert!(wf.handle(Event::Cancel).is_empty());
    assert!(wf.is_submitting());
}

#[test]
fn test_confirm_revalidates_changed_values() {
    let mut wf = filled();
    wf.handle(Event::Submit);
    wf.handle(Event::input("email", "changed"));

    let effects = wf.handle(Event::Confirm);

    assert_eq!(shown_errors(&effects), vec!["email"]);
    assert_eq!(dispatched(&effects), 0);
    assert!(effects.contains(&Effect::HideConfirmation));
    assert!(wf.is_idle());
}

fn dispatched_record(effects: &[Effect]) -> Option<&SubmissionRecord> {
    effects.iter().find_map(|e| match e {
        Effect::Dispatch(record) => Some(record),
        _ => None,
    })
}

#[test]
fn test_confirm_sends_the_confirmed_record() {
    let mut wf = filled();
    wf.handle(Event::Submit);
    let shown = wf.pending_record().cloned().expect("awaiting confirmation");

    let effects = wf.handle(Event::Confirm);

    assert_eq!(dispatched_record(&effects), Some(&shown));
    assert_eq!(in_flight(&wf), shown.id);
}

#[test]
fn test_confirm_after_edit_asks_again() {
    let mut wf = filled();
    wf.handle(Event::Submit);
    let shown = wf.pending_record().cloned().expect("awaiting confirmation");
    wf.handle(Event::input("name", "Tanaka Aki"));

    let effects = wf.handle(Event::Confirm);

    assert_eq!(dispatched(&effects), 0);
    let summary = effects
        .iter()
        .find_map(|e| match e {
            Effect::ShowConfirmation { summary } => Some(summary.as_str()),
            _ => None,
        })
        .expect("summary shown again");
    assert!(summary.contains("Tanaka Aki"));
    assert!(effects.contains(&Effect::SubmitControl(SubmitControl::locked(
        &Messages::default()
    ))));

    let Stage::AwaitingConfirmation(record) = wf.stage() else {
        panic!("expected confirmation, got {}", wf.stage());
    };
    assert_ne!(record.id, shown.id);
    assert_eq!(record.value("name"), Some(&FieldValue::from("Tanaka Aki")));

    // the second confirm sends what the user saw the second time
    let effects = wf.handle(Event::Confirm);
    let sent = dispatched_record(&effects).expect("dispatched");
    assert_eq!(sent.value("name"), Some(&FieldValue::from("Tanaka Aki")));
    assert!(wf.is_submitting());
}

#[test]
fn test_consent_withdrawn_behind_confirmation_is_not_sent() {
    let mut wf = filled();
    wf.handle(Event::Submit);
    wf.handle(Event::Consent(false));

    let effects = wf.handle(Event::Confirm);

    assert_eq!(dispatched(&effects), 0);
    assert_eq!(shown_errors(&effects), vec!["consent"]);
    assert!(wf.is_idle());
}

#[test]
fn test_confirm_and_cancel_outside_confirmation_are_ignored() {
    let mut wf = filled();
    assert!(wf.handle(Event::Confirm).is_empty());
    assert!(wf.handle(Event::Cancel).is_empty());
    assert!(wf.is_idle());
}

// ============================================================================
// Completion
// ============================================================================

#[test]
fn test_success_resets_form() {
    let mut wf = filled();
    wf.handle(Event::Submit);
    wf.handle(Event::Confirm);
    let receipt = receipt(&wf);

    let effects = wf.handle(Event::settled(receipt.submission_id, Ok(receipt)));

    let messages = Messages::default();
    assert_eq!(
        effects
            .iter()
            .filter(|e| matches!(e, Effect::Notice(_)))
            .collect::<Vec<_>>(),
        vec![&Effect::Notice(Notice::success(&messages.success))]
    );
    assert!(effects.contains(&Effect::SubmitControl(SubmitControl::resting(&messages))));
    assert!(effects.contains(&Effect::ClearValues));
    assert!(shown_errors(&effects).is_empty());

    assert!(wf.is_idle());
    assert!(wf.pending_record().is_none());
    assert!(!wf.consent());
    for field in wf.fields() {
        assert!(field.value().is_blank(), "{} not cleared", field.id());
        assert!(field.verdict().is_none());
    }
}

#[test]
fn test_failure_preserves_values() {
    let mut wf = filled();
    wf.handle(Event::Submit);
    wf.handle(Event::Confirm);

    let effects = wf.handle(Event::settled(
        in_flight(&wf),
        Err(SubmissionError::Transport("connection reset".into())),
    ));

    let messages = Messages::default();
    assert_eq!(
        effects,
        vec![
            Effect::SubmitControl(SubmitControl::resting(&messages)),
            Effect::Notice(Notice::error(&messages.failure)),
        ]
    );
    assert!(wf.is_idle());
    assert_eq!(wf.value("email"), Some(&FieldValue::from("aki@example.com")));
    assert!(wf.consent());

    // the user can retry straight away
    wf.handle(Event::Submit);
    assert!(matches!(wf.stage(), Stage::AwaitingConfirmation(_)));
}

#[test]
fn test_stray_completion_is_ignored() {
    let mut wf = filled();
    wf.handle(Event::Submit);
    let receipt = Receipt::new(wf.pending_record().unwrap());

    assert!(
        wf.handle(Event::settled(receipt.submission_id, Ok(receipt)))
            .is_empty()
    );
    assert!(matches!(wf.stage(), Stage::AwaitingConfirmation(_)));
}

#[test]
fn test_completion_for_another_record_is_ignored() {
    let mut wf = filled();
    wf.handle(Event::Submit);
    let earlier = wf.pending_record().cloned().expect("awaiting confirmation");
    wf.handle(Event::Cancel);
    wf.handle(Event::Submit);
    wf.handle(Event::Confirm);
    assert_ne!(in_flight(&wf), earlier.id);

    let late = Receipt::new(&earlier);
    assert!(
        wf.handle(Event::settled(earlier.id, Ok(late.clone())))
            .is_empty()
    );
    assert!(
        wf.handle(Event::settled(
            earlier.id,
            Err(SubmissionError::Transport("late".into()))
        ))
        .is_empty()
    );
    // right id, wrong receipt
    assert!(
        wf.handle(Event::settled(in_flight(&wf), Ok(late)))
            .is_empty()
    );
    assert!(wf.is_submitting());
    assert_eq!(wf.value("name"), Some(&FieldValue::from("Aki Tanaka")));

    let receipt = receipt(&wf);
    let effects = wf.handle(Event::settled(receipt.submission_id, Ok(receipt)));
    assert!(effects.contains(&Effect::ClearValues));
    assert!(wf.is_idle());
}

#[test]
fn test_forms_are_independent() {
    let mut first = filled();
    let mut second = Workflow::new(FormSpec::contact().consent("agree"), Messages::default());

    first.handle(Event::Submit);
    second.handle(Event::Submit);

    assert!(matches!(first.stage(), Stage::AwaitingConfirmation(_)));
    assert!(second.is_idle());
    assert_eq!(second.value("name"), Some(&FieldValue::from("")));
}
