use uuid::Uuid;

use crate::error::SubmissionError;
use crate::field::{FieldId, FieldValue};
use crate::record::Receipt;

/// Something that happened to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A control's value changed.
    Input { field: FieldId, value: FieldValue },
    /// A control lost focus.
    Blur { field: FieldId },
    /// The consent control was ticked or unticked.
    Consent(bool),
    /// The user attempted to submit.
    Submit,
    /// The user accepted the confirmation summary.
    Confirm,
    /// The user dismissed the confirmation summary.
    Cancel,
    /// A dispatched submission completed.
    ///
    /// Only the controller that dispatched the record sends this; a
    /// completion for any record other than the one in flight is ignored.
    Settled {
        submission: Uuid,
        outcome: Result<Receipt, SubmissionError>,
    },
}

impl Event {
    pub fn input(field: impl Into<FieldId>, value: impl Into<FieldValue>) -> Self {
        Self::Input {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn settled(submission: Uuid, outcome: Result<Receipt, SubmissionError>) -> Self {
        Self::Settled {
            submission,
            outcome,
        }
    }

    pub fn blur(field: impl Into<FieldId>) -> Self {
        Self::Blur {
            field: field.into(),
        }
    }
}
