use std::fmt;

use crate::record::SubmissionRecord;

/// Where the submission process stands.
///
/// `Validating` and `Success` are passed through inside a single call to
/// [`Workflow::handle`](super::Workflow::handle); between events the stage is
/// always `Idle`, `AwaitingConfirmation` or `Submitting`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    Validating,
    /// Every check passed; the record is waiting for the user to confirm.
    AwaitingConfirmation(SubmissionRecord),
    /// The record has been handed to the backend.
    Submitting(SubmissionRecord),
    Success,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::AwaitingConfirmation(_) => "awaiting-confirmation",
            Self::Submitting(_) => "submitting",
            Self::Success => "success",
        }
    }

    /// The record held by this stage, if any.
    pub fn record(&self) -> Option<&SubmissionRecord> {
        match self {
            Self::AwaitingConfirmation(record) | Self::Submitting(record) => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
