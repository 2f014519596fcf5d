use crate::field::FieldId;
use crate::messages::Messages;
use crate::record::SubmissionRecord;

/// Something the host must do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show `message` in the control's inline error slot and mark it as erroneous.
    ShowError { field: FieldId, message: String },
    /// Empty the control's inline error slot and drop its error styling.
    ClearError { field: FieldId },
    /// Present the confirmation summary.
    ShowConfirmation { summary: String },
    HideConfirmation,
    /// Update the submit control.
    SubmitControl(SubmitControl),
    /// Hand the record to the backend. Only the controller acts on this.
    Dispatch(SubmissionRecord),
    Notice(Notice),
    /// Reset every control to its empty value.
    ClearValues,
}

/// Presentation state of the submit control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

impl SubmitControl {
    /// Enabled, with the resting label.
    pub fn resting(messages: &Messages) -> Self {
        Self {
            enabled: true,
            label: messages.submit_label.clone(),
        }
    }

    /// Disabled, with the resting label. Used while the confirmation is open.
    pub fn locked(messages: &Messages) -> Self {
        Self {
            enabled: false,
            label: messages.submit_label.clone(),
        }
    }

    /// Disabled, with the in-progress label.
    pub fn busy(messages: &Messages) -> Self {
        Self {
            enabled: false,
            label: messages.submitting_label.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A form-level notice shown in the result region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}
