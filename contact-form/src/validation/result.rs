use crate::error::ValidationFailure;
use crate::field::FieldId;

/// Outcome of validating one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Verdict {
    #[default]
    Valid,
    Invalid {
        failure: ValidationFailure,
        /// Localized text shown in the field's inline error slot.
        message: String,
    },
}

impl Verdict {
    pub fn invalid(failure: ValidationFailure, message: impl Into<String>) -> Self {
        Self::Invalid {
            failure,
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure kind, if invalid.
    pub fn failure(&self) -> Option<ValidationFailure> {
        match self {
            Self::Valid => None,
            Self::Invalid { failure, .. } => Some(*failure),
        }
    }

    /// The inline message; empty when valid.
    pub fn message(&self) -> &str {
        match self {
            Self::Valid => "",
            Self::Invalid { message, .. } => message,
        }
    }
}

/// Information about a single failing control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldId,
    pub failure: ValidationFailure,
    pub message: String,
}

/// Result of a full validation pass over a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All controls passed.
    #[default]
    Valid,
    /// One or more controls failed, in declaration order.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }
}
