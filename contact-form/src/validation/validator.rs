use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use super::Verdict;
use crate::error::ValidationFailure;
use crate::field::{FieldKind, FieldSpec, FieldValue};
use crate::messages::Messages;

/// Something without whitespace or `@`, an `@`, more of the same, a `.`, more
/// of the same.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern"));

/// Whether `value` has the shape `local@domain.tld`.
pub fn is_well_formed_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Apply a field's declared constraints to a raw value.
///
/// Required is checked first: a blank required field is reported as missing
/// even when it is an email field. An empty optional email field is fine.
pub fn check(spec: &FieldSpec, value: &FieldValue) -> Result<(), ValidationFailure> {
    if spec.required && value.is_blank() {
        return Err(ValidationFailure::MissingRequiredValue);
    }

    if spec.kind == FieldKind::Email {
        if let Some(text) = value.as_text() {
            if !text.is_empty() && !is_well_formed_email(text) {
                return Err(ValidationFailure::MalformedEmail);
            }
        }
    }

    Ok(())
}

/// Validate a field and attach the localized message.
pub fn validate(spec: &FieldSpec, value: &FieldValue, messages: &Messages) -> Verdict {
    let verdict = match check(spec, value) {
        Ok(()) => Verdict::Valid,
        Err(failure) => Verdict::invalid(failure, messages.for_failure(failure)),
    };
    trace!("validate {}: {:?}", spec.id, verdict.failure());
    verdict
}
