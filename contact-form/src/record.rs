//! Submission snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::{FieldId, FieldState, FieldValue};

/// Immutable snapshot of a form's values, captured when every check passed.
///
/// A record is either built from all fields at once or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub form_id: String,
    pub values: Vec<(FieldId, FieldValue)>,
    pub consent: bool,
    pub captured_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub(crate) fn capture<'a>(
        form_id: &str,
        fields: impl IntoIterator<Item = &'a FieldState>,
        consent: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_id: form_id.to_string(),
            values: fields
                .into_iter()
                .map(|field| (field.id().clone(), field.value().clone()))
                .collect(),
            consent,
            captured_at: Utc::now(),
        }
    }

    /// Whether two snapshots hold the same values and consent, regardless of
    /// when they were taken.
    pub fn same_contents(&self, other: &SubmissionRecord) -> bool {
        self.form_id == other.form_id && self.values == other.values && self.consent == other.consent
    }

    /// The captured value of a field.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(id, _)| id.as_str() == field)
            .map(|(_, value)| value)
    }
}

/// Acknowledgement returned by a backend for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub submission_id: Uuid,
    pub accepted_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new(record: &SubmissionRecord) -> Self {
        Self {
            submission_id: record.id,
            accepted_at: Utc::now(),
        }
    }
}
