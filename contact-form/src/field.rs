//! Field declarations and runtime field state.
//!
//! A [`FormSpec`] is the markup contract: which controls exist, which are
//! required and what kind of value each one holds. It is read, never mutated.
//! [`FieldState`] pairs one declared field with its current value and the last
//! verdict computed for it.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::Verdict;

/// Identifier of a form control, as it appears in the page markup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The kind discriminator carried by a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Checkbox,
}

/// Validation contract for one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: FieldId,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// An optional text field.
    pub fn text(id: impl Into<FieldId>) -> Self {
        Self {
            id: id.into(),
            required: false,
            kind: FieldKind::Text,
        }
    }

    /// An optional email field.
    pub fn email(id: impl Into<FieldId>) -> Self {
        Self {
            id: id.into(),
            required: false,
            kind: FieldKind::Email,
        }
    }

    /// An optional checkbox.
    pub fn checkbox(id: impl Into<FieldId>) -> Self {
        Self {
            id: id.into(),
            required: false,
            kind: FieldKind::Checkbox,
        }
    }

    /// Mark this field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The value a freshly loaded (or reset) control holds.
    pub fn empty_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Checkbox => FieldValue::Checked(false),
            FieldKind::Text | FieldKind::Email => FieldValue::Text(String::new()),
        }
    }
}

/// The raw value of a control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    /// True when the value counts as "nothing entered": whitespace-only text or
    /// an unticked box.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Checked(checked) => !checked,
        }
    }

    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Checked(_) => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Checked(checked) => write!(f, "{checked}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(checked: bool) -> Self {
        Self::Checked(checked)
    }
}

/// Runtime state of one field.
#[derive(Debug, Clone)]
pub struct FieldState {
    spec: FieldSpec,
    value: FieldValue,
    verdict: Option<Verdict>,
}

impl FieldState {
    pub fn new(spec: FieldSpec) -> Self {
        let value = spec.empty_value();
        Self {
            spec,
            value,
            verdict: None,
        }
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn id(&self) -> &FieldId {
        &self.spec.id
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
    }

    /// The last verdict computed for this field, if it has been validated.
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    pub(crate) fn set_verdict(&mut self, verdict: Verdict) {
        self.verdict = Some(verdict);
    }

    /// Whether the field currently shows an error.
    pub fn is_marked_invalid(&self) -> bool {
        self.verdict.as_ref().is_some_and(|v| !v.is_valid())
    }

    /// Restore the value a freshly loaded control holds and forget the verdict.
    pub fn reset(&mut self) {
        self.value = self.spec.empty_value();
        self.verdict = None;
    }
}

/// Everything the page markup declares about one form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    pub id: String,
    pub fields: Vec<FieldSpec>,
    /// Identifier of the consent control.
    #[serde(default = "default_consent_id")]
    pub consent: FieldId,
}

fn default_consent_id() -> FieldId {
    FieldId::from("consent")
}

impl FormSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            consent: default_consent_id(),
        }
    }

    /// Add a field declaration.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the identifier of the consent control.
    pub fn consent(mut self, id: impl Into<FieldId>) -> Self {
        self.consent = id.into();
        self
    }

    /// The stock contact form.
    pub fn contact() -> Self {
        Self::new("contactForm")
            .field(FieldSpec::text("name").required())
            .field(FieldSpec::email("email").required())
            .field(FieldSpec::text("phone"))
            .field(FieldSpec::text("message").required())
    }
}
