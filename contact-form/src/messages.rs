//! User-facing strings.
//!
//! Strings are opaque: the workflow picks one by key and never inspects it.
//! Defaults are Japanese; any subset can be overridden from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationFailure};
use crate::record::SubmissionRecord;

/// Localized strings used by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub required: String,
    pub malformed_email: String,
    pub consent_required: String,
    /// Submit control label while idle.
    pub submit_label: String,
    /// Submit control label while a submission is in flight.
    pub submitting_label: String,
    /// Confirmation summary template. `{field_id}` is replaced with that
    /// field's captured value.
    pub confirmation: String,
    pub success: String,
    pub failure: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "この項目は必須です。".into(),
            malformed_email: "正しいメールアドレスを入力してください。".into(),
            consent_required: "個人情報の取り扱いに同意してください。".into(),
            submit_label: "送信する".into(),
            submitting_label: "送信中…".into(),
            confirmation: "以下の内容で送信します。よろしいですか？\nお名前: {name}\nメールアドレス: {email}".into(),
            success: "お問い合わせを受け付けました。\n通常2〜3営業日以内にご連絡いたします。\n数日経っても返信がない場合は、迷惑メールフォルダをご確認ください。".into(),
            failure: "送信に失敗しました。入力内容はそのまま残っていますので、時間をおいて再度お試しください。".into(),
        }
    }
}

impl Messages {
    /// Parse messages from JSON. Keys that are absent keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The inline error text for a failure kind.
    pub fn for_failure(&self, failure: ValidationFailure) -> &str {
        match failure {
            ValidationFailure::MissingRequiredValue => &self.required,
            ValidationFailure::MalformedEmail => &self.malformed_email,
            ValidationFailure::ConsentNotGiven => &self.consent_required,
        }
    }

    /// Render the confirmation summary for a captured record.
    pub fn confirmation_summary(&self, record: &SubmissionRecord) -> String {
        render_template(&self.confirmation, |key| {
            record.value(key).map(|value| value.to_string())
        })
    }
}

/// Replace every `{key}` in `template` using `lookup`.
///
/// Unknown keys are left in place, braces included. A `{` without a closing
/// brace is copied verbatim.
pub fn render_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match lookup(key) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
