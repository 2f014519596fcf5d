//! Form configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::messages::Messages;

/// How long the simulated backend takes to "deliver" a submission.
pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_millis(1200);

/// Upper bound on a single submission before it is treated as failed.
pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-form configuration.
///
/// Every form instance on a page can carry its own config; nothing here is
/// shared between instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// User-facing strings.
    pub messages: Messages,

    /// Delay used by [`SimulatedBackend`](crate::backend::SimulatedBackend).
    #[serde(with = "millis")]
    pub submission_delay: Duration,

    /// Time after which an unanswered submission fails with
    /// [`SubmissionError::TimedOut`](crate::error::SubmissionError::TimedOut).
    #[serde(with = "millis")]
    pub submission_timeout: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            messages: Messages::default(),
            submission_delay: DEFAULT_SUBMISSION_DELAY,
            submission_timeout: DEFAULT_SUBMISSION_TIMEOUT,
        }
    }
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user-facing strings.
    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Set the simulated submission delay.
    pub fn submission_delay(mut self, delay: Duration) -> Self {
        self.submission_delay = delay;
        self
    }

    /// Set the submission timeout.
    pub fn submission_timeout(mut self, timeout: Duration) -> Self {
        self.submission_timeout = timeout;
        self
    }

    /// Parse a config from JSON. Absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Durations are written as whole milliseconds in config files.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormConfig::default();
        assert_eq!(config.submission_delay, Duration::from_millis(1200));
        assert_eq!(config.submission_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_from_json_overrides() {
        let config = FormConfig::from_json(
            r#"{ "submission_timeout": 2500, "messages": { "submit_label": "Send" } }"#,
        )
        .unwrap();
        assert_eq!(config.submission_timeout, Duration::from_millis(2500));
        assert_eq!(config.submission_delay, DEFAULT_SUBMISSION_DELAY);
        assert_eq!(config.messages.submit_label, "Send");
        assert_eq!(config.messages.required, Messages::default().required);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            FormConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
