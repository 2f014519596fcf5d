//! Submission backends.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::config::DEFAULT_SUBMISSION_DELAY;
use crate::error::SubmissionError;
use crate::record::{Receipt, SubmissionRecord};

/// Where a confirmed submission is delivered.
///
/// The controller calls `submit` exactly once per confirmed record and
/// bounds the call with the configured timeout, so implementations do not
/// need their own.
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    async fn submit(&self, record: &SubmissionRecord) -> Result<Receipt, SubmissionError>;
}

/// Stand-in for a real backend: waits a fixed delay, then accepts.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMISSION_DELAY)
    }
}

#[async_trait]
impl SubmissionBackend for SimulatedBackend {
    async fn submit(&self, record: &SubmissionRecord) -> Result<Receipt, SubmissionError> {
        debug!("simulating delivery of {} ({:?})", record.id, self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(Receipt::new(record))
    }
}
