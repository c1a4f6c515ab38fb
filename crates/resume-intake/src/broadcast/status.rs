//! Status broadcaster for real-time intake status streaming.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::intake::SubmissionId;
use crate::pipeline::{IntakeStatus, StatusObserver};

/// A single status transition of an intake pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    /// Submission the transition belongs to (absent only for an empty reset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<SubmissionId>,
    /// Name of the candidate file.
    pub filename: String,
    /// Status before the transition.
    pub from: IntakeStatus,
    /// Status after the transition.
    pub status: IntakeStatus,
    /// Human-readable message for the new status.
    pub message: String,
    /// Timestamp of this event.
    pub timestamp: DateTime<Utc>,
    /// Failure cause (set when moving to `Failed`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusEvent {
    pub fn new(
        submission_id: Option<SubmissionId>,
        filename: &str,
        from: IntakeStatus,
        to: IntakeStatus,
    ) -> Self {
        Self {
            submission_id,
            filename: filename.to_string(),
            from,
            status: to,
            message: to.message().to_string(),
            timestamp: Utc::now(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Broadcasts status events for streaming.
#[derive(Clone)]
pub struct StatusBroadcaster {
    sender: Arc<broadcast::Sender<StatusEvent>>,
}

impl StatusBroadcaster {
    /// Creates a new broadcaster with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Sends an event to all subscribers.
    pub fn send(&self, event: StatusEvent) {
        // No active receivers is fine
        let _ = self.sender.send(event);
    }

    /// Creates a new subscriber for status events.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for StatusBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}

impl StatusObserver for StatusBroadcaster {
    fn on_transition(&self, event: &StatusEvent) {
        self.send(event.clone());
    }
}
