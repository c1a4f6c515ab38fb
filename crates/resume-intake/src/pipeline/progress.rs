use std::sync::Mutex;

use tracing::info;

use crate::broadcast::StatusEvent;

/// Receives every status transition of a pipeline.
///
/// Called synchronously while the pipeline state is locked; implementations
/// must not call back into the pipeline. A panic inside `on_transition` is
/// logged and does not reach the caller.
pub trait StatusObserver: Send + Sync {
    fn on_transition(&self, event: &StatusEvent);
}

/// Writes each transition to the log.
pub struct LoggingObserver;

impl StatusObserver for LoggingObserver {
    fn on_transition(&self, event: &StatusEvent) {
        match &event.error {
            Some(error) => info!(
                "{}: {} -> {} ({})",
                event.filename, event.from, event.status, error
            ),
            None => info!("{}: {} -> {}", event.filename, event.from, event.status),
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<StatusEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl StatusObserver for RecordingObserver {
    fn on_transition(&self, event: &StatusEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event.clone());
        }
    }
}
