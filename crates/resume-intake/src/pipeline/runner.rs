use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures_util::FutureExt;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, field, info, info_span, warn, Instrument};

use crate::analysis::{AnalysisProvider, AnalysisResult, SimulatedAnalyzer};
use crate::broadcast::StatusEvent;
use crate::error::{AnalysisError, IntakeError};
use crate::intake::{CandidateFile, SubmissionId};
use crate::sanitize;

use super::config::PipelineConfig;
use super::progress::StatusObserver;
use super::state::{IntakeState, Transition, TransitionOutcome};
use super::status::IntakeStatus;

/// Single-file intake pipeline.
///
/// Accepts one candidate file at a time, runs the analysis provider on the
/// tokio runtime and tracks the lifecycle `Idle -> Processing ->
/// Completed | Failed`. `reset()` returns to `Idle` from anywhere.
pub struct IntakePipeline {
    config: Arc<PipelineConfig>,
    provider: Arc<dyn AnalysisProvider>,
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    status_tx: watch::Sender<IntakeStatus>,
    observers: Vec<Arc<dyn StatusObserver>>,
}

#[derive(Default)]
struct Inner {
    state: IntakeState,
    task: Option<AbortHandle>,
}

impl IntakePipeline {
    /// Production constructor: simulated analysis with the configured delay.
    pub fn from_config(config: Arc<PipelineConfig>) -> Self {
        let provider = Arc::new(SimulatedAnalyzer::new(config.simulated_delay));
        Self::new(config, provider)
    }

    pub fn new(config: Arc<PipelineConfig>, provider: Arc<dyn AnalysisProvider>) -> Self {
        Self::with_observers(config, provider, Vec::new())
    }

    pub fn with_observers(
        config: Arc<PipelineConfig>,
        provider: Arc<dyn AnalysisProvider>,
        observers: Vec<Arc<dyn StatusObserver>>,
    ) -> Self {
        let (status_tx, _) = watch::channel(IntakeStatus::Idle);
        Self {
            config,
            provider,
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                status_tx,
                observers,
            }),
        }
    }

    /// Submits exactly one file for analysis.
    ///
    /// Returns as soon as the file is accepted; the analysis finishes later on
    /// the runtime. Checks run in order: nothing in flight, exactly one file,
    /// accepted media type. A rejected submission leaves the status as it was.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn submit(&self, files: Vec<CandidateFile>) -> Result<SubmissionId, IntakeError> {
        let mut inner = self.shared.lock();

        if let Some(current) = inner.state.in_flight() {
            warn!("Rejecting submission: {} is still processing", current);
            return Err(IntakeError::AlreadyProcessing {
                submission: current,
            });
        }

        let count = files.len();
        let mut files = files.into_iter();
        let file = match (files.next(), files.next()) {
            (Some(file), None) => file,
            _ => {
                warn!("Rejecting submission of {} files", count);
                return Err(IntakeError::InvalidSubmissionCount(count));
            }
        };

        let submission = SubmissionId::new();
        let transition = Transition::Accept {
            submission,
            file: file.clone(),
        };
        if let TransitionOutcome::Rejected(e) = self.shared.transition(&mut inner, transition) {
            warn!("Rejecting {}: {}", file.name, e);
            return Err(e);
        }

        info!(
            "Accepted {} ({}, {} bytes) as submission {}",
            file.name, file.media_type, file.size_bytes, submission
        );

        let span = info_span!("intake",
            submission_id = %submission,
            filename = %file.name,
            provider = self.provider.name(),
            source = field::Empty,
        );
        if let Some(path) = file.path.as_deref() {
            span.record("source", sanitize::hash_path(path).as_str());
        }

        let shared = Arc::clone(&self.shared);
        let provider = Arc::clone(&self.provider);
        let timeout = self.config.analysis_timeout;
        let handle = tokio::spawn(
            async move {
                let outcome = run_analysis(provider.as_ref(), &file, timeout).await;
                shared.finish(submission, outcome);
            }
            .instrument(span),
        );
        inner.task = Some(handle.abort_handle());

        Ok(submission)
    }

    /// Convenience wrapper for the common single-file case.
    pub fn submit_one(&self, file: CandidateFile) -> Result<SubmissionId, IntakeError> {
        self.submit(vec![file])
    }

    /// Returns the pipeline to `Idle`, abandoning any analysis in flight.
    pub fn reset(&self) {
        let mut inner = self.shared.lock();
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        if let Some(submission) = inner.state.in_flight() {
            info!("Abandoning submission {}", submission);
        }
        self.shared.transition(&mut inner, Transition::Reset);
    }

    pub fn current_status(&self) -> IntakeStatus {
        self.shared.lock().state.status()
    }

    pub fn current_submission(&self) -> Option<SubmissionId> {
        self.shared.lock().state.submission()
    }

    pub fn current_file(&self) -> Option<CandidateFile> {
        self.shared.lock().state.file().cloned()
    }

    pub fn result(&self) -> Option<AnalysisResult> {
        self.shared.lock().state.result().cloned()
    }

    pub fn failure(&self) -> Option<AnalysisError> {
        self.shared.lock().state.failure().cloned()
    }

    /// Subscribes to status changes.
    pub fn watch_status(&self) -> watch::Receiver<IntakeStatus> {
        self.shared.status_tx.subscribe()
    }

    /// Waits until the pipeline is no longer `Processing`.
    pub async fn wait_until_settled(&self) -> IntakeStatus {
        let mut rx = self.watch_status();
        let settled = rx.wait_for(|status| !status.is_processing()).await;
        match settled {
            Ok(status) => *status,
            Err(_) => self.current_status(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

impl Drop for IntakePipeline {
    fn drop(&mut self) {
        if let Some(task) = self.shared.lock().task.take() {
            task.abort();
        }
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every mutation goes through `IntakeState::apply`, so a poisoned guard still holds a valid state.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Applies a transition and notifies observers when the status changed.
    fn transition(&self, inner: &mut Inner, transition: Transition) -> TransitionOutcome {
        let previous_submission = inner.state.submission();
        let previous_name = inner.state.file().map(|f| f.name.clone());

        let outcome = inner.state.apply(transition);

        if let TransitionOutcome::Applied { from, to } = &outcome {
            let (from, to) = (*from, *to);
            if from != to {
                let submission = inner.state.submission().or(previous_submission);
                let filename = inner
                    .state
                    .file()
                    .map(|f| f.name.clone())
                    .or(previous_name)
                    .unwrap_or_default();

                let mut event = StatusEvent::new(submission, &filename, from, to);
                if let Some(cause) = inner.state.failure() {
                    event = event.with_error(cause.to_string());
                }

                self.status_tx.send_replace(to);
                for observer in &self.observers {
                    let notified = std::panic::catch_unwind(AssertUnwindSafe(|| {
                        observer.on_transition(&event);
                    }));
                    if let Err(panic) = notified {
                        warn!(
                            "Status observer panicked on {} -> {}: {}",
                            from,
                            to,
                            panic_message(panic.as_ref())
                        );
                    }
                }
            }
        }

        outcome
    }

    fn finish(&self, submission: SubmissionId, outcome: Result<AnalysisResult, AnalysisError>) {
        let mut inner = self.lock();

        let transition = match outcome {
            Ok(result) => Transition::Complete { submission, result },
            Err(cause) => Transition::Fail { submission, cause },
        };

        match self.transition(&mut inner, transition) {
            TransitionOutcome::Applied { to, .. } => {
                inner.task = None;
                match inner.state.failure() {
                    Some(cause) => warn!("Submission {} {}: {}", submission, to, cause),
                    None => info!("Submission {} {}", submission, to),
                }
            }
            TransitionOutcome::Stale => {
                debug!("Discarding late outcome of abandoned submission {}", submission);
            }
            TransitionOutcome::Rejected(e) => {
                warn!("Unexpected rejection finishing {}: {}", submission, e);
            }
        }
    }
}

async fn run_analysis(
    provider: &dyn AnalysisProvider,
    file: &CandidateFile,
    timeout: Option<Duration>,
) -> Result<AnalysisResult, AnalysisError> {
    let analysis = AssertUnwindSafe(provider.analyze(file)).catch_unwind();

    let caught = match timeout {
        Some(limit) => match tokio::time::timeout(limit, analysis).await {
            Ok(caught) => caught,
            Err(_) => return Err(AnalysisError::Timeout { after: limit }),
        },
        None => analysis.await,
    };

    caught.unwrap_or_else(|panic| Err(AnalysisError::Panicked(panic_message(panic.as_ref()))))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
