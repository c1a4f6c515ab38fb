#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use resume_intake::{AnalysisError, AnalysisProvider, AnalysisResult, CandidateFile};

/// Scripted outcome for one analysis call.
#[derive(Debug, Clone)]
pub enum Script {
    Succeed,
    Fail(String),
}

/// Analysis provider that waits for `release()` before answering.
///
/// Outcomes are taken from the script queue in call order; an empty queue
/// means success.
pub struct GatedAnalyzer {
    gate: Semaphore,
    calls: AtomicUsize,
    finished: AtomicUsize,
    script: Mutex<VecDeque<Script>>,
}

impl GatedAnalyzer {
    pub fn new() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(script: Vec<Script>) -> Self {
        Self {
            gate: Semaphore::new(0),
            calls: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
            script: Mutex::new(script.into()),
        }
    }

    /// Lets one pending (or future) analysis call finish.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Number of analysis calls started.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of analysis calls that produced an outcome.
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisProvider for GatedAnalyzer {
    async fn analyze(&self, file: &CandidateFile) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| AnalysisError::failed("gate closed"))?;
        permit.forget();

        let next = self.script.lock().unwrap().pop_front();
        self.finished.fetch_add(1, Ordering::SeqCst);

        match next.unwrap_or(Script::Succeed) {
            Script::Succeed => Ok(AnalysisResult::new(
                file,
                serde_json::json!({ "analyzedBy": "gated" }),
            )),
            Script::Fail(reason) => Err(AnalysisError::failed(reason)),
        }
    }

    fn name(&self) -> &str {
        "gated"
    }
}

/// Analysis provider that blocks its worker thread without yielding.
///
/// Aborting the pipeline task has no effect while `analyze` is blocked, so
/// the outcome is delivered even after a reset. Needs a multi-threaded
/// runtime.
pub struct BlockingAnalyzer {
    entered: Mutex<mpsc::Sender<()>>,
    proceed: Mutex<mpsc::Receiver<()>>,
    finished: AtomicUsize,
}

/// Test-side handle for a `BlockingAnalyzer`.
pub struct BlockingControl {
    entered: mpsc::Receiver<()>,
    proceed: mpsc::Sender<()>,
}

impl BlockingAnalyzer {
    pub fn new() -> (Self, BlockingControl) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (proceed_tx, proceed_rx) = mpsc::channel();
        let analyzer = Self {
            entered: Mutex::new(entered_tx),
            proceed: Mutex::new(proceed_rx),
            finished: AtomicUsize::new(0),
        };
        let control = BlockingControl {
            entered: entered_rx,
            proceed: proceed_tx,
        };
        (analyzer, control)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

impl BlockingControl {
    /// Blocks until `analyze` has started.
    pub fn wait_entered(&self) {
        self.entered
            .recv_timeout(Duration::from_secs(5))
            .expect("analysis never started");
    }

    /// Lets the blocked `analyze` call return.
    pub fn proceed(&self) {
        self.proceed.send(()).expect("analyzer dropped");
    }
}

#[async_trait]
impl AnalysisProvider for BlockingAnalyzer {
    async fn analyze(&self, file: &CandidateFile) -> Result<AnalysisResult, AnalysisError> {
        let _ = self.entered.lock().unwrap().send(());
        self.proceed
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .map_err(|_| AnalysisError::failed("never released"))?;
        self.finished.fetch_add(1, Ordering::SeqCst);

        Ok(AnalysisResult::new(
            file,
            serde_json::json!({ "analyzedBy": "blocking" }),
        ))
    }

    fn name(&self) -> &str {
        "blocking"
    }
}
