//! Test harness for isolated pipeline runs.
//!
//! The `TestHarness` struct wires a pipeline to:
//! - a `GatedAnalyzer` so tests decide when analysis finishes
//! - a `RecordingObserver` capturing every transition
//! - a temp directory for candidate files built from disk

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use resume_intake::pipeline::RecordingObserver;
use resume_intake::{
    CandidateFile, IntakePipeline, IntakeStatus, MediaType, PipelineConfig, StatusObserver,
};

use super::analyzers::{GatedAnalyzer, Script};

pub struct TestHarness {
    temp_dir: TempDir,
    pub pipeline: IntakePipeline,
    pub analyzer: Arc<GatedAnalyzer>,
    pub observer: Arc<RecordingObserver>,
}

impl TestHarness {
    /// Gated analysis, no timeout.
    pub fn new() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(script: Vec<Script>) -> Self {
        Self::with_timeout(script, None)
    }

    pub fn with_timeout(script: Vec<Script>, timeout: Option<Duration>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let analyzer = Arc::new(GatedAnalyzer::scripted(script));
        let observer = Arc::new(RecordingObserver::new());
        let config = Arc::new(PipelineConfig::default().with_timeout(timeout));

        let pipeline = IntakePipeline::with_observers(
            config,
            analyzer.clone(),
            vec![observer.clone() as Arc<dyn StatusObserver>],
        );

        Self {
            temp_dir,
            pipeline,
            analyzer,
            observer,
        }
    }

    /// Writes a file into the harness temp directory.
    pub fn write_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write candidate file");
        path
    }

    /// Recorded `(from, to)` pairs, in order.
    pub fn transitions(&self) -> Vec<(IntakeStatus, IntakeStatus)> {
        self.observer
            .events()
            .iter()
            .map(|e| (e.from, e.status))
            .collect()
    }

    /// Lets spawned analysis tasks make progress.
    pub async fn settle(&self) {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }
}

pub fn pdf(name: &str) -> CandidateFile {
    CandidateFile::new(name, MediaType::Pdf, 48_213)
}

pub fn docx(name: &str) -> CandidateFile {
    CandidateFile::new(name, MediaType::Docx, 31_007)
}
