//! Analysis providers.
//!
//! The pipeline only depends on [`AnalysisProvider`]. The shipped
//! [`SimulatedAnalyzer`] waits a fixed delay and returns demo data; a real
//! parsing/scoring engine plugs in behind the same trait.

pub mod report;
pub mod simulated;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::intake::CandidateFile;

pub use report::{DashboardReport, JobRecommendation, MissingSkill, Priority, SkillFrequency};
pub use simulated::SimulatedAnalyzer;

/// Output of a successful analysis.
///
/// The pipeline never looks inside `payload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The file this result was derived from.
    pub file: CandidateFile,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl AnalysisResult {
    pub fn new(file: &CandidateFile, payload: serde_json::Value) -> Self {
        Self {
            file: file.clone(),
            completed_at: Utc::now(),
            payload,
        }
    }

    /// A result that carries nothing beyond the file reference and timestamp.
    pub fn empty(file: &CandidateFile) -> Self {
        Self::new(file, serde_json::Value::Null)
    }

    /// Decodes the payload as a dashboard report, if it is one.
    pub fn dashboard_report(&self) -> Option<DashboardReport> {
        serde_json::from_value(self.payload.clone()).ok()
    }
}

#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, file: &CandidateFile) -> Result<AnalysisResult, AnalysisError>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "analysis"
    }
}
