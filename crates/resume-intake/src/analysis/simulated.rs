use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AnalysisError;
use crate::intake::CandidateFile;

use super::report::DashboardReport;
use super::{AnalysisProvider, AnalysisResult};

pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(3000);

/// Fixed-delay analyzer that always succeeds with the demo dashboard report.
///
/// The submitted file is not read.
pub struct SimulatedAnalyzer {
    delay: Duration,
    report: DashboardReport,
}

impl SimulatedAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            report: DashboardReport::demo(),
        }
    }

    pub fn with_report(delay: Duration, report: DashboardReport) -> Self {
        Self { delay, report }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY)
    }
}

#[async_trait]
impl AnalysisProvider for SimulatedAnalyzer {
    async fn analyze(&self, file: &CandidateFile) -> Result<AnalysisResult, AnalysisError> {
        debug!(
            "Simulating analysis of {} for {}ms",
            file.name,
            self.delay.as_millis()
        );
        tokio::time::sleep(self.delay).await;

        let payload = serde_json::to_value(&self.report)
            .map_err(|e| AnalysisError::failed(format!("Failed to encode report: {}", e)))?;

        Ok(AnalysisResult::new(file, payload))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
