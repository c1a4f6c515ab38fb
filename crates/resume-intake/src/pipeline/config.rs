use std::time::Duration;

use crate::config::Config;

pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_HANDOFF_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Runtime settings for an intake pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on a single analysis. `None` waits forever.
    pub analysis_timeout: Option<Duration>,
    /// Delay used by the simulated analyzer.
    pub simulated_delay: Duration,
    /// Pause between completion and showing the report.
    pub handoff_delay: Duration,
    /// Capacity of the status event broadcast channel.
    pub event_capacity: usize,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            analysis_timeout: config.analysis.timeout_ms.map(Duration::from_millis),
            simulated_delay: Duration::from_millis(config.analysis.simulated_delay_ms),
            handoff_delay: Duration::from_millis(config.presentation.handoff_delay_ms),
            event_capacity: config.events.channel_capacity,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.analysis_timeout = timeout;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
