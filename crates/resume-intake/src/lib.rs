pub mod analysis;
pub mod broadcast;
pub mod config;
pub mod error;
pub mod intake;
pub mod pipeline;
pub mod sanitize;
pub mod telemetry;

pub use analysis::{AnalysisProvider, AnalysisResult, DashboardReport, SimulatedAnalyzer};
pub use broadcast::{StatusBroadcaster, StatusEvent};
pub use config::{load_config, load_config_from_str, Config};
pub use error::{AnalysisError, ConfigError, Error, IntakeError, Result};
pub use intake::{CandidateFile, MediaType, SubmissionId};
pub use pipeline::{IntakePipeline, IntakeStatus, PipelineConfig, StatusObserver};
