pub mod config;
pub mod progress;
pub mod runner;
pub mod state;
pub mod status;

pub use config::PipelineConfig;
pub use progress::{LoggingObserver, RecordingObserver, StatusObserver};
pub use runner::IntakePipeline;
pub use state::{IntakeState, Transition, TransitionOutcome};
pub use status::IntakeStatus;
