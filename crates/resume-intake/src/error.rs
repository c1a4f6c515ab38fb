use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::intake::{MediaType, SubmissionId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Errors returned to the caller of `IntakePipeline::submit`.
///
/// None of these change the pipeline status.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Unsupported media type '{media_type}' for '{name}' (accepted: PDF, DOCX)")]
    UnsupportedMediaType { name: String, media_type: MediaType },

    #[error("Exactly one file must be submitted, got {0}")]
    InvalidSubmissionCount(usize),

    #[error("Submission {submission} is still being analyzed")]
    AlreadyProcessing { submission: SubmissionId },

    #[error("Failed to read candidate file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure cause recorded when the pipeline moves to `Failed`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Analysis failed: {0}")]
    Failed(String),

    #[error("Analysis timed out after {}ms", after.as_millis())]
    Timeout { after: Duration },

    #[error("Analysis provider panicked: {0}")]
    Panicked(String),
}

impl AnalysisError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    /// Timeouts are a specialisation of analysis failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_is_analysis_failure_specialisation() {
        let timeout = AnalysisError::Timeout {
            after: Duration::from_millis(250),
        };
        assert!(timeout.is_timeout());
        assert_eq!(timeout.to_string(), "Analysis timed out after 250ms");
        assert!(!AnalysisError::failed("parser crashed").is_timeout());
    }

    #[test]
    fn test_unsupported_media_type_message() {
        let err = IntakeError::UnsupportedMediaType {
            name: "resume.exe".to_string(),
            media_type: MediaType::Other("application/x-msdownload".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("resume.exe"));
        assert!(msg.contains("application/x-msdownload"));
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: Error = IntakeError::InvalidSubmissionCount(2).into();
        assert!(matches!(
            err,
            Error::Intake(IntakeError::InvalidSubmissionCount(2))
        ));
    }
}
