use serde::{Deserialize, Serialize};

/// Lifecycle status of an intake pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStatus {
    #[default]
    Idle,
    Processing,
    Completed,
    Failed,
}

impl IntakeStatus {
    /// `Completed` and `Failed` stay put until `reset()` or a new submission.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn is_processing(self) -> bool {
        self == Self::Processing
    }

    /// Whether a new submission may be accepted in this status.
    pub fn accepts_submission(self) -> bool {
        !self.is_processing()
    }

    /// User-facing message for this status.
    pub fn message(self) -> &'static str {
        match self {
            Self::Idle => "Drag & drop your resume",
            Self::Processing => "Analyzing your resume...",
            Self::Completed => "Analysis complete",
            Self::Failed => "Analysis failed",
        }
    }
}

impl std::fmt::Display for IntakeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Processing => write!(f, "Processing"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}
