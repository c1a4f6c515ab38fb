//! The intake state machine.
//!
//! [`IntakeState::apply`] is the only place the status changes. Analysis
//! outcomes name the submission they belong to; an outcome for anything but
//! the submission currently in flight is reported as [`TransitionOutcome::Stale`]
//! and leaves the state untouched.

use crate::analysis::AnalysisResult;
use crate::error::{AnalysisError, IntakeError};
use crate::intake::{CandidateFile, SubmissionId};

use super::status::IntakeStatus;

#[derive(Debug)]
pub enum Transition {
    Accept {
        submission: SubmissionId,
        file: CandidateFile,
    },
    Complete {
        submission: SubmissionId,
        result: AnalysisResult,
    },
    Fail {
        submission: SubmissionId,
        cause: AnalysisError,
    },
    Reset,
}

#[derive(Debug)]
pub enum TransitionOutcome {
    Applied {
        from: IntakeStatus,
        to: IntakeStatus,
    },
    /// Outcome of an abandoned or superseded submission; ignored.
    Stale,
    Rejected(IntakeError),
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

#[derive(Debug, Default)]
pub struct IntakeState {
    status: IntakeStatus,
    submission: Option<SubmissionId>,
    file: Option<CandidateFile>,
    result: Option<AnalysisResult>,
    failure: Option<AnalysisError>,
}

impl IntakeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> IntakeStatus {
        self.status
    }

    /// Submission of the current (or most recent, if terminal) file.
    pub fn submission(&self) -> Option<SubmissionId> {
        self.submission
    }

    /// Submission whose analysis is still running, if any.
    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.submission.filter(|_| self.status.is_processing())
    }

    pub fn file(&self) -> Option<&CandidateFile> {
        self.file.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn failure(&self) -> Option<&AnalysisError> {
        self.failure.as_ref()
    }

    pub fn apply(&mut self, transition: Transition) -> TransitionOutcome {
        let from = self.status;

        match transition {
            Transition::Accept { submission, file } => {
                if let Some(current) = self.in_flight() {
                    return TransitionOutcome::Rejected(IntakeError::AlreadyProcessing {
                        submission: current,
                    });
                }
                if !file.is_accepted() {
                    return TransitionOutcome::Rejected(IntakeError::UnsupportedMediaType {
                        name: file.name,
                        media_type: file.media_type,
                    });
                }

                // A new submission invalidates whatever the previous one left behind.
                self.submission = Some(submission);
                self.file = Some(file);
                self.result = None;
                self.failure = None;
                self.status = IntakeStatus::Processing;
            }
            Transition::Complete { submission, result } => {
                if self.in_flight() != Some(submission) {
                    return TransitionOutcome::Stale;
                }
                self.result = Some(result);
                self.status = IntakeStatus::Completed;
            }
            Transition::Fail { submission, cause } => {
                if self.in_flight() != Some(submission) {
                    return TransitionOutcome::Stale;
                }
                self.failure = Some(cause);
                self.status = IntakeStatus::Failed;
            }
            Transition::Reset => {
                *self = Self::default();
            }
        }

        TransitionOutcome::Applied {
            from,
            to: self.status,
        }
    }
}
