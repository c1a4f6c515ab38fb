//! Candidate files and media type detection.

pub mod file;
pub mod media;

pub use file::{CandidateFile, SubmissionId};
pub use media::{MediaType, DOCX_MIME, PDF_MIME};
