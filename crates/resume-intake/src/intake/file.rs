use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;
use crate::sanitize;

use super::media::MediaType;

/// Identity of one accepted submission.
///
/// Minted when the pipeline accepts a file; an analysis outcome is only
/// applied while its submission is still the one in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(uuid::Uuid);

impl SubmissionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single file offered to the intake pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFile {
    /// Display name (file name only, never a full path).
    pub name: String,
    pub media_type: MediaType,
    pub size_bytes: u64,
    /// Where the file lives on disk, when it came from the filesystem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, media_type: MediaType, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            media_type,
            size_bytes,
            path: None,
        }
    }

    /// Builds a candidate from a client-supplied file name, detecting the
    /// media type from its extension. Directory parts are dropped.
    pub fn from_name(name: &str, size_bytes: u64) -> Self {
        let name = sanitize::display_name(name);
        let media_type = MediaType::from_file_name(&name);
        Self::new(name, media_type, size_bytes)
    }

    /// Builds a candidate from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| IntakeError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        if !metadata.is_file() {
            return Err(IntakeError::ReadFile {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let mut file = Self::from_name(&name, metadata.len());
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    pub fn is_accepted(&self) -> bool {
        self.media_type.is_accepted()
    }
}
