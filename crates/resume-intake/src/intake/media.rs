use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Media type of a candidate file.
///
/// Only `Pdf` and `Docx` are accepted for intake. Anything else is kept as
/// `Other` with the detected MIME type (or bare extension) so rejections can
/// report what was actually supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Pdf,
    Docx,
    Other(String),
}

impl MediaType {
    /// Parses a content type, ignoring case and any `; param=...` suffix.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PDF_MIME => Self::Pdf,
            DOCX_MIME => Self::Docx,
            _ => Self::Other(essence),
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            _ => Self::Other(ext),
        }
    }

    /// Detects the media type from a file name.
    ///
    /// Accepted extensions map directly; other names go through `mime_guess`
    /// so the rejection carries a real content type where one is known.
    pub fn from_file_name(name: &str) -> Self {
        let path = Path::new(name);
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match Self::from_extension(extension) {
            Self::Other(ext) => match mime_guess::from_path(path).first_raw() {
                Some(mime) => Self::from_mime(mime),
                None => Self::Other(ext),
            },
            accepted => accepted,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Pdf | Self::Docx)
    }

    pub fn mime(&self) -> &str {
        match self {
            Self::Pdf => PDF_MIME,
            Self::Docx => DOCX_MIME,
            Self::Other(raw) => raw,
        }
    }

    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Pdf => Some("pdf"),
            Self::Docx => Some("docx"),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Docx => write!(f, "DOCX"),
            Self::Other(raw) if raw.is_empty() => write!(f, "unknown"),
            Self::Other(raw) => write!(f, "{}", raw),
        }
    }
}
