use std::path::PathBuf;
use thiserror::Error;

/// The main error type for roishapes operations.
#[derive(Debug, Error)]
pub enum RoiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode ImageJ ROI {path}: {message}")]
    RoiDecode { path: PathBuf, message: String },

    #[error("Failed to read ROI archive {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to parse ROI records JSON from {path}: {source}")]
    RecordsJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON: {0}")]
    JsonWrite(#[source] serde_json::Error),

    #[error("Malformed ROI record: field '{field}' {reason}")]
    MalformedRecord { field: String, reason: String },
}

impl RoiError {
    pub(crate) fn missing(field: &str) -> Self {
        RoiError::MalformedRecord {
            field: field.to_string(),
            reason: "is missing".to_string(),
        }
    }

    pub(crate) fn malformed(field: &str, reason: impl Into<String>) -> Self {
        RoiError::MalformedRecord {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
