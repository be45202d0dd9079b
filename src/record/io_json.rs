//! JSON serialization for ROI record sets.
//!
//! The JSON form is an object keyed by record name, each value being the
//! record's field mapping. This is useful for:
//! - Inspecting what the ImageJ decoder produced
//! - Feeding records parsed elsewhere into the converter
//! - Writing converter tests without binary fixtures

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::RecordSet;
use crate::error::RoiError;

/// Reads a record set from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_records_json(path: &Path) -> Result<RecordSet, RoiError> {
    let file = File::open(path).map_err(RoiError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| RoiError::RecordsJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a record set from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_records_json_str(json: &str) -> Result<RecordSet, RoiError> {
    serde_json::from_str(json).map_err(|source| RoiError::RecordsJsonParse {
        path: Path::new("<string>").to_path_buf(),
        source,
    })
}

/// Writes a record set to a pretty-printed JSON string.
pub fn to_records_json_string(records: &RecordSet) -> Result<String, RoiError> {
    serde_json::to_string_pretty(records).map_err(RoiError::JsonWrite)
}
