//! ImageJ ROI readers.
//!
//! ImageJ saves a single ROI as a `.roi` file and a ROI Manager selection
//! as a `.zip` archive of `.roi` entries. Both readers return a
//! [`RecordSet`] keyed by ROI name, in file/archive order.

mod decode;

pub use decode::decode_roi;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use zip::ZipArchive;

use crate::error::RoiError;
use crate::record::RecordSet;

/// Reads a single `.roi` file into a one-entry record set.
///
/// The ROI is keyed by its embedded name, or by the file stem when the
/// file carries none.
pub fn read_roi_file(path: &Path) -> Result<RecordSet, RoiError> {
    let data = std::fs::read(path)?;
    let stem = file_stem(path);
    let record = decode_roi(&data, &stem, path)?;

    let name = record.name().unwrap_or(&stem).to_string();
    tracing::debug!(path = %path.display(), %name, "decoded ROI file");

    let mut records = RecordSet::new();
    records.insert(name, record);
    Ok(records)
}

/// Reads every `.roi` entry of an ImageJ ROI archive, in archive order.
///
/// Entries that are directories or lack the `.roi` suffix are skipped.
/// Two ROIs with the same name collapse into one entry holding the later
/// ROI at the earlier position.
pub fn read_roi_zip(path: &Path) -> Result<RecordSet, RoiError> {
    let file = File::open(path)?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|source| RoiError::Zip {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = RecordSet::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|source| RoiError::Zip {
            path: path.to_path_buf(),
            source,
        })?;

        let entry_name = entry.name().to_string();
        if entry.is_dir() || !entry_name.ends_with(".roi") {
            tracing::debug!(entry = %entry_name, "skipping non-ROI archive entry");
            continue;
        }

        // The declared size comes from the archive and is not trusted.
        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;

        let stem = file_stem(Path::new(&entry_name));
        let record = decode_roi(&data, &stem, &path.join(&entry_name))?;
        let name = record.name().unwrap_or(&stem).to_string();

        if records.insert(name.clone(), record).is_some() {
            tracing::warn!(archive = %path.display(), %name, "duplicate ROI name in archive");
        }
    }

    tracing::info!(
        archive = %path.display(),
        count = records.len(),
        "read ROI archive"
    );
    Ok(records)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
