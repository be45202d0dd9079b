//! ROI record to OME shape conversion.
//!
//! The converter is a set of stateless functions:
//!
//! - [`convert`] dispatches one record on its kind tag and builds its shapes
//! - [`convert_batch`] converts an ordered [`RecordSet`] into one flat list
//! - [`read_from_file`] reads a `.roi` or `.zip` file and converts it
//!
//! Records whose kind has no builder are dropped without error; the
//! `*_with_report` variants say which ones.

mod builders;
mod position;
pub mod report;

pub use builders::{
    build_ellipse, build_line, build_points, build_polygon, build_polyline, build_rectangle,
};
pub use position::{resolve_position, ResolvedPosition};
pub use report::{
    ConversionCounts, ConversionIssue, ConversionIssueCode, ConversionReport, ConversionSeverity,
};

use std::path::Path;

use crate::error::RoiError;
use crate::imagej::{read_roi_file, read_roi_zip};
use crate::model::{Shape, ShapeKind};
use crate::record::{RecordSet, RoiRecord};

/// Kind tags (lower-case) and the shape kind each one builds.
///
/// New synonyms go here; builders never look at the tag.
pub const KIND_TABLE: &[(&str, ShapeKind)] = &[
    ("point", ShapeKind::Point),
    ("rectangle", ShapeKind::Rectangle),
    ("line", ShapeKind::Line),
    ("oval", ShapeKind::Ellipse),
    ("polygon", ShapeKind::Polygon),
    ("freehand", ShapeKind::Polygon),
    ("traced", ShapeKind::Polygon),
    ("polyline", ShapeKind::Polyline),
    ("angle", ShapeKind::Polyline),
    ("freeline", ShapeKind::Polyline),
];

/// Looks up the shape kind for a record's kind tag, ignoring case.
pub fn kind_for_tag(tag: &str) -> Option<ShapeKind> {
    let tag = tag.to_lowercase();
    KIND_TABLE
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, kind)| *kind)
}

/// Container formats accepted by [`read_from_file`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoiFormat {
    /// A `.zip` archive of `.roi` entries.
    Zip,
    /// A single `.roi` file.
    Roi,
}

impl RoiFormat {
    /// Picks the format from the path suffix (case-sensitive).
    pub fn from_path(path: &Path) -> Result<Self, RoiError> {
        let name = path.to_string_lossy();
        if name.ends_with(".zip") {
            Ok(RoiFormat::Zip)
        } else if name.ends_with(".roi") {
            Ok(RoiFormat::Roi)
        } else {
            Err(RoiError::UnsupportedFormat(format!(
                "'{}' (supported: .zip, .roi)",
                path.display()
            )))
        }
    }

    /// Human-readable name for the format.
    pub fn name(&self) -> &'static str {
        match self {
            RoiFormat::Zip => "zip",
            RoiFormat::Roi => "roi",
        }
    }

    /// Reads the raw record set from `path` in this format.
    pub fn read(&self, path: &Path) -> Result<RecordSet, RoiError> {
        match self {
            RoiFormat::Zip => read_roi_zip(path),
            RoiFormat::Roi => read_roi_file(path),
        }
    }
}

/// Converts one record into its shapes.
///
/// Returns an empty list when the record's kind is missing or unsupported.
///
/// # Errors
/// Returns [`RoiError::MalformedRecord`] if a field the builder needs is
/// missing or has the wrong type.
pub fn convert(record: &RoiRecord) -> Result<Vec<Shape>, RoiError> {
    let Some(kind) = record.kind_tag().and_then(kind_for_tag) else {
        tracing::debug!(kind = ?record.kind_tag(), "no shape builder for record");
        return Ok(Vec::new());
    };
    build(kind, record)
}

fn build(kind: ShapeKind, record: &RoiRecord) -> Result<Vec<Shape>, RoiError> {
    match kind {
        ShapeKind::Point => build_points(record),
        ShapeKind::Rectangle => build_rectangle(record).map(|shape| vec![shape]),
        ShapeKind::Line => build_line(record).map(|shape| vec![shape]),
        ShapeKind::Ellipse => build_ellipse(record).map(|shape| vec![shape]),
        ShapeKind::Polygon => build_polygon(record).map(|shape| vec![shape]),
        ShapeKind::Polyline => build_polyline(record).map(|shape| vec![shape]),
    }
}

/// Converts every record in order and concatenates the shapes.
///
/// Record names are not carried into the output.
pub fn convert_batch(records: &RecordSet) -> Result<Vec<Shape>, RoiError> {
    let mut shapes = Vec::new();
    for record in records.records() {
        shapes.extend(convert(record)?);
    }
    Ok(shapes)
}

/// Like [`convert_batch`], also reporting counts and dropped records.
pub fn convert_batch_with_report(
    records: &RecordSet,
    source: &str,
) -> Result<(Vec<Shape>, ConversionReport), RoiError> {
    let mut report = ConversionReport::new(source);
    report.counts.records = records.len();

    let mut shapes = Vec::new();
    for (name, record) in records.iter() {
        let tag = record.kind_tag();
        let produced = match (tag, tag.and_then(kind_for_tag)) {
            (_, Some(kind)) => build(kind, record)?,
            (None, None) => {
                report.add(ConversionIssue::warning(
                    ConversionIssueCode::MissingKind,
                    name,
                    format!("record '{}' has no type and was dropped", name),
                ));
                Vec::new()
            }
            (Some(tag), None) => {
                report.add(ConversionIssue::warning(
                    ConversionIssueCode::UnsupportedKind,
                    name,
                    format!("record '{}' has unsupported kind '{}' and was dropped", name, tag),
                ));
                Vec::new()
            }
        };
        if produced.len() > 1 {
            report.add(ConversionIssue::info(
                ConversionIssueCode::PointExpansion,
                name,
                format!("record '{}' expanded into {} points", name, produced.len()),
            ));
        }
        for shape in &produced {
            report.count_shape(shape.kind());
        }
        shapes.extend(produced);
    }

    Ok((shapes, report))
}

/// Reads a `.zip` or `.roi` file and converts its records.
///
/// # Errors
/// Fails with [`RoiError::UnsupportedFormat`] before any I/O if the path has
/// another suffix; otherwise propagates read and conversion errors.
pub fn read_from_file(path: &Path) -> Result<Vec<Shape>, RoiError> {
    let format = RoiFormat::from_path(path)?;
    let records = format.read(path)?;
    convert_batch(&records)
}

/// Like [`read_from_file`], also returning the conversion report.
pub fn read_from_file_with_report(
    path: &Path,
) -> Result<(Vec<Shape>, ConversionReport), RoiError> {
    let format = RoiFormat::from_path(path)?;
    let records = format.read(path)?;
    tracing::info!(
        path = %path.display(),
        format = format.name(),
        records = records.len(),
        "converting ROI records"
    );
    convert_batch_with_report(&records, &path.display().to_string())
}

/// Fuzz-only entrypoint: decode a `.roi` blob and convert it.
#[cfg(feature = "fuzzing")]
pub fn fuzz_convert_roi_bytes(data: &[u8]) -> Result<Vec<Shape>, RoiError> {
    let record = crate::imagej::decode_roi(data, "fuzz", Path::new("<fuzz>"))?;
    convert(&record)
}
