//! Decoding of the per-record `position` field into zero-based indices.

use serde_json::Value;

use crate::error::RoiError;
use crate::model::{DimensionIndex, ShapeMeta};
use crate::record::RoiRecord;

/// Zero-based (z, c, t) indices resolved from a ROI record.
///
/// `None` means the axis could not be resolved and must not be written onto
/// the shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedPosition {
    pub z: Option<DimensionIndex>,
    pub c: Option<DimensionIndex>,
    pub t: Option<DimensionIndex>,
}

impl Default for ResolvedPosition {
    /// No structured position: z and c unset, first timepoint.
    fn default() -> Self {
        Self {
            z: None,
            c: None,
            t: Some(DimensionIndex::new(0)),
        }
    }
}

/// Resolves a record's `position` into zero-based indices.
///
/// A mapping `{channel, slice, frame}` (1-based) gives c, z and t; all three
/// keys must be present integers. Anything else, including a bare flat
/// index, resolves to the [`Default`] of z/c unset and t = 0.
pub fn resolve_position(record: &RoiRecord) -> Result<ResolvedPosition, RoiError> {
    let Some(Value::Object(position)) = record.get("position") else {
        return Ok(ResolvedPosition::default());
    };

    let axis = |key: &str| -> Result<Option<DimensionIndex>, RoiError> {
        let field = format!("position.{key}");
        let value = position.get(key).ok_or_else(|| RoiError::missing(&field))?;
        let number = value.as_i64().ok_or_else(|| {
            RoiError::malformed(&field, format!("expected an integer, got {value}"))
        })?;
        Ok(DimensionIndex::from_one_based(number))
    };

    Ok(ResolvedPosition {
        z: axis("slice")?,
        c: axis("channel")?,
        t: axis("frame")?,
    })
}

/// Writes resolved indices and the record label onto a shape.
pub(crate) fn attach_metadata(meta: &mut ShapeMeta, position: &ResolvedPosition, record: &RoiRecord) {
    meta.the_c = position.c;
    meta.the_z = position.z;
    meta.the_t = position.t;
    meta.text_value = record.name().map(str::to_string);
}
