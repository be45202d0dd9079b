//! Binary decoder for single ImageJ `.roi` records.
//!
//! ImageJ stores each ROI as a big-endian blob: a 64-byte header, an
//! optional coordinate block, and an optional second header holding the
//! hyperstack position and the ROI name. Both headers are read zero-copy
//! as `#[repr(C)]` views; only the fields the converter consumes are used.

use std::path::Path;

use serde_json::{json, Value};
use zerocopy::byteorder::{BigEndian, F32, I16, I32, U16, U32};
use zerocopy::FromBytes;
use zerocopy_derive::{FromBytes as DeriveFromBytes, Immutable, KnownLayout, Unaligned};

use crate::error::RoiError;
use crate::record::RoiRecord;

const MAGIC: &[u8; 4] = b"Iout";

const OPTION_SUB_PIXEL_RESOLUTION: u16 = 128;
const SUBTYPE_TEXT: u16 = 1;

/// Header 1, at the start of every `.roi` record (64 bytes).
#[allow(dead_code)]
#[repr(C)]
#[derive(Debug, DeriveFromBytes, Immutable, KnownLayout, Unaligned)]
#[cfg_attr(test, derive(zerocopy_derive::IntoBytes))]
struct RoiHeader {
    magic: [u8; 4],
    version: U16<BigEndian>,
    type_code: u8,
    _reserved: u8,
    top: I16<BigEndian>,
    left: I16<BigEndian>,
    bottom: I16<BigEndian>,
    right: I16<BigEndian>,
    n_coordinates: U16<BigEndian>,
    /// Line endpoints, or x/y/width/height of a sub-pixel rectangle.
    x1: F32<BigEndian>,
    y1: F32<BigEndian>,
    x2: F32<BigEndian>,
    y2: F32<BigEndian>,
    stroke_width: I16<BigEndian>,
    shape_roi_size: I32<BigEndian>,
    stroke_color: U32<BigEndian>,
    fill_color: U32<BigEndian>,
    subtype: U16<BigEndian>,
    options: U16<BigEndian>,
    /// Arrow style and head size, rounded-rect arc size.
    style: [u8; 4],
    position: U32<BigEndian>,
    header2_offset: U32<BigEndian>,
}

/// The leading part of header 2, up to and including the image size field.
#[allow(dead_code)]
#[repr(C)]
#[derive(Debug, DeriveFromBytes, Immutable, KnownLayout, Unaligned)]
#[cfg_attr(test, derive(zerocopy_derive::IntoBytes))]
struct RoiHeader2 {
    _reserved: [u8; 4],
    c_position: U32<BigEndian>,
    z_position: U32<BigEndian>,
    t_position: U32<BigEndian>,
    name_offset: U32<BigEndian>,
    name_length: U32<BigEndian>,
    overlay_label_color: U32<BigEndian>,
    overlay_font_size: U16<BigEndian>,
    group: u8,
    image_opacity: u8,
    image_size: U32<BigEndian>,
}

/// ImageJ ROI type codes, as stored in the type byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RoiType {
    Polygon,
    Rect,
    Oval,
    Line,
    Freeline,
    Polyline,
    NoRoi,
    Freehand,
    Traced,
    Angle,
    Point,
}

impl RoiType {
    fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => RoiType::Polygon,
            1 => RoiType::Rect,
            2 => RoiType::Oval,
            3 => RoiType::Line,
            4 => RoiType::Freeline,
            5 => RoiType::Polyline,
            6 => RoiType::NoRoi,
            7 => RoiType::Freehand,
            8 => RoiType::Traced,
            9 => RoiType::Angle,
            10 => RoiType::Point,
            _ => return None,
        })
    }

    /// Kind tag written into the record's `type` field.
    fn tag(&self) -> &'static str {
        match self {
            RoiType::Polygon => "polygon",
            RoiType::Rect => "rectangle",
            RoiType::Oval => "oval",
            RoiType::Line => "line",
            RoiType::Freeline => "freeline",
            RoiType::Polyline => "polyline",
            RoiType::NoRoi => "noRoi",
            RoiType::Freehand => "freehand",
            RoiType::Traced => "traced",
            RoiType::Angle => "angle",
            RoiType::Point => "point",
        }
    }
}

/// Decodes one ImageJ `.roi` blob into a ROI record.
///
/// `default_name` is used as the record's `name` when the blob does not
/// carry one (ImageJ uses the file or archive entry stem). `source` only
/// labels errors.
pub fn decode_roi(data: &[u8], default_name: &str, source: &Path) -> Result<RoiRecord, RoiError> {
    let error = |message: String| RoiError::RoiDecode {
        path: source.to_path_buf(),
        message,
    };

    if !data.starts_with(MAGIC) {
        return Err(error("missing 'Iout' magic".to_string()));
    }

    let (header, body) = RoiHeader::ref_from_prefix(data).map_err(|_| {
        error(format!(
            "truncated record: header needs {} bytes, have {}",
            std::mem::size_of::<RoiHeader>(),
            data.len()
        ))
    })?;

    let version = header.version.get();
    let left = header.left.get();
    let top = header.top.get();
    let sub_pixel = header.options.get() & OPTION_SUB_PIXEL_RESOLUTION != 0;

    let mut record = RoiRecord::new();

    match RoiType::from_code(header.type_code) {
        _ if header.shape_roi_size.get() > 0 => {
            record.insert("type", "composite");
            insert_box(&mut record, header);
        }
        Some(roi_type @ (RoiType::Rect | RoiType::Oval)) => {
            let tag = if roi_type == RoiType::Rect && header.subtype.get() == SUBTYPE_TEXT {
                "text"
            } else {
                roi_type.tag()
            };
            record.insert("type", tag);

            if sub_pixel && version >= 223 {
                record.insert("left", f32_value(header.x1));
                record.insert("top", f32_value(header.y1));
                record.insert("width", f32_value(header.x2));
                record.insert("height", f32_value(header.y2));
            } else {
                insert_box(&mut record, header);
            }
        }
        Some(RoiType::Line) => {
            record.insert("type", RoiType::Line.tag());
            record.insert("x1", f32_value(header.x1));
            record.insert("y1", f32_value(header.y1));
            record.insert("x2", f32_value(header.x2));
            record.insert("y2", f32_value(header.y2));
        }
        Some(RoiType::NoRoi) => {
            record.insert("type", RoiType::NoRoi.tag());
        }
        Some(roi_type) => {
            let n = usize::from(header.n_coordinates.get());
            record.insert("type", roi_type.tag());
            record.insert("n", n);

            let truncated = || {
                error(format!(
                    "truncated record: coordinate block for {} vertices exceeds {} bytes",
                    n,
                    data.len()
                ))
            };
            let (xs, rest) =
                <[I16<BigEndian>]>::ref_from_prefix_with_elems(body, n).map_err(|_| truncated())?;
            let (ys, rest) =
                <[I16<BigEndian>]>::ref_from_prefix_with_elems(rest, n).map_err(|_| truncated())?;

            let (x, y): (Vec<Value>, Vec<Value>) = if sub_pixel && version >= 222 {
                let (xf, rest) =
                    <[F32<BigEndian>]>::ref_from_prefix_with_elems(rest, n).map_err(|_| truncated())?;
                let (yf, _) =
                    <[F32<BigEndian>]>::ref_from_prefix_with_elems(rest, n).map_err(|_| truncated())?;
                (
                    xf.iter().copied().map(f32_value).collect(),
                    yf.iter().copied().map(f32_value).collect(),
                )
            } else {
                let absolute = |origin: i16, delta: I16<BigEndian>| {
                    json!(i32::from(origin) + i32::from(delta.get().max(0)))
                };
                (
                    xs.iter().map(|&dx| absolute(left, dx)).collect(),
                    ys.iter().map(|&dy| absolute(top, dy)).collect(),
                )
            };
            record.insert("x", x);
            record.insert("y", y);
        }
        None => {
            record.insert("type", format!("unknown({})", header.type_code));
        }
    }

    let header2 = read_header2(data, header);

    let name = match header2 {
        Some(h2) => read_name(data, h2).map_err(|_| error("ROI name is not valid UTF-16".into()))?,
        None => None,
    };
    record.insert("name", name.unwrap_or_else(|| default_name.to_string()));

    let flat_position = header.position.get();
    let position = match header2 {
        Some(h2) => {
            let channel = h2.c_position.get();
            let slice = h2.z_position.get();
            let frame = h2.t_position.get();
            if channel > 0 || slice > 0 || frame > 0 {
                json!({"channel": channel, "slice": slice, "frame": frame})
            } else {
                json!(flat_position)
            }
        }
        None => json!(flat_position),
    };
    record.insert("position", position);

    Ok(record)
}

fn insert_box(record: &mut RoiRecord, header: &RoiHeader) {
    let (left, top) = (header.left.get(), header.top.get());
    record.insert("left", left);
    record.insert("top", top);
    record.insert("width", i32::from(header.right.get()) - i32::from(left));
    record.insert("height", i32::from(header.bottom.get()) - i32::from(top));
}

fn f32_value(value: F32<BigEndian>) -> Value {
    Value::from(f64::from(value.get()))
}

/// Header 2, if the offset is set and the whole block lies inside the record.
fn read_header2<'a>(data: &'a [u8], header: &RoiHeader) -> Option<&'a RoiHeader2> {
    let offset = usize::try_from(header.header2_offset.get()).ok()?;
    if offset == 0 {
        return None;
    }
    let (h2, _) = RoiHeader2::ref_from_prefix(data.get(offset..)?).ok()?;
    Some(h2)
}

/// Reads the UTF-16BE ROI name stored through header 2, if any.
///
/// A name whose bytes run past the end of the record is ignored.
fn read_name(data: &[u8], h2: &RoiHeader2) -> Result<Option<String>, std::string::FromUtf16Error> {
    let (Ok(offset), Ok(length)) = (
        usize::try_from(h2.name_offset.get()),
        usize::try_from(h2.name_length.get()),
    ) else {
        return Ok(None);
    };
    if offset == 0 || length == 0 {
        return Ok(None);
    }
    let Some(units) = data
        .get(offset..)
        .and_then(|bytes| <[U16<BigEndian>]>::ref_from_prefix_with_elems(bytes, length).ok())
        .map(|(units, _)| units)
    else {
        return Ok(None);
    };

    let units: Vec<u16> = units.iter().map(|unit| unit.get()).collect();
    String::from_utf16(&units).map(Some)
}
