#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const HEADER_SIZE: usize = 64;
const HEADER2_SIZE: usize = 64;

/// Geometry for a synthetic ImageJ ROI.
pub enum RoiGeometry {
    /// Type code plus bounding box (left, top, right, bottom).
    Box {
        type_code: u8,
        left: i16,
        top: i16,
        right: i16,
        bottom: i16,
    },
    /// Rectangle carrying the TEXT subtype.
    Text {
        left: i16,
        top: i16,
        right: i16,
        bottom: i16,
    },
    /// Line endpoints.
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    /// Type code plus absolute integer coordinates.
    Coordinates {
        type_code: u8,
        x: Vec<i16>,
        y: Vec<i16>,
    },
}

/// Builds the bytes of an ImageJ `.roi` file (format version 228) with a
/// header 2 carrying the name and the (channel, slice, frame) position.
pub fn roi_bytes(geometry: &RoiGeometry, name: &str, position: (u32, u32, u32)) -> Vec<u8> {
    let mut bytes = vec![0u8; HEADER_SIZE];
    bytes[..4].copy_from_slice(b"Iout");
    bytes[4..6].copy_from_slice(&228u16.to_be_bytes());

    match geometry {
        RoiGeometry::Box {
            type_code,
            left,
            top,
            right,
            bottom,
        } => {
            bytes[6] = *type_code;
            put_box(&mut bytes, *left, *top, *right, *bottom);
        }
        RoiGeometry::Text {
            left,
            top,
            right,
            bottom,
        } => {
            bytes[6] = 1;
            bytes[48..50].copy_from_slice(&1u16.to_be_bytes());
            put_box(&mut bytes, *left, *top, *right, *bottom);
        }
        RoiGeometry::Line { x1, y1, x2, y2 } => {
            bytes[6] = 3;
            bytes[18..22].copy_from_slice(&x1.to_be_bytes());
            bytes[22..26].copy_from_slice(&y1.to_be_bytes());
            bytes[26..30].copy_from_slice(&x2.to_be_bytes());
            bytes[30..34].copy_from_slice(&y2.to_be_bytes());
        }
        RoiGeometry::Coordinates { type_code, x, y } => {
            bytes[6] = *type_code;
            let left = x.iter().copied().min().unwrap_or(0);
            let top = y.iter().copied().min().unwrap_or(0);
            let right = x.iter().copied().max().unwrap_or(0);
            let bottom = y.iter().copied().max().unwrap_or(0);
            put_box(&mut bytes, left, top, right, bottom);
            bytes[16..18].copy_from_slice(&(x.len() as u16).to_be_bytes());
            for dx in x.iter().map(|v| v - left) {
                bytes.extend_from_slice(&dx.to_be_bytes());
            }
            for dy in y.iter().map(|v| v - top) {
                bytes.extend_from_slice(&dy.to_be_bytes());
            }
        }
    }

    let header2 = bytes.len();
    bytes.resize(header2 + HEADER2_SIZE, 0);
    bytes[60..64].copy_from_slice(&(header2 as u32).to_be_bytes());

    let (channel, slice, frame) = position;
    bytes[header2 + 4..header2 + 8].copy_from_slice(&channel.to_be_bytes());
    bytes[header2 + 8..header2 + 12].copy_from_slice(&slice.to_be_bytes());
    bytes[header2 + 12..header2 + 16].copy_from_slice(&frame.to_be_bytes());

    let name_offset = bytes.len();
    let units: Vec<u16> = name.encode_utf16().collect();
    for unit in &units {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes[header2 + 16..header2 + 20].copy_from_slice(&(name_offset as u32).to_be_bytes());
    bytes[header2 + 20..header2 + 24].copy_from_slice(&(units.len() as u32).to_be_bytes());

    bytes
}

fn put_box(bytes: &mut [u8], left: i16, top: i16, right: i16, bottom: i16) {
    bytes[8..10].copy_from_slice(&top.to_be_bytes());
    bytes[10..12].copy_from_slice(&left.to_be_bytes());
    bytes[12..14].copy_from_slice(&bottom.to_be_bytes());
    bytes[14..16].copy_from_slice(&right.to_be_bytes());
}

pub fn write_roi(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bytes).expect("write roi file");
}

/// Writes a ROI Manager style `.zip` with one entry per `(entry name, bytes)`.
pub fn write_roi_zip(path: &Path, entries: &[(&str, Vec<u8>)]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    let file = File::create(path).expect("create zip file");
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, bytes) in entries {
        zip.start_file(*name, options).expect("start zip entry");
        zip.write_all(bytes).expect("write zip entry");
    }
    zip.finish().expect("finish zip");
}

/// A small ROI Manager export mixing every supported kind and a text ROI.
pub fn sample_archive_entries() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        (
            "0001-rect.roi",
            roi_bytes(
                &RoiGeometry::Box {
                    type_code: 1,
                    left: 10,
                    top: 20,
                    right: 40,
                    bottom: 60,
                },
                "rect",
                (1, 2, 3),
            ),
        ),
        (
            "0002-oval.roi",
            roi_bytes(
                &RoiGeometry::Box {
                    type_code: 2,
                    left: 0,
                    top: 0,
                    right: 10,
                    bottom: 20,
                },
                "oval",
                (0, 0, 0),
            ),
        ),
        (
            "0003-spots.roi",
            roi_bytes(
                &RoiGeometry::Coordinates {
                    type_code: 10,
                    x: vec![5, 7, 9],
                    y: vec![1, 2, 3],
                },
                "spots",
                (2, 1, 1),
            ),
        ),
        (
            "0004-line.roi",
            roi_bytes(
                &RoiGeometry::Line {
                    x1: 1.5,
                    y1: 2.0,
                    x2: 8.0,
                    y2: 9.5,
                },
                "line",
                (0, 0, 0),
            ),
        ),
        (
            "0005-outline.roi",
            roi_bytes(
                &RoiGeometry::Coordinates {
                    type_code: 7,
                    x: vec![0, 4, 4],
                    y: vec![0, 0, 3],
                },
                "outline",
                (0, 0, 0),
            ),
        ),
        (
            "0006-path.roi",
            roi_bytes(
                &RoiGeometry::Coordinates {
                    type_code: 9,
                    x: vec![0, 5, 10],
                    y: vec![10, 0, 10],
                },
                "path",
                (0, 0, 0),
            ),
        ),
        (
            "0007-caption.roi",
            roi_bytes(
                &RoiGeometry::Text {
                    left: 0,
                    top: 0,
                    right: 50,
                    bottom: 12,
                },
                "caption",
                (0, 0, 0),
            ),
        ),
    ]
}
