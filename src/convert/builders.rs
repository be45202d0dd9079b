//! Per-kind shape builders.
//!
//! Each builder reads the geometry fields of one ROI kind and produces OME
//! shapes with position metadata and label attached. Point records expand
//! to one shape per coordinate pair; every other kind yields one shape.

use super::position::{attach_metadata, resolve_position};
use crate::error::RoiError;
use crate::model::{Coord, Ellipse, Line, Point, Polygon, Polyline, Rectangle, Shape};
use crate::record::RoiRecord;

/// One Point per `x`/`y` pair, all sharing the record's label and position.
pub fn build_points(record: &RoiRecord) -> Result<Vec<Shape>, RoiError> {
    let position = resolve_position(record)?;
    let shapes = read_vertices(record)?
        .into_iter()
        .map(|vertex| {
            let mut point = Point::new(vertex.x, vertex.y);
            attach_metadata(&mut point.meta, &position, record);
            Shape::from(point)
        })
        .collect();
    Ok(shapes)
}

pub fn build_rectangle(record: &RoiRecord) -> Result<Shape, RoiError> {
    let rectangle = Rectangle::new(
        record.require_f64("left")?,
        record.require_f64("top")?,
        record.require_f64("width")?,
        record.require_f64("height")?,
    );
    finish(rectangle, record)
}

pub fn build_line(record: &RoiRecord) -> Result<Shape, RoiError> {
    let line = Line::new(
        record.require_f64("x1")?,
        record.require_f64("y1")?,
        record.require_f64("x2")?,
        record.require_f64("y2")?,
    );
    finish(line, record)
}

/// Converts an ImageJ oval (bounding box) into a center + semi-axes ellipse.
pub fn build_ellipse(record: &RoiRecord) -> Result<Shape, RoiError> {
    let left = record.require_f64("left")?;
    let top = record.require_f64("top")?;
    let radius_x = record.require_f64("width")? / 2.0;
    let radius_y = record.require_f64("height")? / 2.0;

    let ellipse = Ellipse::new(left + radius_x, top + radius_y, radius_x, radius_y);
    finish(ellipse, record)
}

pub fn build_polygon(record: &RoiRecord) -> Result<Shape, RoiError> {
    build_path(record, |vertices| Polygon::from_vertices(vertices).into())
}

pub fn build_polyline(record: &RoiRecord) -> Result<Shape, RoiError> {
    build_path(record, |vertices| Polyline::from_vertices(vertices).into())
}

/// Shared construction for vertex-list shapes; `make` picks the target kind.
fn build_path(record: &RoiRecord, make: fn(&[Coord]) -> Shape) -> Result<Shape, RoiError> {
    let vertices = read_vertices(record)?;
    finish(make(&vertices), record)
}

fn finish(shape: impl Into<Shape>, record: &RoiRecord) -> Result<Shape, RoiError> {
    let mut shape = shape.into();
    let position = resolve_position(record)?;
    attach_metadata(shape.meta_mut(), &position, record);
    Ok(shape)
}

/// Zips the parallel `x` and `y` sequences into vertices.
fn read_vertices(record: &RoiRecord) -> Result<Vec<Coord>, RoiError> {
    let xs = record.require_f64_seq("x")?;
    let ys = record.require_f64_seq("y")?;
    if xs.len() != ys.len() {
        return Err(RoiError::malformed(
            "y",
            format!("has {} item(s) but x has {}", ys.len(), xs.len()),
        ));
    }

    Ok(xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| Coord::new(x, y))
        .collect())
}
