//! OME shape types produced by the converter.
//!
//! Each shape carries its own geometry plus a shared [`ShapeMeta`] holding the
//! dimension indices and the text label. Field names serialize in the OME
//! camelCase spelling (`theZ`, `radiusX`, `textValue`, ...).

use serde::Serialize;
use std::fmt;

use super::coord::{points_string, Coord};
use super::index::DimensionIndex;

/// The six shape kinds the converter can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Point,
    Rectangle,
    Line,
    Ellipse,
    Polygon,
    Polyline,
}

impl ShapeKind {
    /// Human-readable name for the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Point => "Point",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Line => "Line",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Polyline => "Polyline",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position and label metadata shared by every shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeMeta {
    /// Zero-based z-section, if the ROI is bound to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub the_z: Option<DimensionIndex>,

    /// Zero-based channel, if the ROI is bound to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub the_c: Option<DimensionIndex>,

    /// Zero-based timepoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub the_t: Option<DimensionIndex>,

    /// Label copied from the ROI name.
    pub text_value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub meta: ShapeMeta,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            meta: ShapeMeta::default(),
        }
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub meta: ShapeMeta,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            meta: ShapeMeta::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(flatten)]
    pub meta: ShapeMeta,
}

impl Line {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            meta: ShapeMeta::default(),
        }
    }
}

/// An axis-aligned ellipse given by its center and semi-axes.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ellipse {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    #[serde(flatten)]
    pub meta: ShapeMeta,
}

impl Ellipse {
    pub fn new(x: f64, y: f64, radius_x: f64, radius_y: f64) -> Self {
        Self {
            x,
            y,
            radius_x,
            radius_y,
            meta: ShapeMeta::default(),
        }
    }
}

/// A closed polygon. `points` is an OME points string (`"x,y x,y ..."`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    pub points: String,
    #[serde(flatten)]
    pub meta: ShapeMeta,
}

impl Polygon {
    pub fn from_vertices(vertices: &[Coord]) -> Self {
        Self {
            points: points_string(vertices),
            meta: ShapeMeta::default(),
        }
    }
}

/// An open polyline. `points` uses the same encoding as [`Polygon`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polyline {
    pub points: String,
    #[serde(flatten)]
    pub meta: ShapeMeta,
}

impl Polyline {
    pub fn from_vertices(vertices: &[Coord]) -> Self {
        Self {
            points: points_string(vertices),
            meta: ShapeMeta::default(),
        }
    }
}

/// Any OME shape produced by the converter.
///
/// Serializes as an object tagged with `"type"`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Shape {
    Point(Point),
    Rectangle(Rectangle),
    Line(Line),
    Ellipse(Ellipse),
    Polygon(Polygon),
    Polyline(Polyline),
}

impl Shape {
    /// The kind of this shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point(_) => ShapeKind::Point,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Polyline(_) => ShapeKind::Polyline,
        }
    }

    pub fn meta(&self) -> &ShapeMeta {
        match self {
            Shape::Point(s) => &s.meta,
            Shape::Rectangle(s) => &s.meta,
            Shape::Line(s) => &s.meta,
            Shape::Ellipse(s) => &s.meta,
            Shape::Polygon(s) => &s.meta,
            Shape::Polyline(s) => &s.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut ShapeMeta {
        match self {
            Shape::Point(s) => &mut s.meta,
            Shape::Rectangle(s) => &mut s.meta,
            Shape::Line(s) => &mut s.meta,
            Shape::Ellipse(s) => &mut s.meta,
            Shape::Polygon(s) => &mut s.meta,
            Shape::Polyline(s) => &mut s.meta,
        }
    }
}

impl From<Point> for Shape {
    fn from(shape: Point) -> Self {
        Shape::Point(shape)
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Line> for Shape {
    fn from(shape: Line) -> Self {
        Shape::Line(shape)
    }
}

impl From<Ellipse> for Shape {
    fn from(shape: Ellipse) -> Self {
        Shape::Ellipse(shape)
    }
}

impl From<Polygon> for Shape {
    fn from(shape: Polygon) -> Self {
        Shape::Polygon(shape)
    }
}

impl From<Polyline> for Shape {
    fn from(shape: Polyline) -> Self {
        Shape::Polyline(shape)
    }
}

/// One-line summary, used by the CLI's text output.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        match self {
            Shape::Point(s) => write!(f, " x={} y={}", s.x, s.y)?,
            Shape::Rectangle(s) => write!(
                f,
                " x={} y={} width={} height={}",
                s.x, s.y, s.width, s.height
            )?,
            Shape::Line(s) => write!(f, " x1={} y1={} x2={} y2={}", s.x1, s.y1, s.x2, s.y2)?,
            Shape::Ellipse(s) => write!(
                f,
                " x={} y={} radiusX={} radiusY={}",
                s.x, s.y, s.radius_x, s.radius_y
            )?,
            Shape::Polygon(s) => write!(f, " points=\"{}\"", s.points)?,
            Shape::Polyline(s) => write!(f, " points=\"{}\"", s.points)?,
        }

        let meta = self.meta();
        if let Some(z) = meta.the_z {
            write!(f, " z={}", z)?;
        }
        if let Some(c) = meta.the_c {
            write!(f, " c={}", c)?;
        }
        if let Some(t) = meta.the_t {
            write!(f, " t={}", t)?;
        }
        if let Some(label) = &meta.text_value {
            write!(f, " label={:?}", label)?;
        }
        Ok(())
    }
}
