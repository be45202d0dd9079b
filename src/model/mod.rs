//! OME shape model produced by the converter.
//!
//! This module defines the target side of a conversion: six shape kinds,
//! each with settable geometry and a shared [`ShapeMeta`] carrying the
//! optional `theZ`/`theC`/`theT` indices and the `textValue` label.
//!
//! # Example
//!
//! ```
//! use roishapes::model::{DimensionIndex, Ellipse, Shape};
//!
//! let mut ellipse = Ellipse::new(5.0, 10.0, 5.0, 10.0);
//! ellipse.meta.the_t = Some(DimensionIndex::new(0));
//! ellipse.meta.text_value = Some("nucleus".into());
//!
//! let shape = Shape::from(ellipse);
//! assert_eq!(shape.kind().name(), "Ellipse");
//! ```

mod coord;
mod index;
mod shape;

pub use coord::{points_string, Coord};
pub use index::DimensionIndex;
pub use shape::{Ellipse, Line, Point, Polygon, Polyline, Rectangle, Shape, ShapeKind, ShapeMeta};
