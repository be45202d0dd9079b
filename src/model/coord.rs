//! Plain 2D coordinates and the ordered-points string used by polygons and
//! polylines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D coordinate in image pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    /// Creates a new coordinate with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Formats as `x,y`, the token used inside an OME points string.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Joins vertices into an OME points string: one `x,y` token per vertex,
/// separated by single spaces, in input order.
///
/// No closing vertex is appended; polygon closure is up to the renderer.
pub fn points_string(vertices: &[Coord]) -> String {
    vertices
        .iter()
        .map(Coord::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
