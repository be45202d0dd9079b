//! Newtype for zero-based dimension indices (z-section, channel, timepoint).
//!
//! Upstream ROI records count planes from 1 and use 0 (or nothing) for
//! "not set". Shapes count from 0, so an index is only ever constructed once
//! it has been shifted and found to be non-negative.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based index along the z, c or t axis of an image.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionIndex(pub u32);

impl DimensionIndex {
    /// Creates a new DimensionIndex.
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Converts a 1-based plane number into a zero-based index.
    ///
    /// Returns `None` when the shifted value would be negative, which is how
    /// ImageJ marks an axis the ROI is not bound to.
    pub fn from_one_based(value: i64) -> Option<Self> {
        let shifted = value.checked_sub(1)?;
        u32::try_from(shifted).ok().map(Self)
    }

    /// Returns the underlying u32 value.
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DimensionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DimensionIndex({})", self.0)
    }
}

impl fmt::Display for DimensionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for DimensionIndex {
    fn from(index: u32) -> Self {
        DimensionIndex::new(index)
    }
}
