//! Pixel grids used by every pipeline stage.
//!
//! All grids are `ndarray::Array2` values in standard (row-major) layout with
//! shape `(rows, cols)`. Each stage allocates its own output grid filled with
//! zeros, which is what gives the one-pixel border its 0 value.

use std::ops::Range;

use ndarray::Array2;

use crate::error::{CannyError, CannyResult};

/// Owned 2D grid, row-major, fixed size once created.
pub type Grid<T> = Array2<T>;

/// Single-channel 8-bit intensity image.
pub type Image = Grid<u8>;

/// Gradient magnitude, narrowed to 8 bits.
pub type Magnitude = Grid<u8>;

/// Gradient direction in radians, as produced by `atan(gy / gx)`.
pub type Direction = Grid<f32>;

/// Binary edge map: every value is either [`EDGE`] or [`NON_EDGE`].
pub type EdgeMap = Grid<u8>;

/// Value written for an edge pixel.
pub const EDGE: u8 = 255;

/// Value written for a non-edge pixel.
pub const NON_EDGE: u8 = 0;

/// Smallest dimension that still has an interior pixel.
pub const MIN_DIMENSION: usize = 3;

/// Build an image from a flat row-major buffer.
///
/// # Arguments
/// * `data` - Intensities, `rows * cols` values
/// * `rows` - Image height
/// * `cols` - Image width
pub fn from_raw(data: Vec<u8>, rows: usize, cols: usize) -> CannyResult<Image> {
    if data.len() != rows * cols {
        return Err(CannyError::Shape(format!(
            "buffer holds {} values, expected {rows}x{cols} = {}",
            data.len(),
            rows * cols
        )));
    }
    Ok(Array2::from_shape_vec((rows, cols), data)?)
}

/// Interior row and column ranges for a `rows x cols` grid.
///
/// Both ranges are empty when either dimension is below [`MIN_DIMENSION`].
pub fn interior(rows: usize, cols: usize) -> (Range<usize>, Range<usize>) {
    if is_degenerate(rows, cols) {
        return (0..0, 0..0);
    }
    (1..rows - 1, 1..cols - 1)
}

/// True when a `rows x cols` grid has no interior pixels.
pub fn is_degenerate(rows: usize, cols: usize) -> bool {
    rows < MIN_DIMENSION || cols < MIN_DIMENSION
}

/// Number of edge pixels in an edge map.
pub fn count_edges(edges: &EdgeMap) -> usize {
    edges.iter().filter(|&&v| v == EDGE).count()
}

/// Fail with [`CannyError::Shape`] unless both shapes agree.
pub(crate) fn ensure_same_shape(
    a: (usize, usize),
    b: (usize, usize),
    what: &str,
) -> CannyResult<()> {
    if a != b {
        return Err(CannyError::Shape(format!("{what}: {a:?} does not match {b:?}")));
    }
    Ok(())
}
