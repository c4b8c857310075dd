//! Two-level thresholding of the suppressed magnitude.
//!
//! Every interior pixel is classified against a `(low, high)` pair:
//! - `magnitude < low`: suppressed, never an edge
//! - `magnitude > high`: strong, always an edge
//! - otherwise weak: an edge only if connected to a strong pixel
//!
//! [`HysteresisMode::SingleHop`] checks the 8 immediate neighbors of a weak
//! pixel against `high` and nothing else. [`HysteresisMode::Connected`]
//! follows chains of weak interior pixels from every strong pixel, so a weak
//! pixel two or more hops from a strong one can still become an edge.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{fill_rows, offset, Parallelism};
use crate::error::{CannyError, CannyResult};
use crate::grid::{interior, EdgeMap, EDGE, NON_EDGE};

const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Validated `(low, high)` threshold pair with `0 <= low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    low: i32,
    high: i32,
}

impl Thresholds {
    /// Validate a threshold pair.
    ///
    /// Negative values and `low > high` are rejected; nothing is swapped
    /// or clamped.
    pub fn new(low: i32, high: i32) -> CannyResult<Self> {
        if low < 0 || high < 0 {
            return Err(CannyError::NegativeThreshold { low, high });
        }
        if low > high {
            return Err(CannyError::InvalidThresholds { low, high });
        }
        Ok(Self { low, high })
    }

    /// Lower bound of the weak band.
    pub fn low(&self) -> i32 {
        self.low
    }

    /// Strong pixels are strictly above this value.
    pub fn high(&self) -> i32 {
        self.high
    }

    /// Classify a single magnitude.
    #[inline]
    pub fn classify(&self, magnitude: u8) -> PixelClass {
        let m = magnitude as i32;
        if m < self.low {
            PixelClass::Suppressed
        } else if m > self.high {
            PixelClass::Strong
        } else {
            PixelClass::Weak
        }
    }

    #[inline]
    fn is_strong(&self, magnitude: u8) -> bool {
        magnitude as i32 > self.high
    }
}

/// Strength class of a pixel relative to a threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// Below `low`
    Suppressed,
    /// Between `low` and `high`, inclusive
    Weak,
    /// Above `high`
    Strong,
}

/// How weak pixels are promoted to edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HysteresisMode {
    /// A weak pixel is an edge when one of its 8 neighbors is strong
    #[default]
    SingleHop,
    /// A weak pixel is an edge when an 8-connected chain of weak or strong
    /// interior pixels links it to a strong pixel
    Connected,
}

/// Produce a binary edge map from a suppressed magnitude grid.
///
/// # Arguments
/// * `magnitude` - Suppressed gradient magnitude (height, width)
/// * `thresholds` - Validated `(low, high)` pair
/// * `mode` - Weak pixel promotion rule
/// * `parallelism` - Row execution strategy; `Connected` always runs sequentially
///
/// # Returns
/// Edge map with values 0 or 255 and a zero border
pub fn hysteresis(
    magnitude: ArrayView2<u8>,
    thresholds: Thresholds,
    mode: HysteresisMode,
    parallelism: Parallelism,
) -> CannyResult<EdgeMap> {
    match mode {
        HysteresisMode::SingleHop => single_hop(magnitude, thresholds, parallelism),
        HysteresisMode::Connected => Ok(connected(magnitude, thresholds)),
    }
}

fn single_hop(
    magnitude: ArrayView2<u8>,
    thresholds: Thresholds,
    parallelism: Parallelism,
) -> CannyResult<EdgeMap> {
    let (height, width) = magnitude.dim();
    let (rows, cols) = interior(height, width);

    fill_rows((height, width), parallelism, |y, row| {
        if !rows.contains(&y) {
            return;
        }
        for x in cols.clone() {
            row[x] = match thresholds.classify(magnitude[[y, x]]) {
                PixelClass::Suppressed => NON_EDGE,
                PixelClass::Strong => EDGE,
                PixelClass::Weak => {
                    let has_strong_neighbor = NEIGHBORS_8.iter().any(|&(dy, dx)| {
                        thresholds.is_strong(magnitude[[offset(y, dy), offset(x, dx)]])
                    });
                    if has_strong_neighbor {
                        EDGE
                    } else {
                        NON_EDGE
                    }
                }
            };
        }
    })
}

fn connected(magnitude: ArrayView2<u8>, thresholds: Thresholds) -> EdgeMap {
    let (height, width) = magnitude.dim();
    let (rows, cols) = interior(height, width);
    let mut edges = Array2::<u8>::zeros((height, width));
    if rows.is_empty() {
        return edges;
    }

    // Strong border values seed their interior neighbors as in single-hop
    // mode, but chains only grow through interior pixels.
    let mut visited = Array2::<bool>::from_elem((height, width), false);
    let mut stack = Vec::new();

    for ((y, x), &value) in magnitude.indexed_iter() {
        if !thresholds.is_strong(value) || visited[[y, x]] {
            continue;
        }
        visited[[y, x]] = true;
        stack.push((y, x));

        while let Some((cy, cx)) = stack.pop() {
            for &(dy, dx) in &NEIGHBORS_8 {
                let (ny, nx) = (offset(cy, dy), offset(cx, dx));
                if !rows.contains(&ny) || !cols.contains(&nx) || visited[[ny, nx]] {
                    continue;
                }
                if thresholds.classify(magnitude[[ny, nx]]) != PixelClass::Suppressed {
                    visited[[ny, nx]] = true;
                    stack.push((ny, nx));
                }
            }
        }
    }

    for y in rows {
        for x in cols.clone() {
            if visited[[y, x]] {
                edges[[y, x]] = EDGE;
            }
        }
    }
    edges
}
