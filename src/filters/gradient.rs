//! Sobel gradient stage: magnitude and direction per pixel.
//!
//! For every interior pixel the 3x3 neighborhood is combined into
//!
//! ```text
//! gx = (right column) - (left column), middle row weighted x2
//! gy = (top row) - (bottom row), middle column weighted x2
//! ```
//!
//! Direction is `atan(gy / gx)` in radians, with `gx` replaced by a small
//! epsilon when it is exactly zero. It is derived from the ratio alone, so it
//! lies in (-π/2, π/2) and carries no quadrant information.
//!
//! The one-pixel border is left at 0 in both outputs.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::{fill_row_pairs, Parallelism};
use crate::error::CannyResult;
use crate::grid::{interior, Direction, Magnitude};

/// Stand-in for a zero horizontal gradient when computing `gy / gx`.
pub const GX_EPSILON: f32 = 0.00001;

// Sobel kernels, laid out to match the gx / gy sign conventions above
const KERNEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const KERNEL_Y: [[i32; 3]; 3] = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// How a floating-point magnitude is narrowed to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnitudePolicy {
    /// Saturate at 255
    #[default]
    Clamp,
    /// Truncate and keep the low 8 bits (values above 255 wrap around)
    Wrap,
}

impl MagnitudePolicy {
    /// Narrow a non-negative magnitude to a `u8`.
    #[inline]
    pub fn narrow(self, magnitude: f32) -> u8 {
        match self {
            MagnitudePolicy::Clamp => magnitude.min(255.0) as u8,
            MagnitudePolicy::Wrap => (magnitude as u32 & 0xFF) as u8,
        }
    }
}

/// Sobel response at an interior pixel.
///
/// # Returns
/// `(gx, gy)` as integers; both lie in [-1020, 1020]
#[inline]
pub fn sobel_at(image: &ArrayView2<u8>, y: usize, x: usize) -> (i32, i32) {
    let mut gx = 0i32;
    let mut gy = 0i32;
    for ky in 0..3 {
        for kx in 0..3 {
            let v = image[[y + ky - 1, x + kx - 1]] as i32;
            gx += v * KERNEL_X[ky][kx];
            gy += v * KERNEL_Y[ky][kx];
        }
    }
    (gx, gy)
}

/// Direction in radians for a Sobel response.
#[inline]
pub fn direction_of(gx: i32, gy: i32) -> f32 {
    let denom = if gx == 0 { GX_EPSILON } else { gx as f32 };
    (gy as f32 / denom).atan()
}

/// Compute gradient magnitude and direction for a grayscale image.
///
/// # Arguments
/// * `image` - Single-channel intensity image (height, width)
/// * `policy` - How magnitudes above 255 are narrowed
/// * `parallelism` - Row execution strategy
///
/// # Returns
/// `(magnitude, direction)`, both with the input's shape. Images smaller
/// than 3x3 produce all-zero grids.
pub fn gradient(
    image: ArrayView2<u8>,
    policy: MagnitudePolicy,
    parallelism: Parallelism,
) -> CannyResult<(Magnitude, Direction)> {
    let (height, width) = image.dim();
    let (rows, cols) = interior(height, width);

    fill_row_pairs((height, width), parallelism, |y, mag_row, dir_row| {
        if !rows.contains(&y) {
            return;
        }
        for x in cols.clone() {
            let (gx, gy) = sobel_at(&image, y, x);
            let magnitude = ((gx * gx + gy * gy) as f32).sqrt();
            mag_row[x] = policy.narrow(magnitude);
            dir_row[x] = direction_of(gx, gy);
        }
    })
}
