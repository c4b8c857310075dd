//! Non-maximum suppression along the gradient direction.
//!
//! Each interior pixel keeps its magnitude only when it is not strictly
//! smaller than either of its two neighbors along the direction band picked
//! by [`DirectionBucket`]. Neighbor values are always read from the input
//! grid, and the result goes to a new grid, so traversal order never changes
//! the outcome.

use ndarray::ArrayView2;

use super::direction::DirectionBucket;
use super::{fill_rows, offset, Parallelism};
use crate::error::CannyResult;
use crate::grid::{ensure_same_shape, interior, Magnitude};

/// Thin a magnitude grid to its local maxima.
///
/// # Arguments
/// * `magnitude` - Gradient magnitude (height, width)
/// * `direction` - Gradient direction in radians, same shape
/// * `parallelism` - Row execution strategy
///
/// # Returns
/// Suppressed magnitude with a zero border. Fails with a shape error when
/// the two inputs differ in shape.
pub fn non_max_suppression(
    magnitude: ArrayView2<u8>,
    direction: ArrayView2<f32>,
    parallelism: Parallelism,
) -> CannyResult<Magnitude> {
    ensure_same_shape(magnitude.dim(), direction.dim(), "direction grid")?;
    let (height, width) = magnitude.dim();
    let (rows, cols) = interior(height, width);

    fill_rows((height, width), parallelism, |y, row| {
        if !rows.contains(&y) {
            return;
        }
        for x in cols.clone() {
            let value = magnitude[[y, x]];
            let bucket = DirectionBucket::from_radians(direction[[y, x]]);
            let [(dy0, dx0), (dy1, dx1)] = bucket.neighbor_offsets();
            let previous = magnitude[[offset(y, dy0), offset(x, dx0)]];
            let next = magnitude[[offset(y, dy1), offset(x, dx1)]];

            row[x] = if value < previous || value < next { 0 } else { value };
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::gradient::{gradient, MagnitudePolicy};
    use ndarray::Array2;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_horizontal_band_compares_left_and_right() {
        let mag = Array2::from_shape_vec((3, 3), vec![0, 90, 0, 50, 60, 70, 0, 90, 0]).unwrap();
        let dir = Array2::<f32>::zeros((3, 3));
        let out = non_max_suppression(mag.view(), dir.view(), Parallelism::Sequential).unwrap();
        // Right neighbor (70) is larger
        assert_eq!(out[[1, 1]], 0);

        let mag = Array2::from_shape_vec((3, 3), vec![0, 90, 0, 50, 80, 70, 0, 90, 0]).unwrap();
        let out = non_max_suppression(mag.view(), dir.view(), Parallelism::Sequential).unwrap();
        // Vertical neighbors are ignored in the horizontal band
        assert_eq!(out[[1, 1]], 80);
    }

    #[test]
    fn test_diagonal_bands() {
        #[rustfmt::skip]
        let mag = Array2::from_shape_vec((3, 3), vec![
            10, 0, 90,
            0, 50, 0,
            90, 0, 10,
        ]).unwrap();

        // 22.5° -> 45° band -> anti-diagonal neighbors (90, 90)
        let dir = Array2::from_elem((3, 3), FRAC_PI_4 * 0.5);
        let out = non_max_suppression(mag.view(), dir.view(), Parallelism::Sequential).unwrap();
        assert_eq!(out[[1, 1]], 0);

        // -22.5° folds to 337.5° -> 180° band -> left/right (0, 0)
        let dir = Array2::from_elem((3, 3), -FRAC_PI_4 * 0.5);
        let out = non_max_suppression(mag.view(), dir.view(), Parallelism::Sequential).unwrap();
        assert_eq!(out[[1, 1]], 50);

        // -67.5° folds to 292.5° -> 135° band -> main diagonal (10, 10)
        let dir = Array2::from_elem((3, 3), -FRAC_PI_4 * 1.5);
        let out = non_max_suppression(mag.view(), dir.view(), Parallelism::Sequential).unwrap();
        assert_eq!(out[[1, 1]], 50);
    }

    #[test]
    fn test_equal_neighbors_are_kept() {
        let mag = Array2::from_elem((3, 3), 40u8);
        let dir = Array2::<f32>::zeros((3, 3));
        let out = non_max_suppression(mag.view(), dir.view(), Parallelism::Sequential).unwrap();
        assert_eq!(out[[1, 1]], 40);
        // Border is never copied through
        assert_eq!(out[[0, 0]], 0);
    }

    #[test]
    fn test_reads_pre_suppression_values() {
        // Falling magnitudes in the horizontal band.
        // An in-place left-to-right pass would zero (1,2) first and then
        // wrongly keep (1,3).
        #[rustfmt::skip]
        let mag = Array2::from_shape_vec((3, 6), vec![
            0, 0, 0, 0, 0, 0,
            0, 90, 50, 40, 0, 0,
            0, 0, 0, 0, 0, 0,
        ]).unwrap();
        let dir = Array2::<f32>::zeros((3, 6));
        let out = non_max_suppression(mag.view(), dir.view(), Parallelism::Sequential).unwrap();
        assert_eq!(out.row(1).to_vec(), vec![0, 90, 0, 0, 0, 0]);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let mag = Array2::<u8>::zeros((4, 4));
        let dir = Array2::<f32>::zeros((4, 5));
        assert!(non_max_suppression(mag.view(), dir.view(), Parallelism::Sequential).is_err());
    }

    #[test]
    fn test_idempotent_on_real_gradient() {
        let img = Array2::from_shape_fn((24, 24), |(y, x)| {
            let dy = y as f32 - 11.5;
            let dx = x as f32 - 11.5;
            if dx * dx + dy * dy < 64.0 { 220 } else { 30 }
        });
        let (mag, dir) = gradient(img.view(), MagnitudePolicy::Clamp, Parallelism::Sequential).unwrap();
        let once = non_max_suppression(mag.view(), dir.view(), Parallelism::Sequential).unwrap();
        let twice = non_max_suppression(once.view(), dir.view(), Parallelism::Rows).unwrap();
        assert_eq!(once, twice);
    }
}
