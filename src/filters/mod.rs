//! Canny pipeline stages.
//!
//! ## Stages
//!
//! | Stage | Module | Input | Output |
//! |-------|--------|-------|--------|
//! | Gradient | `gradient` | (H, W) u8 intensity | (H, W) u8 magnitude + (H, W) f32 direction |
//! | Suppression | `suppression` | magnitude + direction | (H, W) u8 thinned magnitude |
//! | Hysteresis | `hysteresis` | thinned magnitude + thresholds | (H, W) u8 edge map (0 / 255) |
//!
//! `canny` chains the three stages. `direction` holds the four-band angle
//! classification shared by suppression and its tests.
//!
//! ## Architecture
//!
//! All stages follow these principles:
//! - **Fresh output** - Every stage allocates a new zeroed grid and never writes to its inputs
//! - **Border policy** - The outermost one-pixel frame is never processed and stays 0
//! - **Deterministic** - Row-parallel execution gives bit-identical results to sequential
//! - **Thread-safe** - Use rayon for row-parallel processing when requested

pub mod canny;
pub mod direction;
pub mod gradient;
pub mod hysteresis;
pub mod suppression;

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::CannyResult;
use crate::grid::Grid;

/// How a stage walks the output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parallelism {
    /// One row after another on the calling thread
    #[default]
    Sequential,
    /// Rows are partitioned across the rayon thread pool
    Rows,
}

/// Allocate a zeroed `rows x cols` grid and fill it row by row.
///
/// `fill` receives the row index and the mutable row slice. It must only
/// read from data that is not being written during this pass.
pub(crate) fn fill_rows<T, F>(
    (rows, cols): (usize, usize),
    parallelism: Parallelism,
    fill: F,
) -> CannyResult<Grid<T>>
where
    T: Copy + Default + Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    let mut flat = vec![T::default(); rows * cols];
    if cols > 0 {
        match parallelism {
            Parallelism::Sequential => flat
                .chunks_mut(cols)
                .enumerate()
                .for_each(|(y, row)| fill(y, row)),
            Parallelism::Rows => flat
                .par_chunks_mut(cols)
                .enumerate()
                .for_each(|(y, row)| fill(y, row)),
        }
    }
    Ok(Array2::from_shape_vec((rows, cols), flat)?)
}

/// Same as [`fill_rows`] for stages that produce two grids of one shape.
pub(crate) fn fill_row_pairs<A, B, F>(
    (rows, cols): (usize, usize),
    parallelism: Parallelism,
    fill: F,
) -> CannyResult<(Grid<A>, Grid<B>)>
where
    A: Copy + Default + Send,
    B: Copy + Default + Send,
    F: Fn(usize, &mut [A], &mut [B]) + Send + Sync,
{
    let mut first = vec![A::default(); rows * cols];
    let mut second = vec![B::default(); rows * cols];
    if cols > 0 {
        match parallelism {
            Parallelism::Sequential => first
                .chunks_mut(cols)
                .zip(second.chunks_mut(cols))
                .enumerate()
                .for_each(|(y, (a, b))| fill(y, a, b)),
            Parallelism::Rows => first
                .par_chunks_mut(cols)
                .zip(second.par_chunks_mut(cols))
                .enumerate()
                .for_each(|(y, (a, b))| fill(y, a, b)),
        }
    }
    Ok((
        Array2::from_shape_vec((rows, cols), first)?,
        Array2::from_shape_vec((rows, cols), second)?,
    ))
}

/// Index of the neighbor at signed offset `delta` from `index`.
///
/// Callers only pass interior indices, so the result is always in bounds.
#[inline]
pub(crate) fn offset(index: usize, delta: isize) -> usize {
    index.wrapping_add_signed(delta)
}
