//! Canny edge detection: gradient, suppression, hysteresis.
//!
//! The input is expected to be denoised already (e.g. Gaussian blurred by
//! the caller); no smoothing happens here. Thresholds are validated before
//! any grid is allocated, and every call owns all of its intermediate grids.

use std::time::Instant;

use log::{debug, trace};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::gradient::{gradient, MagnitudePolicy};
use super::hysteresis::{hysteresis, HysteresisMode, Thresholds};
use super::suppression::non_max_suppression;
use super::Parallelism;
use crate::error::CannyResult;
use crate::grid::{count_edges, is_degenerate, Direction, EdgeMap, Magnitude};

/// Pipeline configuration.
///
/// Every field has a default, so a partial document deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyConfig {
    /// Lower hysteresis threshold
    pub low: i32,
    /// Upper hysteresis threshold
    pub high: i32,
    /// How magnitudes above 255 are narrowed to 8 bits
    pub magnitude_policy: MagnitudePolicy,
    /// Weak pixel promotion rule
    pub hysteresis: HysteresisMode,
    /// Row execution strategy
    pub parallelism: Parallelism,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            low: 40,
            high: 60,
            magnitude_policy: MagnitudePolicy::Clamp,
            hysteresis: HysteresisMode::SingleHop,
            parallelism: Parallelism::Sequential,
        }
    }
}

impl CannyConfig {
    /// Default configuration with the given thresholds.
    pub fn with_thresholds(low: i32, high: i32) -> Self {
        Self {
            low,
            high,
            ..Self::default()
        }
    }

    /// Validate the threshold pair.
    pub fn thresholds(&self) -> CannyResult<Thresholds> {
        Thresholds::new(self.low, self.high)
    }
}

/// Edge map together with every intermediate grid and stage timings.
#[derive(Debug, Clone)]
pub struct CannyReport {
    /// Final edge map, values 0 or 255
    pub edges: EdgeMap,
    /// Gradient magnitude before suppression
    pub magnitude: Magnitude,
    /// Gradient direction in radians
    pub direction: Direction,
    /// Magnitude after non-maximum suppression
    pub suppressed: Magnitude,
    /// Number of 255-valued pixels in `edges`
    pub edge_count: usize,
    /// Wall time of the gradient stage in milliseconds
    pub gradient_ms: f64,
    /// Wall time of non-maximum suppression in milliseconds
    pub suppression_ms: f64,
    /// Wall time of hysteresis in milliseconds
    pub hysteresis_ms: f64,
}

/// Run Canny edge detection with default settings.
///
/// # Arguments
/// * `image` - Denoised single-channel image (height, width)
/// * `low` - Lower hysteresis threshold, `>= 0`
/// * `high` - Upper hysteresis threshold, `>= low`
///
/// # Returns
/// Edge map of the same shape with values 0 or 255
pub fn canny(image: ArrayView2<u8>, low: i32, high: i32) -> CannyResult<EdgeMap> {
    canny_with_config(image, &CannyConfig::with_thresholds(low, high))
}

/// Run Canny edge detection with an explicit configuration.
pub fn canny_with_config(image: ArrayView2<u8>, config: &CannyConfig) -> CannyResult<EdgeMap> {
    let thresholds = config.thresholds()?;
    log_start(image.dim(), thresholds, config);

    let (magnitude, direction) = gradient(image, config.magnitude_policy, config.parallelism)?;
    trace!("canny: gradient done");
    let suppressed = non_max_suppression(magnitude.view(), direction.view(), config.parallelism)?;
    trace!("canny: suppression done");
    let edges = hysteresis(
        suppressed.view(),
        thresholds,
        config.hysteresis,
        config.parallelism,
    )?;

    debug!("canny: {} edge pixels", count_edges(&edges));
    Ok(edges)
}

/// Run Canny edge detection and keep intermediates and timings.
///
/// Useful for inspecting why a pixel was or was not marked as an edge.
pub fn canny_with_report(image: ArrayView2<u8>, config: &CannyConfig) -> CannyResult<CannyReport> {
    let thresholds = config.thresholds()?;
    log_start(image.dim(), thresholds, config);

    let gradient_start = Instant::now();
    let (magnitude, direction) = gradient(image, config.magnitude_policy, config.parallelism)?;
    let gradient_ms = gradient_start.elapsed().as_secs_f64() * 1000.0;

    let suppression_start = Instant::now();
    let suppressed = non_max_suppression(magnitude.view(), direction.view(), config.parallelism)?;
    let suppression_ms = suppression_start.elapsed().as_secs_f64() * 1000.0;

    let hysteresis_start = Instant::now();
    let edges = hysteresis(
        suppressed.view(),
        thresholds,
        config.hysteresis,
        config.parallelism,
    )?;
    let hysteresis_ms = hysteresis_start.elapsed().as_secs_f64() * 1000.0;

    let edge_count = count_edges(&edges);
    debug!(
        "canny: {edge_count} edge pixels (gradient {gradient_ms:.3} ms, suppression {suppression_ms:.3} ms, hysteresis {hysteresis_ms:.3} ms)"
    );

    Ok(CannyReport {
        edges,
        magnitude,
        direction,
        suppressed,
        edge_count,
        gradient_ms,
        suppression_ms,
        hysteresis_ms,
    })
}

fn log_start((height, width): (usize, usize), thresholds: Thresholds, config: &CannyConfig) {
    debug!(
        "canny: {width}x{height}, low={} high={}, {:?}, {:?}, {:?}",
        thresholds.low(),
        thresholds.high(),
        config.magnitude_policy,
        config.hysteresis,
        config.parallelism
    );
    if is_degenerate(height, width) {
        debug!("canny: {width}x{height} has no interior pixels, output is all zero");
    }
}
