//! WebAssembly exports for the Canny pipeline.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat row-major grayscale buffers (one byte per pixel).
//! Errors are raised as JavaScript exceptions.

use wasm_bindgen::prelude::*;

use crate::filters::canny::{canny, canny_with_config, CannyConfig};
use crate::filters::hysteresis::HysteresisMode;
use crate::grid::from_raw;

// ============================================================================
// Canny Edge Detection
// ============================================================================

/// Run Canny edge detection on a grayscale buffer.
///
/// # Arguments
/// * `data` - Flat array of intensities (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `low` - Lower hysteresis threshold
/// * `high` - Upper hysteresis threshold
///
/// # Returns
/// Flat array of edge values (0 or 255), same length as `data`
#[wasm_bindgen]
pub fn canny_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    low: i32,
    high: i32,
) -> Result<Vec<u8>, JsError> {
    let input = from_raw(data.to_vec(), height, width)?;
    let edges = canny(input.view(), low, high)?;
    Ok(edges.into_raw_vec_and_offset().0)
}

/// Run Canny edge detection, following chains of weak pixels.
///
/// Same arguments as [`canny_wasm`]. Weak pixels connected to a strong pixel
/// through other weak pixels are kept as edges.
#[wasm_bindgen]
pub fn canny_connected_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    low: i32,
    high: i32,
) -> Result<Vec<u8>, JsError> {
    let input = from_raw(data.to_vec(), height, width)?;
    let config = CannyConfig {
        hysteresis: HysteresisMode::Connected,
        ..CannyConfig::with_thresholds(low, high)
    };
    let edges = canny_with_config(input.view(), &config)?;
    Ok(edges.into_raw_vec_and_offset().0)
}
