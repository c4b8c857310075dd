//! Canny edge detection for single-channel 8-bit images.
//!
//! The classic three-stage pipeline implemented in Rust, with optional
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Input is a 2D `(height, width)` array of `u8` intensities that has
//! already been denoised by the caller. Output is an edge map of the same
//! shape where every value is `0` (no edge) or `255` (edge).
//!
//! ## Pipeline
//! 1. **Gradient** - 3x3 Sobel operator, magnitude narrowed to 8 bits plus
//!    direction `atan(gy / gx)` in radians
//! 2. **Non-maximum suppression** - keeps local maxima along one of four
//!    direction bands
//! 3. **Hysteresis** - strong pixels are edges, weak pixels become edges
//!    when a strong pixel is adjacent
//!
//! The one-pixel border is never processed and is always `0` in the output.
//!
//! ```
//! use ndarray::Array2;
//!
//! let mut image = Array2::<u8>::zeros((5, 5));
//! image.slice_mut(ndarray::s![1..4, 1..4]).fill(200);
//!
//! let edges = canny_rust::canny(image.view(), 40, 60).unwrap();
//! assert_eq!(edges[[1, 1]], 255);
//! assert_eq!(edges[[2, 2]], 0);
//! ```

pub mod error;
pub mod filters;
pub mod grid;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{CannyError, CannyResult};
pub use filters::canny::{canny, canny_with_config, canny_with_report, CannyConfig, CannyReport};
pub use filters::direction::DirectionBucket;
pub use filters::gradient::{gradient, MagnitudePolicy};
pub use filters::hysteresis::{hysteresis, HysteresisMode, PixelClass, Thresholds};
pub use filters::suppression::non_max_suppression;
pub use filters::Parallelism;
pub use grid::{Direction, EdgeMap, Grid, Image, Magnitude};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::CannyError;
    use crate::filters::canny::{canny as canny_impl, canny_with_config, CannyConfig};
    use crate::filters::gradient::MagnitudePolicy;
    use crate::filters::hysteresis::HysteresisMode;
    use crate::filters::Parallelism;

    impl From<CannyError> for PyErr {
        fn from(err: CannyError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn parse_policy(name: &str) -> PyResult<MagnitudePolicy> {
        match name {
            "clamp" => Ok(MagnitudePolicy::Clamp),
            "wrap" => Ok(MagnitudePolicy::Wrap),
            other => Err(PyValueError::new_err(format!(
                "unknown magnitude policy '{other}', expected 'clamp' or 'wrap'"
            ))),
        }
    }

    fn parse_mode(name: &str) -> PyResult<HysteresisMode> {
        match name {
            "single_hop" => Ok(HysteresisMode::SingleHop),
            "connected" => Ok(HysteresisMode::Connected),
            other => Err(PyValueError::new_err(format!(
                "unknown hysteresis mode '{other}', expected 'single_hop' or 'connected'"
            ))),
        }
    }

    // ========================================================================
    // Canny Edge Detection
    // ========================================================================

    /// Run Canny edge detection on a denoised grayscale image.
    ///
    /// # Arguments
    /// * `image` - 2D uint8 array (height, width)
    /// * `low` - Lower hysteresis threshold (>= 0)
    /// * `high` - Upper hysteresis threshold (>= low)
    ///
    /// Raises `ValueError` for invalid thresholds.
    #[pyfunction]
    #[pyo3(signature = (image, low=40, high=60))]
    pub fn canny<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        low: i32,
        high: i32,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let edges = canny_impl(image.as_array(), low, high)?;
        Ok(edges.into_pyarray(py))
    }

    /// Run Canny edge detection with every option exposed.
    ///
    /// # Arguments
    /// * `magnitude_policy` - "clamp" (default) or "wrap"
    /// * `hysteresis` - "single_hop" (default) or "connected"
    /// * `parallel` - Split rows across threads
    #[pyfunction]
    #[pyo3(signature = (image, low=40, high=60, magnitude_policy="clamp", hysteresis="single_hop", parallel=false))]
    pub fn canny_ex<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, u8>,
        low: i32,
        high: i32,
        magnitude_policy: &str,
        hysteresis: &str,
        parallel: bool,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let config = CannyConfig {
            low,
            high,
            magnitude_policy: parse_policy(magnitude_policy)?,
            hysteresis: parse_mode(hysteresis)?,
            parallelism: if parallel {
                Parallelism::Rows
            } else {
                Parallelism::Sequential
            },
        };
        let edges = canny_with_config(image.as_array(), &config)?;
        Ok(edges.into_pyarray(py))
    }

    /// Python module definition
    #[pymodule]
    pub fn canny_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(canny, m)?)?;
        m.add_function(wrap_pyfunction!(canny_ex, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::canny_rust;
