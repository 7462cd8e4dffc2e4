//! Closed-form power spectral densities.
//!
//! Shapes are unit-normalized (amplitude 1, bit period 1) and evaluated on a
//! caller-supplied grid in cycles per bit period:
//!
//! | Scheme                     | S(f)                                   |
//! |----------------------------|----------------------------------------|
//! | Unipolar NRZ               | sinc²(f)                               |
//! | Unipolar RZ                | sinc²(f/2)                             |
//! | Polar NRZ                  | 4 sinc²(f)                             |
//! | Polar RZ                   | 4 sinc²(f/2)                           |
//! | Manchester                 | 0.5 sinc²(f/2) sin²(πf)                |
//! | Bipolar AMI, pseudoternary | 4 sinc²(f) sin²(πf)                    |
//! | HDB3                       | 4 sinc²(f) sin²(πf) (1 + 0.6 cos 2πf)  |
//! | B8ZS                       | 4 sinc²(f) sin²(πf) (1 + 0.85 cos 2πf) |

use crate::error::{DspError, DspResult};
use lib_types::{Scheme, Spectrum};
use std::f64::consts::PI;

/// Default plotting grid: -3 to 3 cycles per bit in steps of 0.01.
pub const DEFAULT_GRID_START: f64 = -3.0;
pub const DEFAULT_GRID_STOP: f64 = 3.0;
pub const DEFAULT_GRID_STEP: f64 = 0.01;

/// Normalized sinc: `sin(πx) / (πx)`, with `sinc(0) = 1`.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Evaluate the closed-form PSD of `scheme` at `f`.
pub fn theoretical_density(scheme: Scheme, f: f64) -> f64 {
    let sinc_sq = |x: f64| sinc(x).powi(2);
    let sin_sq = (PI * f).sin().powi(2);
    let bipolar = 4.0 * sinc_sq(f) * sin_sq;

    match scheme {
        Scheme::UnipolarNrz => sinc_sq(f),
        Scheme::UnipolarRz => sinc_sq(f / 2.0),
        Scheme::PolarNrz => 4.0 * sinc_sq(f),
        Scheme::PolarRz => 4.0 * sinc_sq(f / 2.0),
        Scheme::Manchester => 0.5 * sinc_sq(f / 2.0) * sin_sq,
        Scheme::BipolarAmi | Scheme::PseudoTernary => bipolar,
        Scheme::Hdb3 => bipolar * (1.0 + 0.6 * (2.0 * PI * f).cos()),
        Scheme::B8zs => bipolar * (1.0 + 0.85 * (2.0 * PI * f).cos()),
    }
}

/// Evaluate the closed-form PSD of `scheme` over `frequencies`.
///
/// The grid must be non-decreasing.
pub fn theoretical_psd(scheme: Scheme, frequencies: &[f64]) -> DspResult<Spectrum> {
    if frequencies.iter().any(|f| !f.is_finite()) || frequencies.windows(2).any(|w| w[1] < w[0]) {
        return Err(DspError::InvalidFrequencyGrid(
            "frequencies must be finite and non-decreasing".to_string(),
        ));
    }

    let powers = frequencies
        .iter()
        .map(|&f| theoretical_density(scheme, f))
        .collect();

    Spectrum::from_parts(frequencies.to_vec(), powers).ok_or_else(|| {
        DspError::InvalidFrequencyGrid("frequencies must be non-decreasing".to_string())
    })
}

/// Inclusive grid `start, start + step, ..., <= stop`.
///
/// Points are computed as `start + i * step` so the grid does not drift.
pub fn frequency_grid(start: f64, stop: f64, step: f64) -> DspResult<Vec<f64>> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
        return Err(DspError::InvalidFrequencyGrid(
            "bounds and step must be finite".to_string(),
        ));
    }
    if step <= 0.0 {
        return Err(DspError::InvalidFrequencyGrid(format!(
            "step must be positive, got {step}"
        )));
    }
    if stop < start {
        return Err(DspError::InvalidFrequencyGrid(format!(
            "stop {stop} is below start {start}"
        )));
    }

    // Tolerance absorbs representation error in (stop - start) / step.
    let count = ((stop - start) / step + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

/// The default -3..3 grid.
pub fn default_grid() -> Vec<f64> {
    let count = ((DEFAULT_GRID_STOP - DEFAULT_GRID_START) / DEFAULT_GRID_STEP).round() as usize + 1;
    (0..count)
        .map(|i| DEFAULT_GRID_START + i as f64 * DEFAULT_GRID_STEP)
        .collect()
}
