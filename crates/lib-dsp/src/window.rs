//! Tapers applied to an encoded burst before the transform.
//!
//! A short burst starts and stops abruptly, and those edges leak power into
//! every bin. All windows here are symmetric: coefficient `n` of an
//! `N`-point window depends only on `n / (N - 1)`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types for spectral processing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// No taper.
    Rectangular,

    /// Raised cosine reaching zero at both ends.
    Hann,

    /// Raised cosine on a 0.08 pedestal.
    Hamming,

    /// Three-term cosine sum.
    Blackman,

    /// Kaiser-Bessel; larger `beta` trades main-lobe width for sidelobe level.
    Kaiser { beta: f64 },
}

impl Default for WindowType {
    fn default() -> Self {
        Self::Hann
    }
}

impl WindowType {
    /// Beta used when a Kaiser window is requested without one.
    pub const DEFAULT_KAISER_BETA: f64 = 6.0;

    /// Parse `rectangular`, `hann`, `hamming`, `blackman`, `kaiser` or `kaiser:<beta>`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "rectangular" | "none" => Some(Self::Rectangular),
            "hann" | "hanning" => Some(Self::Hann),
            "hamming" => Some(Self::Hamming),
            "blackman" => Some(Self::Blackman),
            "kaiser" => Some(Self::Kaiser {
                beta: Self::DEFAULT_KAISER_BETA,
            }),
            other => {
                let beta = other.strip_prefix("kaiser:")?.parse::<f64>().ok()?;
                (beta.is_finite() && beta >= 0.0).then_some(Self::Kaiser { beta })
            }
        }
    }

    /// Coefficient at normalized position `x = n / (N - 1)` in `[0, 1]`.
    fn coefficient(self, x: f64) -> f64 {
        let cos = |k: f64| (2.0 * PI * k * x).cos();
        match self {
            Self::Rectangular => 1.0,
            Self::Hann => 0.5 - 0.5 * cos(1.0),
            Self::Hamming => 0.54 - 0.46 * cos(1.0),
            Self::Blackman => 0.42 - 0.5 * cos(1.0) + 0.08 * cos(2.0),
            Self::Kaiser { beta } => {
                let r = 2.0 * x - 1.0;
                bessel_i0(beta * (1.0 - r * r).max(0.0).sqrt()) / bessel_i0(beta)
            }
        }
    }
}

/// Zeroth-order modified Bessel function of the first kind.
///
/// Power series `sum (x/2)^(2k) / (k!)^2`, summed until terms stop mattering.
fn bessel_i0(x: f64) -> f64 {
    let half_sq = (x / 2.0).powi(2);
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..200 {
        term *= half_sq / (k * k) as f64;
        sum += term;
        if term < sum * 1e-17 {
            break;
        }
    }
    sum
}

/// Coefficients of a `length`-point window.
///
/// A single-point window is `[1.0]` for every type.
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    match length {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let span = (length - 1) as f64;
            (0..length)
                .map(|n| window_type.coefficient(n as f64 / span))
                .collect()
        }
    }
}

/// Multiply `samples` element-wise by a window of matching length.
pub fn apply_window(samples: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, samples.len());
    samples.iter().zip(window.iter()).map(|(x, w)| x * w).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bessel_i0_values() {
        assert_eq!(bessel_i0(0.0), 1.0);
        assert!((bessel_i0(1.0) - 1.266_065_878).abs() < 1e-8);
        assert!((bessel_i0(3.0) - 4.880_792_586).abs() < 1e-8);
        assert_eq!(bessel_i0(-2.5), bessel_i0(2.5));
    }

    #[test]
    fn test_rectangular_is_flat() {
        let w = generate_window(WindowType::Rectangular, 7);
        assert_eq!(w, vec![1.0; 7]);
    }

    #[test]
    fn test_hann_endpoints_and_peak() {
        let w = generate_window(WindowType::Hann, 9);
        assert!(w[0].abs() < 1e-15);
        assert!(w[8].abs() < 1e-15);
        assert!((w[4] - 1.0).abs() < 1e-15);
        assert!((w[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_hamming_and_blackman_endpoints() {
        let hamming = generate_window(WindowType::Hamming, 16);
        assert!((hamming[0] - 0.08).abs() < 1e-12);

        let blackman = generate_window(WindowType::Blackman, 16);
        assert!(blackman[0].abs() < 1e-12);
        assert!(blackman.iter().all(|&v| v > -1e-12 && v <= 1.0));
    }

    #[test]
    fn test_kaiser_tapers_from_unit_centre() {
        let w = generate_window(WindowType::Kaiser { beta: 6.0 }, 65);
        assert!((w[32] - 1.0).abs() < 1e-12);
        assert!(w[0] < 0.1);
        // beta = 0 degenerates to rectangular.
        let flat = generate_window(WindowType::Kaiser { beta: 0.0 }, 5);
        assert!(flat.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_windows_are_symmetric() {
        for wt in [
            WindowType::Hann,
            WindowType::Hamming,
            WindowType::Blackman,
            WindowType::Kaiser { beta: 8.0 },
        ] {
            let w = generate_window(wt, 33);
            for i in 0..16 {
                assert!((w[i] - w[32 - i]).abs() < 1e-12, "{wt:?} at {i}");
            }
        }
    }

    #[test]
    fn test_single_point_window_is_unity() {
        for wt in [WindowType::Hann, WindowType::Blackman, WindowType::Kaiser { beta: 6.0 }] {
            assert_eq!(generate_window(wt, 1), vec![1.0]);
        }
        assert!(generate_window(WindowType::Hann, 0).is_empty());
    }

    #[test]
    fn test_apply_window() {
        let windowed = apply_window(&[2.0, 2.0, 2.0], WindowType::Hann);
        assert!(windowed[0].abs() < 1e-12);
        assert!((windowed[1] - 2.0).abs() < 1e-12);
        assert!(windowed[2].abs() < 1e-12);
    }

    #[test]
    fn test_window_names() {
        assert_eq!(WindowType::from_name("Hann"), Some(WindowType::Hann));
        assert_eq!(WindowType::from_name("rectangular"), Some(WindowType::Rectangular));
        assert_eq!(
            WindowType::from_name("kaiser:8.5"),
            Some(WindowType::Kaiser { beta: 8.5 })
        );
        assert_eq!(
            WindowType::from_name("kaiser"),
            Some(WindowType::Kaiser { beta: 6.0 })
        );
        assert_eq!(WindowType::from_name("kaiser:-1"), None);
        assert_eq!(WindowType::from_name("tukey"), None);
        assert_eq!(WindowType::default(), WindowType::Hann);
    }
}
