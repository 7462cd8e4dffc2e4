//! FFT operations using rustfft.
//!
//! This module provides a high-level wrapper around rustfft with:
//! - Planner caching for repeated transforms
//! - Real-to-complex transforms for windowed sample buffers
//! - A direct DFT used as a reference for the fast path

use crate::error::{DspError, DspResult};
use num_complex::Complex64;
use rayon::prelude::*;
use realfft::RealFftPlanner;
use rustfft::FftPlanner;
use std::f64::consts::PI;

/// FFT engine with cached planners.
///
/// Both planners accept any non-zero length; mixed-radix and Bluestein
/// plans are selected internally for sizes that are not powers of two.
pub struct FftEngine {
    /// Complex FFT planner.
    complex_planner: FftPlanner<f64>,

    /// Real FFT planner.
    real_planner: RealFftPlanner<f64>,
}

impl FftEngine {
    /// Create a new FFT engine.
    pub fn new() -> Self {
        Self {
            complex_planner: FftPlanner::new(),
            real_planner: RealFftPlanner::new(),
        }
    }

    /// Perform forward FFT on complex data in-place.
    pub fn fft_inplace(&mut self, data: &mut [Complex64]) -> DspResult<()> {
        let len = data.len();
        if len == 0 {
            return Err(DspError::InvalidFftSize(len));
        }

        let fft = self.complex_planner.plan_fft_forward(len);
        fft.process(data);
        Ok(())
    }

    /// Perform forward FFT on complex data, returning new buffer.
    pub fn fft(&mut self, data: &[Complex64]) -> DspResult<Vec<Complex64>> {
        let mut result = data.to_vec();
        self.fft_inplace(&mut result)?;
        Ok(result)
    }

    /// Perform forward real-to-complex FFT.
    ///
    /// Input: N real samples
    /// Output: N/2 + 1 complex samples (Hermitian symmetry exploited)
    pub fn rfft(&mut self, data: &[f64]) -> DspResult<Vec<Complex64>> {
        let len = data.len();
        if len == 0 {
            return Err(DspError::InvalidFftSize(len));
        }

        let r2c = self.real_planner.plan_fft_forward(len);
        let mut input = data.to_vec();
        let mut output = r2c.make_output_vec();

        r2c.process(&mut input, &mut output)
            .map_err(|e| DspError::NumericalInstability(e.to_string()))?;

        Ok(output)
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-pad a signal to a specific length.
pub fn zero_pad(signal: &[f64], new_len: usize) -> Vec<f64> {
    let mut result = signal.to_vec();
    if new_len > signal.len() {
        result.resize(new_len, 0.0);
    }
    result
}

/// Direct DFT of `signal` zero-padded to `len`, bins `0..bins`.
///
/// O(len * bins); bins are evaluated in parallel. Only the first
/// `signal.len()` terms of each sum are non-zero, so the padding is implicit.
pub fn direct_dft(signal: &[f64], len: usize, bins: usize) -> Vec<Complex64> {
    (0..bins)
        .into_par_iter()
        .map(|k| {
            signal
                .iter()
                .enumerate()
                .fold(Complex64::new(0.0, 0.0), |acc, (n, &x)| {
                    // Reduce k*n modulo len first to keep the angle small.
                    let phase = ((k * n) % len) as f64 / len as f64;
                    acc + Complex64::from_polar(x, -2.0 * PI * phase)
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfft_matches_complex_fft() {
        let mut engine = FftEngine::new();

        let n = 60;
        let signal: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / n as f64;
                (2.0 * PI * 4.0 * t).sin() + 0.5
            })
            .collect();

        let real = engine.rfft(&signal).unwrap();
        let complex: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        let full = engine.fft(&complex).unwrap();

        assert_eq!(real.len(), n / 2 + 1);
        for (r, f) in real.iter().zip(full.iter()) {
            assert!((r - f).norm() < 1e-9);
        }
    }

    #[test]
    fn test_direct_dft_matches_fft() {
        let mut engine = FftEngine::new();
        let signal = vec![1.0, -2.0, 0.0, 3.5, 1.0];
        let padded = zero_pad(&signal, 32);

        let fast = engine.rfft(&padded).unwrap();
        let slow = direct_dft(&signal, 32, 17);

        for (a, b) in fast.iter().zip(slow.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_dc_bin_is_sum() {
        let mut engine = FftEngine::new();
        let spectrum = engine.rfft(&[1.0, 2.0, 3.0]).unwrap();
        assert!((spectrum[0].re - 6.0).abs() < 1e-12);
        assert!(spectrum[0].im.abs() < 1e-12);
    }

    #[test]
    fn test_empty_fft_rejected() {
        let mut engine = FftEngine::new();
        assert!(matches!(engine.rfft(&[]), Err(DspError::InvalidFftSize(0))));
        assert!(matches!(engine.fft(&[]), Err(DspError::InvalidFftSize(0))));
    }

    #[test]
    fn test_zero_pad() {
        assert_eq!(zero_pad(&[1.0, 2.0], 4), vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(zero_pad(&[1.0, 2.0], 1), vec![1.0, 2.0]);
    }
}
