//! Empirical power spectral density.
//!
//! The sample rate is normalized to 1, so frequencies are in cycles per
//! sample. For a scheme with `k` samples per bit, multiply by `k` to get
//! cycles per bit period.
//!
//! Two estimators are provided:
//!
//! - [`SpectralEstimator`]: window, zero-pad to `P`, keep bins `k < P/2`,
//!   power `|X[k]|^2 / P`. This is the smooth view used for display.
//! - [`periodogram`]: no window and no padding, bins `k <= N/2`,
//!   power `|X[k]|^2 / N`.

use crate::error::{DspError, DspResult};
use crate::fft::{direct_dft, zero_pad, FftEngine};
use crate::window::{apply_window, WindowType};
use lib_types::Spectrum;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Default zero-padded transform length.
pub const DEFAULT_PAD_LENGTH: usize = 4096;

/// Settings for the empirical estimator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrumConfig {
    /// Transform length after zero padding.
    #[serde(default = "default_pad_length")]
    pub pad_length: usize,

    /// Taper applied to the samples before padding.
    #[serde(default)]
    pub window: WindowType,
}

fn default_pad_length() -> usize {
    DEFAULT_PAD_LENGTH
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            pad_length: DEFAULT_PAD_LENGTH,
            window: WindowType::Hann,
        }
    }
}

impl SpectrumConfig {
    /// Number of one-sided bins kept: `k` in `[0, P/2)`.
    #[inline]
    pub fn bins(&self) -> usize {
        self.pad_length.div_ceil(2)
    }
}

/// Windowed, zero-padded FFT power spectrum estimator.
pub struct SpectralEstimator {
    engine: FftEngine,
    config: SpectrumConfig,
}

impl SpectralEstimator {
    pub fn new(config: SpectrumConfig) -> Self {
        Self {
            engine: FftEngine::new(),
            config,
        }
    }

    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    /// Estimate the one-sided PSD of `samples`.
    ///
    /// Empty input yields an empty spectrum. The window spans every sample;
    /// when there are more windowed samples than `pad_length`, only the
    /// first `pad_length` of them are transformed. Fails if the pad length
    /// is below 2.
    pub fn estimate(&mut self, samples: &[f64]) -> DspResult<Spectrum> {
        if samples.is_empty() {
            return Ok(Spectrum::new());
        }
        let pad = self.config.pad_length;
        let windowed = self.windowed(samples)?;
        let padded = zero_pad(&windowed, pad);
        let transform = self.engine.rfft(&padded)?;

        tracing::debug!(
            samples = samples.len(),
            pad,
            window = ?self.config.window,
            "Estimating PSD"
        );

        to_spectrum(&transform[..self.config.bins()], pad)
    }

    /// Same as [`estimate`](Self::estimate) but evaluated with the direct
    /// O(P^2) DFT. Used to cross-check the FFT path.
    pub fn estimate_direct(&self, samples: &[f64]) -> DspResult<Spectrum> {
        if samples.is_empty() {
            return Ok(Spectrum::new());
        }
        let pad = self.config.pad_length;
        let windowed = self.windowed(samples)?;
        let transform = direct_dft(&windowed, pad, self.config.bins());
        to_spectrum(&transform, pad)
    }

    /// Window all of `samples`, then keep at most `pad_length` of them.
    fn windowed(&self, samples: &[f64]) -> DspResult<Vec<f64>> {
        let pad = self.config.pad_length;
        if pad < 2 {
            return Err(DspError::InvalidPadLength(pad));
        }
        let mut windowed = apply_window(samples, self.config.window);
        if windowed.len() > pad {
            tracing::debug!(
                samples = windowed.len(),
                pad,
                "Truncating windowed samples to the transform length"
            );
            windowed.truncate(pad);
        }
        Ok(windowed)
    }
}

impl Default for SpectralEstimator {
    fn default() -> Self {
        Self::new(SpectrumConfig::default())
    }
}

/// Bin `k` of a length-`len` transform maps to frequency `k / len`
/// and power `|X[k]|^2 / len`.
fn to_spectrum(bins: &[Complex64], len: usize) -> DspResult<Spectrum> {
    let scale = len as f64;
    let frequencies = (0..bins.len()).map(|k| k as f64 / scale).collect();
    let powers = bins.iter().map(|x| x.norm_sqr() / scale).collect();
    Spectrum::from_parts(frequencies, powers).ok_or_else(|| {
        DspError::NumericalInstability(format!("{} bins of a {len}-point transform", bins.len()))
    })
}

/// Estimate the PSD with the default settings (Hann, P = 4096).
pub fn estimate_psd(samples: &[f64]) -> DspResult<Spectrum> {
    SpectralEstimator::default().estimate(samples)
}

/// Raw periodogram: no window, no padding, bins `0..=N/2`.
pub fn periodogram(samples: &[f64]) -> DspResult<Spectrum> {
    if samples.is_empty() {
        return Ok(Spectrum::new());
    }

    let n = samples.len();
    let input: Vec<Complex64> = samples.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let transform = FftEngine::new().fft(&input)?;

    to_spectrum(&transform[..=n / 2], n)
}
