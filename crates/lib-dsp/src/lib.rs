//! # lib-dsp
//!
//! Spectral and timing math for line-coded waveforms.
//!
//! This crate provides the signal-analysis half of the workbench:
//!
//! - **FFT**: cached rustfft/realfft planners and a direct reference DFT
//! - **Windows**: Hann, Hamming, Blackman, Kaiser tapers
//! - **Empirical PSD**: windowed, zero-padded one-sided power spectrum
//! - **Theoretical PSD**: closed-form spectrum of each line code
//! - **Time base**: sample-to-time mapping in bit periods

pub mod error;
pub mod fft;
pub mod window;
pub mod psd;
pub mod theory;
pub mod timebase;

pub use error::{DspError, DspResult};
pub use fft::FftEngine;
pub use psd::{estimate_psd, periodogram, SpectralEstimator, SpectrumConfig};
pub use theory::{frequency_grid, theoretical_psd};
pub use timebase::time_axis;
pub use window::WindowType;
