//! Error types for DSP operations.

use thiserror::Error;

/// Errors that can occur during DSP operations.
#[derive(Debug, Error)]
pub enum DspError {
    /// FFT size must be non-zero.
    #[error("FFT size must be non-zero, got {0}")]
    InvalidFftSize(usize),

    /// Transform length below the two points a one-sided spectrum needs.
    #[error("Pad length must be at least 2, got {0}")]
    InvalidPadLength(usize),

    /// Frequency grid is empty, unordered, or has a bad step.
    #[error("Invalid frequency grid: {0}")]
    InvalidFrequencyGrid(String),

    /// Numerical instability detected.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;
