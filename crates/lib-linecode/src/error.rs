//! Error types for line-coding operations.

use lib_types::Scheme;
use thiserror::Error;

/// Errors that can occur while building or encoding a bit sequence.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LineCodeError {
    /// Bit string contains something other than `0` or `1`.
    #[error("Invalid input: '{character}' at position {position} is not a binary digit")]
    NonBinaryCharacter { character: char, position: usize },

    /// An empty pattern cannot be tiled to a non-zero length.
    #[error("Invalid input: cannot tile an empty pattern to {requested} bits")]
    EmptyPattern { requested: usize },

    /// Amplitude must be finite and strictly positive.
    #[error("Invalid input: amplitude must be a positive finite voltage, got {0}")]
    InvalidAmplitude(f64),

    /// Comparison needs two different schemes.
    #[error("Invalid input: cannot compare {0} with itself")]
    SameScheme(Scheme),

    /// Scheme id or name outside the enumerated set.
    #[error("Invalid scheme: {0}")]
    InvalidScheme(String),
}

impl LineCodeError {
    /// Whether this error belongs to the invalid-input class
    /// (as opposed to an unknown scheme).
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::InvalidScheme(_))
    }

    /// Create an invalid scheme error.
    pub fn invalid_scheme(what: impl Into<String>) -> Self {
        Self::InvalidScheme(what.into())
    }
}

/// Result type for line-coding operations.
pub type LineCodeResult<T> = Result<T, LineCodeError>;
