//! Physical units with type safety.
//!
//! Time is normalized so that one bit period (unit interval, UI) is 1.0,
//! and the sample rate of a scheme with `k` samples per bit is `k` samples
//! per UI.

use serde::{Deserialize, Serialize};

/// Time measured in bit periods.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct UnitIntervals(pub f64);

/// Voltage in Volts.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Volts(pub f64);

impl Volts {
    /// Whether this value is usable as a peak amplitude (finite and positive).
    #[inline]
    pub fn is_valid_amplitude(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Clamp into an inclusive range.
    #[inline]
    pub fn clamp(self, min: Volts, max: Volts) -> Self {
        Self(self.0.clamp(min.0, max.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amplitude_validity() {
        assert!(Volts(5.0).is_valid_amplitude());
        assert!(!Volts(0.0).is_valid_amplitude());
        assert!(!Volts(-1.0).is_valid_amplitude());
        assert!(!Volts(f64::NAN).is_valid_amplitude());
        assert!(!Volts(f64::INFINITY).is_valid_amplitude());
    }

    #[test]
    fn test_volts_clamp() {
        assert_eq!(Volts(12.0).clamp(Volts(1.0), Volts(10.0)), Volts(10.0));
        assert_eq!(Volts(0.5).clamp(Volts(1.0), Volts(10.0)), Volts(1.0));
        assert_eq!(Volts(3.0).clamp(Volts(1.0), Volts(10.0)), Volts(3.0));
    }
}
