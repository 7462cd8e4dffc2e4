//! Side-by-side encoding of one bit sequence with two schemes.

use crate::codec::{encode, EncodedSignal};
use crate::error::{LineCodeError, LineCodeResult};
use lib_types::{BitSequence, Scheme, Volts};
use serde::Serialize;

/// Two encodings of the same bits.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub first: EncodedSignal,
    pub second: EncodedSignal,
}

impl Comparison {
    /// Difference in DC level (mean sample value) between the two encodings.
    pub fn dc_difference(&self) -> f64 {
        mean(&self.first.samples) - mean(&self.second.samples)
    }
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

/// Encode `bits` with both `first` and `second`, which must differ.
pub fn compare(
    first: Scheme,
    second: Scheme,
    bits: &BitSequence,
    amplitude: Volts,
) -> LineCodeResult<Comparison> {
    if first == second {
        return Err(LineCodeError::SameScheme(first));
    }

    Ok(Comparison {
        first: encode(first, bits, amplitude)?,
        second: encode(second, bits, amplitude)?,
    })
}
