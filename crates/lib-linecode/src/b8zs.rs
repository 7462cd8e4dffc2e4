//! B8ZS (bipolar with eight-zero substitution).
//!
//! AMI in which every run of eight zeros becomes `000VB0VB`. Relative to the
//! polarity `P` of the previous pulse the pattern is `000 +P -P 0 -P +P`, so
//! the two violations repeat the preceding polarity and the run as a whole
//! carries no DC.

use crate::substitution::{Polarity, PulseTrain, Substitution};
use lib_types::{AnnotationIndex, Bit, BitSequence, PulseMark};

/// Zero run length that triggers a substitution.
pub const RUN_LENGTH: usize = 8;

/// Streaming B8ZS state machine for one encode call.
#[derive(Debug)]
pub struct B8zsEncoder {
    train: PulseTrain,
    last_polarity: Polarity,
    zero_run: usize,
}

impl B8zsEncoder {
    /// Start from the canonical state: previous pulse negative.
    pub fn new(amplitude: f64, capacity: usize) -> Self {
        Self {
            train: PulseTrain::with_capacity(amplitude, capacity),
            last_polarity: Polarity::Negative,
            zero_run: 0,
        }
    }

    pub fn push(&mut self, bit: Bit) {
        match bit {
            Bit::One => {
                let polarity = self.last_polarity.flipped();
                self.train.push_pulse(polarity);
                self.last_polarity = polarity;
                self.zero_run = 0;
            }
            Bit::Zero => {
                self.train.push_zero();
                self.zero_run += 1;
                if self.zero_run == RUN_LENGTH {
                    self.substitute();
                }
            }
        }
    }

    fn substitute(&mut self) {
        let start = self.train.len() - RUN_LENGTH;
        let same = self.last_polarity;
        let opposite = same.flipped();

        let substitution = Substitution::default()
            .with(start + 3, same, PulseMark::Violation)
            .with(start + 4, opposite, PulseMark::Balancing)
            .with(start + 6, opposite, PulseMark::Violation)
            .with(start + 7, same, PulseMark::Balancing);

        self.train.commit(&substitution);
        tracing::debug!(start, polarity = ?same, "B8ZS substitution");

        // The final pulse of the pattern has the previous polarity again.
        self.last_polarity = same;
        self.zero_run = 0;
    }

    pub fn finish(self) -> (Vec<f64>, AnnotationIndex) {
        self.train.finish()
    }
}

/// Encode `bits` with B8ZS at peak amplitude `a`.
pub fn encode(bits: &BitSequence, a: f64) -> (Vec<f64>, AnnotationIndex) {
    let mut encoder = B8zsEncoder::new(a, bits.len());
    for bit in bits.iter() {
        encoder.push(bit);
    }
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::parse_bits;

    #[test]
    fn test_substitution_after_positive_pulse() {
        let bits = parse_bits("1000000001").unwrap();
        let (samples, ann) = encode(&bits, 5.0);

        // Run starts at index 1.
        assert_eq!(
            samples,
            vec![5.0, 0.0, 0.0, 0.0, 5.0, -5.0, 0.0, -5.0, 5.0, -5.0]
        );
        assert_eq!(ann.violation.iter().copied().collect::<Vec<_>>(), vec![4, 7]);
        assert_eq!(ann.balancing.iter().copied().collect::<Vec<_>>(), vec![5, 8]);
    }

    #[test]
    fn test_substitution_after_negative_pulse() {
        let bits = parse_bits("11000000001").unwrap();
        let (samples, ann) = encode(&bits, 1.0);

        // Pulses +, -, then the run starting at index 2 mirrors the signs.
        assert_eq!(
            samples,
            vec![1.0, -1.0, 0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 1.0, -1.0, 1.0]
        );
        assert_eq!(ann.violation.iter().copied().collect::<Vec<_>>(), vec![5, 8]);
        assert_eq!(ann.balancing.iter().copied().collect::<Vec<_>>(), vec![6, 9]);
    }

    #[test]
    fn test_untouched_offsets_stay_zero() {
        let bits = parse_bits("1000000001").unwrap();
        let (samples, _) = encode(&bits, 1.0);
        let start = 1;
        for offset in [0, 1, 2, 5] {
            assert_eq!(samples[start + offset], 0.0);
        }
    }

    #[test]
    fn test_leading_run_uses_initial_negative_state() {
        let bits = parse_bits("00000000").unwrap();
        let (samples, ann) = encode(&bits, 1.0);

        assert_eq!(samples, vec![0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 1.0, -1.0]);
        assert_eq!(ann.len(), 4);
    }

    #[test]
    fn test_seven_zeros_are_left_alone() {
        let bits = parse_bits("100000001").unwrap();
        let (samples, ann) = encode(&bits, 1.0);
        assert!(ann.is_empty());
        assert_eq!(samples.iter().filter(|&&v| v != 0.0).count(), 2);
    }

    #[test]
    fn test_substituted_run_is_dc_free() {
        let bits = parse_bits("1000000000000000001").unwrap();
        let (samples, ann) = encode(&bits, 2.0);

        assert_eq!(ann.violation.len(), 4);
        assert_eq!(ann.balancing.len(), 4);
        let run_sum: f64 = samples[1..17].iter().sum();
        assert!(run_sum.abs() < 1e-12);
    }
}
