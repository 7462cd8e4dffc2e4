//! HDB3 (high-density bipolar of order 3).
//!
//! AMI with every run of four zeros replaced so that the line never stays
//! idle for more than three bit periods:
//!
//! - odd number of pulses since the last substitution: `000V`, where `V`
//!   repeats the polarity of the previous pulse;
//! - even number: `B00V`, where `B` and `V` both take the polarity opposite
//!   to the previous pulse.
//!
//! The substitution is decided on the fourth zero, after the first three
//! have already been emitted, so the `B` pulse patches an earlier sample.

use crate::substitution::{Polarity, PulseTrain, Substitution};
use lib_types::{AnnotationIndex, Bit, BitSequence, PulseMark};

/// Zero run length that triggers a substitution.
pub const RUN_LENGTH: usize = 4;

/// Streaming HDB3 state machine for one encode call.
#[derive(Debug)]
pub struct Hdb3Encoder {
    train: PulseTrain,
    last_polarity: Polarity,
    pulses_since_substitution: usize,
    zero_run: usize,
}

impl Hdb3Encoder {
    /// Start from the canonical state: previous pulse negative, no pulses counted.
    pub fn new(amplitude: f64, capacity: usize) -> Self {
        Self {
            train: PulseTrain::with_capacity(amplitude, capacity),
            last_polarity: Polarity::Negative,
            pulses_since_substitution: 0,
            zero_run: 0,
        }
    }

    pub fn push(&mut self, bit: Bit) {
        match bit {
            Bit::One => {
                let polarity = self.last_polarity.flipped();
                self.train.push_pulse(polarity);
                self.last_polarity = polarity;
                self.pulses_since_substitution += 1;
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
        let last = self.train.len() - 1;
        let first = last + 1 - RUN_LENGTH;

        let (substitution, polarity) = if self.pulses_since_substitution % 2 == 1 {
            let v = self.last_polarity;
            (
                Substitution::default().with(last, v, PulseMark::Violation),
                v,
            )
        } else {
            let b = self.last_polarity.flipped();
            (
                Substitution::default()
                    .with(first, b, PulseMark::Balancing)
                    .with(last, b, PulseMark::Violation),
                b,
            )
        };

        self.train.commit(&substitution);
        tracing::debug!(
            start = first,
            pattern = if substitution.patches().len() == 1 { "000V" } else { "B00V" },
            ?polarity,
            "HDB3 substitution"
        );
        self.last_polarity = polarity;

        self.pulses_since_substitution = 0;
        self.zero_run = 0;
    }

    pub fn finish(self) -> (Vec<f64>, AnnotationIndex) {
        self.train.finish()
    }
}

/// Encode `bits` with HDB3 at peak amplitude `a`.
pub fn encode(bits: &BitSequence, a: f64) -> (Vec<f64>, AnnotationIndex) {
    let mut encoder = Hdb3Encoder::new(a, bits.len());
    for bit in bits.iter() {
        encoder.push(bit);
    }
    encoder.finish()
}
