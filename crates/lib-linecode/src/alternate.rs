//! Alternate mark inversion codes.
//!
//! Bipolar AMI sends `1` as pulses of alternating sign and `0` as no pulse.
//! Pseudo-ternary swaps the roles of the two symbols. Both start positive.

use lib_types::{Bit, BitSequence};

/// Emit alternating pulses for every bit equal to `pulsed`, zero otherwise.
fn alternate(bits: &BitSequence, a: f64, pulsed: Bit) -> Vec<f64> {
    let mut next = a;
    bits.iter()
        .map(|bit| {
            if bit == pulsed {
                let out = next;
                next = -next;
                out
            } else {
                0.0
            }
        })
        .collect()
}

pub fn bipolar_ami(bits: &BitSequence, a: f64) -> Vec<f64> {
    alternate(bits, a, Bit::One)
}

pub fn pseudo_ternary(bits: &BitSequence, a: f64) -> Vec<f64> {
    alternate(bits, a, Bit::Zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::parse_bits;

    #[test]
    fn test_ami_alternation() {
        let bits = parse_bits("11011").unwrap();
        assert_eq!(bipolar_ami(&bits, 5.0), vec![5.0, -5.0, 0.0, 5.0, -5.0]);
    }

    #[test]
    fn test_ami_zeros_do_not_flip_polarity() {
        let bits = parse_bits("1001").unwrap();
        assert_eq!(bipolar_ami(&bits, 1.0), vec![1.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_pseudo_ternary_mirrors_ami() {
        let bits = parse_bits("00100").unwrap();
        assert_eq!(pseudo_ternary(&bits, 2.0), vec![2.0, -2.0, 0.0, 2.0, -2.0]);

        let inverted: BitSequence = bits
            .iter()
            .map(|b| Bit::from(!b.is_one()))
            .collect();
        assert_eq!(pseudo_ternary(&bits, 2.0), bipolar_ami(&inverted, 2.0));
    }
}
