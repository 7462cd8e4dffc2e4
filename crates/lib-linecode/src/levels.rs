//! Fixed-level codes: each bit maps to the same sample pattern every time.
//!
//! | Scheme       | 1       | 0       |
//! |--------------|---------|---------|
//! | Unipolar NRZ | A       | 0       |
//! | Unipolar RZ  | A, 0    | 0, 0    |
//! | Polar NRZ    | A       | -A      |
//! | Polar RZ     | A, 0    | -A, 0   |
//! | Manchester   | A, -A   | -A, A   |

use lib_types::{Bit, BitSequence};

/// Expand every bit through `map` into a contiguous sample buffer.
fn expand<const K: usize>(bits: &BitSequence, map: impl Fn(Bit) -> [f64; K]) -> Vec<f64> {
    let mut samples = Vec::with_capacity(bits.len() * K);
    for bit in bits.iter() {
        samples.extend_from_slice(&map(bit));
    }
    samples
}

pub fn unipolar_nrz(bits: &BitSequence, a: f64) -> Vec<f64> {
    expand(bits, |bit| if bit.is_one() { [a] } else { [0.0] })
}

pub fn unipolar_rz(bits: &BitSequence, a: f64) -> Vec<f64> {
    expand(bits, |bit| if bit.is_one() { [a, 0.0] } else { [0.0, 0.0] })
}

pub fn polar_nrz(bits: &BitSequence, a: f64) -> Vec<f64> {
    expand(bits, |bit| if bit.is_one() { [a] } else { [-a] })
}

pub fn polar_rz(bits: &BitSequence, a: f64) -> Vec<f64> {
    expand(bits, |bit| if bit.is_one() { [a, 0.0] } else { [-a, 0.0] })
}

pub fn manchester(bits: &BitSequence, a: f64) -> Vec<f64> {
    expand(bits, |bit| if bit.is_one() { [a, -a] } else { [-a, a] })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::parse_bits;

    #[test]
    fn test_nrz_levels() {
        let bits = parse_bits("1010").unwrap();
        assert_eq!(unipolar_nrz(&bits, 3.0), vec![3.0, 0.0, 3.0, 0.0]);
        assert_eq!(polar_nrz(&bits, 3.0), vec![3.0, -3.0, 3.0, -3.0]);
    }

    #[test]
    fn test_rz_returns_to_zero_every_bit() {
        let bits = parse_bits("110").unwrap();
        let uni = unipolar_rz(&bits, 2.0);
        let pol = polar_rz(&bits, 2.0);

        assert_eq!(uni, vec![2.0, 0.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(pol, vec![2.0, 0.0, 2.0, 0.0, -2.0, 0.0]);
        assert!(pol.iter().skip(1).step_by(2).all(|&v| v == 0.0));
    }

    #[test]
    fn test_manchester_mid_bit_transition() {
        let bits = parse_bits("10").unwrap();
        assert_eq!(manchester(&bits, 1.0), vec![1.0, -1.0, -1.0, 1.0]);

        let long = parse_bits("1110001011").unwrap();
        let samples = manchester(&long, 4.0);
        for pair in samples.chunks(2) {
            assert_eq!(pair[0], -pair[1]);
        }
        assert!(samples.iter().sum::<f64>().abs() < 1e-12);
    }
}
