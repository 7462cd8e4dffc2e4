//! Binary input sequences.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single binary digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Map an ASCII `'0'`/`'1'` to a bit.
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Zero),
            '1' => Some(Self::One),
            _ => None,
        }
    }

    #[inline]
    pub fn is_one(self) -> bool {
        self == Self::One
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b {
            Self::One
        } else {
            Self::Zero
        }
    }
}

/// Ordered, fixed-length sequence of bits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BitSequence {
    bits: Vec<Bit>,
}

impl BitSequence {
    /// Create a sequence from owned bits.
    pub fn new(bits: Vec<Bit>) -> Self {
        Self { bits }
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Bit] {
        &self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.iter().copied()
    }

    /// Count of `1` bits (marks).
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|b| b.is_one()).count()
    }

    /// Longest run of consecutive `0` bits.
    pub fn longest_zero_run(&self) -> usize {
        let mut longest = 0;
        let mut run = 0;
        for bit in &self.bits {
            if bit.is_one() {
                run = 0;
            } else {
                run += 1;
                longest = longest.max(run);
            }
        }
        longest
    }
}

impl FromIterator<Bit> for BitSequence {
    fn from_iter<I: IntoIterator<Item = Bit>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_counts() {
        let seq: BitSequence = "1001000011"
            .chars()
            .filter_map(Bit::from_char)
            .collect();

        assert_eq!(seq.len(), 10);
        assert_eq!(seq.to_string(), "1001000011");
        assert_eq!(seq.ones(), 4);
        assert_eq!(seq.longest_zero_run(), 4);
    }

    #[test]
    fn test_from_char_rejects_other_digits() {
        assert_eq!(Bit::from_char('2'), None);
        assert_eq!(Bit::from_char(' '), None);
        assert_eq!(Bit::from_char('1'), Some(Bit::One));
    }

    #[test]
    fn test_serde_transparent() {
        let seq = BitSequence::new(vec![Bit::One, Bit::Zero]);
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, r#"["One","Zero"]"#);
    }
}
