//! Bit source: parsing and tiling of input patterns.

use crate::error::{LineCodeError, LineCodeResult};
use lib_types::{Bit, BitSequence};

/// Parse a string of `0`/`1` characters.
///
/// Any other character, whitespace included, is rejected.
pub fn parse_bits(input: &str) -> LineCodeResult<BitSequence> {
    input
        .chars()
        .enumerate()
        .map(|(position, character)| {
            Bit::from_char(character)
                .ok_or(LineCodeError::NonBinaryCharacter { character, position })
        })
        .collect()
}

/// Repeat `pattern` end-to-end and truncate to exactly `total_bits`.
pub fn tile(pattern: &BitSequence, total_bits: usize) -> LineCodeResult<BitSequence> {
    if total_bits == 0 {
        return Ok(BitSequence::default());
    }
    if pattern.is_empty() {
        return Err(LineCodeError::EmptyPattern {
            requested: total_bits,
        });
    }

    Ok(pattern
        .as_slice()
        .iter()
        .copied()
        .cycle()
        .take(total_bits)
        .collect())
}

/// Parse `input` and tile it to `total_bits` in one step.
pub fn tile_str(input: &str, total_bits: usize) -> LineCodeResult<BitSequence> {
    let pattern = parse_bits(input)?;
    tile(&pattern, total_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_repeats_and_truncates() {
        let tiled = tile_str("101", 7).unwrap();
        assert_eq!(tiled.to_string(), "1011010");
    }

    #[test]
    fn test_tile_length_matches_request() {
        let pattern = parse_bits("1100101").unwrap();
        for n in [0, 1, 4, 7, 8, 32, 100] {
            assert_eq!(tile(&pattern, n).unwrap().len(), n);
        }
    }

    #[test]
    fn test_tile_shorter_than_pattern() {
        assert_eq!(tile_str("110011", 4).unwrap().to_string(), "1100");
    }

    #[test]
    fn test_empty_pattern() {
        let empty = BitSequence::default();
        assert_eq!(
            tile(&empty, 3),
            Err(LineCodeError::EmptyPattern { requested: 3 })
        );
        assert!(tile(&empty, 0).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_binary() {
        let err = parse_bits("10a1").unwrap_err();
        assert_eq!(
            err,
            LineCodeError::NonBinaryCharacter {
                character: 'a',
                position: 2
            }
        );
        assert!(err.is_invalid_input());
        assert!(parse_bits("10 1").is_err());
        assert!(parse_bits("").unwrap().is_empty());
    }
}
