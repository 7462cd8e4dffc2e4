//! # lib-linecode
//!
//! Bit-to-waveform line coding.
//!
//! This crate turns binary patterns into voltage sample sequences:
//!
//! - **Bit source**: parse `0`/`1` strings and tile them to a bit count
//! - **Level codes**: unipolar/polar NRZ and RZ, Manchester
//! - **Alternate mark inversion**: bipolar AMI, pseudo-ternary
//! - **Zero substitution**: HDB3 and B8ZS, with violation/balancing annotations
//! - **Comparison**: one bit pattern through two schemes

pub mod error;
pub mod bits;
pub mod levels;
pub mod alternate;
mod substitution;
pub mod hdb3;
pub mod b8zs;
pub mod codec;
pub mod compare;

pub use error::{LineCodeError, LineCodeResult};
pub use bits::{parse_bits, tile, tile_str};
pub use codec::{encode, encode_by_id, input_signal, parse_channel, parse_scheme, render_channel, EncodedSignal};
pub use compare::{compare, Comparison};
