//! # lib-types
//!
//! Core type definitions for the line-coding workbench.
//!
//! This crate provides the data model shared by the encoder and spectral crates:
//! - Normalized units (bit periods, cycles per bit, volts)
//! - Bit sequences and the closed set of line-coding schemes
//! - Waveforms and substitution annotations
//! - Power spectra

pub mod units;
pub mod bits;
pub mod scheme;
pub mod waveform;
pub mod spectrum;

pub use units::*;
pub use bits::*;
pub use scheme::*;
pub use waveform::*;
pub use spectrum::*;
