//! Sample-index to time mapping for display.
//!
//! One bit period is one time unit. A waveform showing `bits_shown` bits
//! with `sample_count` samples gets `round(sample_count / bits_shown)`
//! samples per bit, and each sample lasts the reciprocal of that.

use lib_types::{UnitIntervals, Waveform};

/// Time step between samples.
///
/// `dt = 1 / max(1, round(sample_count / max(1, bits_shown)))`
pub fn sample_interval(sample_count: usize, bits_shown: usize) -> UnitIntervals {
    let bits = bits_shown.max(1) as f64;
    let samples_per_bit = (sample_count as f64 / bits).round().max(1.0);
    UnitIntervals(1.0 / samples_per_bit)
}

/// One time value per sample, starting at `offset`.
pub fn time_axis(sample_count: usize, bits_shown: usize, offset: f64) -> Vec<f64> {
    let dt = sample_interval(sample_count, bits_shown).0;
    (0..sample_count).map(|i| i as f64 * dt + offset).collect()
}

/// Attach a time base to a sample buffer.
pub fn to_waveform(samples: Vec<f64>, bits_shown: usize, offset: f64) -> Waveform {
    let dt = sample_interval(samples.len(), bits_shown);
    Waveform::new(samples, dt, UnitIntervals(offset))
}
