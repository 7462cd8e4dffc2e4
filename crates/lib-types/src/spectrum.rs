//! Frequency-domain power spectra.

use serde::{Deserialize, Serialize};

/// One (frequency, power) pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectralPoint {
    /// Frequency in cycles per sample (empirical) or cycles per UI (theoretical).
    pub frequency: f64,

    /// Power density at `frequency`.
    pub power: f64,
}

/// Power spectrum ordered by non-decreasing frequency.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    points: Vec<SpectralPoint>,
}

impl Spectrum {
    /// Create an empty spectrum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parallel frequency and power vectors.
    ///
    /// Returns `None` if lengths differ or frequencies decrease anywhere.
    pub fn from_parts(frequencies: Vec<f64>, powers: Vec<f64>) -> Option<Self> {
        if frequencies.len() != powers.len() {
            return None;
        }
        if frequencies.windows(2).any(|w| w[1] < w[0]) {
            return None;
        }
        Some(Self {
            points: frequencies
                .into_iter()
                .zip(powers)
                .map(|(frequency, power)| SpectralPoint { frequency, power })
                .collect(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[SpectralPoint] {
        &self.points
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.frequency).collect()
    }

    pub fn powers(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.power).collect()
    }

    /// Point with the greatest power.
    pub fn peak(&self) -> Option<SpectralPoint> {
        self.points
            .iter()
            .copied()
            .fold(None, |best: Option<SpectralPoint>, p| match best {
                Some(b) if b.power >= p.power => Some(b),
                _ => Some(p),
            })
    }

    /// Sum of all power values.
    pub fn total_power(&self) -> f64 {
        self.points.iter().map(|p| p.power).sum()
    }

    /// Power at the point whose frequency is nearest `frequency`.
    pub fn power_near(&self, frequency: f64) -> Option<f64> {
        self.points
            .iter()
            .min_by(|a, b| {
                (a.frequency - frequency)
                    .abs()
                    .total_cmp(&(b.frequency - frequency).abs())
            })
            .map(|p| p.power)
    }
}
