//! Time-domain waveform representation.
//!
//! Waveforms are the output of the line encoders: voltage samples on a
//! uniform time grid measured in bit periods.
//!
//! # Sample Semantics
//!
//! For a waveform with `N` samples the sample times are:
//!
//! ```text
//! t[i] = t_start + i * dt,  for i = 0, 1, ..., N-1
//! ```
//!
//! Renderers draw each sample as a step held until `t[i+1]`, so `duration()`
//! returns `N * dt`, one sample past the last instant.

use crate::units::UnitIntervals;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A uniformly-sampled time-domain waveform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Sample values in volts.
    pub samples: Vec<f64>,

    /// Time step between consecutive samples.
    pub dt: UnitIntervals,

    /// Time of the first sample.
    pub t_start: UnitIntervals,
}

impl Waveform {
    /// Create a new waveform from samples.
    pub fn new(samples: Vec<f64>, dt: UnitIntervals, t_start: UnitIntervals) -> Self {
        Self { samples, dt, t_start }
    }

    /// Number of samples in the waveform.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the waveform is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total duration of the waveform.
    #[inline]
    pub fn duration(&self) -> UnitIntervals {
        UnitIntervals(self.samples.len() as f64 * self.dt.0)
    }

    /// Get the time value for a given sample index.
    #[inline]
    pub fn time_at(&self, index: usize) -> UnitIntervals {
        UnitIntervals(self.t_start.0 + index as f64 * self.dt.0)
    }

    /// Time coordinate of every sample.
    pub fn times(&self) -> Vec<f64> {
        (0..self.samples.len()).map(|i| self.time_at(i).0).collect()
    }

    /// Peak-to-peak amplitude.
    pub fn peak_to_peak(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let (min, max) = self.samples.iter().fold((f64::MAX, f64::MIN), |(min, max), &v| {
            (min.min(v), max.max(v))
        });
        max - min
    }

    /// Mean value (DC level).
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Root mean square value.
    pub fn rms(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.samples.iter().map(|v| v * v).sum();
        (sum_sq / self.samples.len() as f64).sqrt()
    }

    /// Number of level changes between consecutive samples.
    pub fn transitions(&self) -> usize {
        self.samples.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

/// Role of a pulse written by a zero-run substitution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PulseMark {
    /// Breaks the alternate-mark-inversion rule; the receiver's marker.
    Violation,
    /// Restores DC balance around a violation.
    Balancing,
}

/// Sample indices overwritten by a zero-run substitution.
///
/// Only HDB3 and B8ZS populate this; every other scheme returns it empty.
/// The two sets never share an index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationIndex {
    pub violation: BTreeSet<usize>,
    pub balancing: BTreeSet<usize>,
}

impl AnnotationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `index` under `mark`.
    ///
    /// Returns `false` (and records nothing) if the index already carries
    /// the other mark.
    pub fn insert(&mut self, index: usize, mark: PulseMark) -> bool {
        let (target, other) = match mark {
            PulseMark::Violation => (&mut self.violation, &self.balancing),
            PulseMark::Balancing => (&mut self.balancing, &self.violation),
        };
        if other.contains(&index) {
            return false;
        }
        target.insert(index);
        true
    }

    /// Mark carried by a sample index, if any.
    pub fn mark(&self, index: usize) -> Option<PulseMark> {
        if self.violation.contains(&index) {
            Some(PulseMark::Violation)
        } else if self.balancing.contains(&index) {
            Some(PulseMark::Balancing)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.violation.is_empty() && self.balancing.is_empty()
    }

    /// Total number of annotated samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.violation.len() + self.balancing.len()
    }

    /// All annotated indices in ascending order with their marks.
    pub fn iter(&self) -> impl Iterator<Item = (usize, PulseMark)> + '_ {
        let mut all: Vec<(usize, PulseMark)> = self
            .violation
            .iter()
            .map(|&i| (i, PulseMark::Violation))
            .chain(self.balancing.iter().map(|&i| (i, PulseMark::Balancing)))
            .collect();
        all.sort_unstable_by_key(|&(i, _)| i);
        all.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_basics() {
        let samples = vec![0.0, 5.0, -5.0, 0.0];
        let wf = Waveform::new(samples, UnitIntervals(0.5), UnitIntervals(0.0));

        assert_eq!(wf.len(), 4);
        assert!((wf.duration().0 - 2.0).abs() < 1e-12);
        assert!((wf.peak_to_peak() - 10.0).abs() < 1e-12);
        assert!(wf.mean().abs() < 1e-12);
        assert_eq!(wf.transitions(), 3);
        assert_eq!(wf.times(), vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_empty_waveform_statistics() {
        let wf = Waveform::new(Vec::new(), UnitIntervals(1.0), UnitIntervals(0.0));
        assert_eq!(wf.peak_to_peak(), 0.0);
        assert_eq!(wf.rms(), 0.0);
        assert_eq!(wf.mean(), 0.0);
        assert!(wf.times().is_empty());
    }

    #[test]
    fn test_annotation_sets_stay_disjoint() {
        let mut ann = AnnotationIndex::new();
        assert!(ann.insert(3, PulseMark::Violation));
        assert!(ann.insert(0, PulseMark::Balancing));
        assert!(!ann.insert(3, PulseMark::Balancing));

        assert_eq!(ann.len(), 2);
        assert_eq!(ann.mark(3), Some(PulseMark::Violation));
        assert_eq!(ann.mark(0), Some(PulseMark::Balancing));
        assert_eq!(ann.mark(1), None);

        let ordered: Vec<_> = ann.iter().collect();
        assert_eq!(
            ordered,
            vec![(0, PulseMark::Balancing), (3, PulseMark::Violation)]
        );
    }
}
