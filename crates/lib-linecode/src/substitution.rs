//! Shared machinery for the zero-substitution codes (HDB3, B8ZS).
//!
//! Both encoders scan forward emitting provisional zeros. When a zero run
//! completes, the encoder builds a [`Substitution`] listing the earlier
//! offsets to overwrite and commits it through [`PulseTrain::commit`],
//! which writes samples and annotations together.

use lib_types::{AnnotationIndex, PulseMark};

/// Sign of the most recent pulse on the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    #[inline]
    pub(crate) fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }

    /// Voltage of a pulse with this polarity.
    #[inline]
    pub(crate) fn level(self, a: f64) -> f64 {
        match self {
            Self::Positive => a,
            Self::Negative => -a,
        }
    }
}

/// One overwritten sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Patch {
    pub index: usize,
    pub polarity: Polarity,
    pub mark: PulseMark,
}

/// All patches produced by one completed zero run.
#[derive(Clone, Debug, Default)]
pub(crate) struct Substitution {
    patches: Vec<Patch>,
}

impl Substitution {
    pub(crate) fn with(mut self, index: usize, polarity: Polarity, mark: PulseMark) -> Self {
        self.patches.push(Patch {
            index,
            polarity,
            mark,
        });
        self
    }

    pub(crate) fn patches(&self) -> &[Patch] {
        &self.patches
    }
}

/// Sample buffer under construction plus its annotation record.
#[derive(Debug)]
pub(crate) struct PulseTrain {
    amplitude: f64,
    samples: Vec<f64>,
    annotations: AnnotationIndex,
}

impl PulseTrain {
    pub(crate) fn with_capacity(amplitude: f64, capacity: usize) -> Self {
        Self {
            amplitude,
            samples: Vec::with_capacity(capacity),
            annotations: AnnotationIndex::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }

    pub(crate) fn push_pulse(&mut self, polarity: Polarity) {
        self.samples.push(polarity.level(self.amplitude));
    }

    pub(crate) fn push_zero(&mut self) {
        self.samples.push(0.0);
    }

    /// Apply every patch of `substitution`.
    ///
    /// Every index must already be emitted, and no index may end up in both
    /// annotation sets. The encoders only patch the zero run they just
    /// closed, so both hold by construction.
    pub(crate) fn commit(&mut self, substitution: &Substitution) {
        let patches = substitution.patches();
        debug_assert!(
            patches.iter().all(|p| p.index < self.samples.len()),
            "substitution patches a sample not yet emitted"
        );
        debug_assert!(
            patches.iter().all(|p| {
                !patches.iter().any(|q| q.index == p.index && q.mark != p.mark)
                    && match p.mark {
                        PulseMark::Violation => !self.annotations.balancing.contains(&p.index),
                        PulseMark::Balancing => !self.annotations.violation.contains(&p.index),
                    }
            }),
            "substitution marks a sample as both violation and balancing"
        );

        for patch in patches {
            self.samples[patch.index] = patch.polarity.level(self.amplitude);
            self.annotations.insert(patch.index, patch.mark);
        }
    }

    pub(crate) fn finish(self) -> (Vec<f64>, AnnotationIndex) {
        (self.samples, self.annotations)
    }
}
