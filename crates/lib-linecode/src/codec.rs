//! Scheme dispatch: one entry point for every line code.

use crate::error::{LineCodeError, LineCodeResult};
use crate::{alternate, b8zs, hdb3, levels};
use lib_types::{AnnotationIndex, BitSequence, Channel, Scheme, Volts};
use serde::Serialize;

/// Level used for a `1` on the raw input display.
pub const INPUT_HIGH: Volts = Volts(5.0);

/// Samples produced for one channel, plus any substitution annotations.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EncodedSignal {
    /// What produced the samples.
    pub channel: Channel,

    /// Voltage samples, `samples_per_bit()` per input bit.
    pub samples: Vec<f64>,

    /// Substituted positions (HDB3/B8ZS only).
    pub annotations: AnnotationIndex,
}

impl EncodedSignal {
    /// Samples emitted per input bit.
    pub fn samples_per_bit(&self) -> usize {
        self.channel.scheme().map_or(1, |s| s.samples_per_bit())
    }

    /// Number of bits the samples cover.
    pub fn bit_count(&self) -> usize {
        self.samples.len() / self.samples_per_bit()
    }
}

/// Encode `bits` with `scheme` at peak `amplitude`.
///
/// Every call starts from the scheme's canonical initial state, so equal
/// inputs always give equal outputs.
pub fn encode(scheme: Scheme, bits: &BitSequence, amplitude: Volts) -> LineCodeResult<EncodedSignal> {
    if !amplitude.is_valid_amplitude() {
        return Err(LineCodeError::InvalidAmplitude(amplitude.0));
    }
    let a = amplitude.0;

    let (samples, annotations) = match scheme {
        Scheme::UnipolarNrz => (levels::unipolar_nrz(bits, a), AnnotationIndex::new()),
        Scheme::UnipolarRz => (levels::unipolar_rz(bits, a), AnnotationIndex::new()),
        Scheme::PolarNrz => (levels::polar_nrz(bits, a), AnnotationIndex::new()),
        Scheme::PolarRz => (levels::polar_rz(bits, a), AnnotationIndex::new()),
        Scheme::BipolarAmi => (alternate::bipolar_ami(bits, a), AnnotationIndex::new()),
        Scheme::PseudoTernary => (alternate::pseudo_ternary(bits, a), AnnotationIndex::new()),
        Scheme::Manchester => (levels::manchester(bits, a), AnnotationIndex::new()),
        Scheme::Hdb3 => hdb3::encode(bits, a),
        Scheme::B8zs => b8zs::encode(bits, a),
    };

    debug_assert_eq!(samples.len(), bits.len() * scheme.samples_per_bit());
    tracing::debug!(
        scheme = scheme.name(),
        bits = bits.len(),
        samples = samples.len(),
        substitutions = annotations.violation.len(),
        "Encoded bit sequence"
    );

    Ok(EncodedSignal {
        channel: Channel::Encoded(scheme),
        samples,
        annotations,
    })
}

/// Encode using a numeric channel id (1..=9).
pub fn encode_by_id(id: u8, bits: &BitSequence, amplitude: Volts) -> LineCodeResult<EncodedSignal> {
    let scheme = Scheme::from_id(id)
        .ok_or_else(|| LineCodeError::invalid_scheme(format!("no scheme with id {id}")))?;
    encode(scheme, bits, amplitude)
}

/// Raw input display: `1` at [`INPUT_HIGH`], `0` at 0 V, one sample per bit.
pub fn input_signal(bits: &BitSequence) -> Vec<f64> {
    bits.iter()
        .map(|bit| if bit.is_one() { INPUT_HIGH.0 } else { 0.0 })
        .collect()
}

/// Produce the samples for a display channel.
///
/// The input channel ignores `amplitude`.
pub fn render_channel(channel: Channel, bits: &BitSequence, amplitude: Volts) -> LineCodeResult<EncodedSignal> {
    match channel {
        Channel::Input => Ok(EncodedSignal {
            channel,
            samples: input_signal(bits),
            annotations: AnnotationIndex::new(),
        }),
        Channel::Encoded(scheme) => encode(scheme, bits, amplitude),
    }
}

/// Resolve a scheme from a kebab-case name or a numeric id.
pub fn parse_scheme(text: &str) -> LineCodeResult<Scheme> {
    let text = text.trim();
    let found = match text.parse::<u8>() {
        Ok(id) => Scheme::from_id(id),
        Err(_) => Scheme::from_name(text),
    };
    found.ok_or_else(|| LineCodeError::invalid_scheme(format!("unknown scheme '{text}'")))
}

/// Resolve a channel from `input`, a scheme name, or an id (0..=9).
pub fn parse_channel(text: &str) -> LineCodeResult<Channel> {
    let text = text.trim();
    let found = match text.parse::<u8>() {
        Ok(id) => Channel::from_id(id),
        Err(_) => Channel::from_name(text),
    };
    found.ok_or_else(|| LineCodeError::invalid_scheme(format!("unknown channel '{text}'")))
}
