//! Line-coding scheme identifiers.
//!
//! The numeric ids and labels form the static channel mapping used by
//! front ends: id 0 is the raw input display, ids 1..=9 are the encoders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of supported line codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    UnipolarNrz,
    UnipolarRz,
    PolarNrz,
    PolarRz,
    BipolarAmi,
    PseudoTernary,
    Manchester,
    Hdb3,
    B8zs,
}

impl Scheme {
    /// All schemes in id order.
    pub const ALL: [Scheme; 9] = [
        Scheme::UnipolarNrz,
        Scheme::UnipolarRz,
        Scheme::PolarNrz,
        Scheme::PolarRz,
        Scheme::BipolarAmi,
        Scheme::PseudoTernary,
        Scheme::Manchester,
        Scheme::Hdb3,
        Scheme::B8zs,
    ];

    /// Samples emitted per input bit.
    pub fn samples_per_bit(&self) -> usize {
        match self {
            Self::UnipolarRz | Self::PolarRz | Self::Manchester => 2,
            Self::UnipolarNrz
            | Self::PolarNrz
            | Self::BipolarAmi
            | Self::PseudoTernary
            | Self::Hdb3
            | Self::B8zs => 1,
        }
    }

    /// Channel id (1..=9).
    pub fn id(&self) -> u8 {
        match self {
            Self::UnipolarNrz => 1,
            Self::UnipolarRz => 2,
            Self::PolarNrz => 3,
            Self::PolarRz => 4,
            Self::BipolarAmi => 5,
            Self::PseudoTernary => 6,
            Self::Manchester => 7,
            Self::Hdb3 => 8,
            Self::B8zs => 9,
        }
    }

    /// Look up a scheme by channel id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.id() == id)
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnipolarNrz => "Unipolar NRZ",
            Self::UnipolarRz => "Unipolar RZ",
            Self::PolarNrz => "Polar NRZ",
            Self::PolarRz => "Polar RZ",
            Self::BipolarAmi => "Bipolar AMI",
            Self::PseudoTernary => "Pseudo Ternary",
            Self::Manchester => "Manchester",
            Self::Hdb3 => "HDB3",
            Self::B8zs => "B8ZS",
        }
    }

    /// Kebab-case name used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UnipolarNrz => "unipolar-nrz",
            Self::UnipolarRz => "unipolar-rz",
            Self::PolarNrz => "polar-nrz",
            Self::PolarRz => "polar-rz",
            Self::BipolarAmi => "bipolar-ami",
            Self::PseudoTernary => "pseudo-ternary",
            Self::Manchester => "manchester",
            Self::Hdb3 => "hdb3",
            Self::B8zs => "b8zs",
        }
    }

    /// Look up a scheme by its kebab-case name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Whether the scheme performs zero-run substitution.
    pub fn is_substitution_code(&self) -> bool {
        matches!(self, Self::Hdb3 | Self::B8zs)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a display channel shows: the raw input or an encoder output.
///
/// Serialized as a single name: `"input"` or a scheme name such as `"hdb3"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Channel {
    /// Pass-through display of the input bits (not an encoding).
    Input,
    Encoded(Scheme),
}

impl Channel {
    /// Channel id (0 for the input display).
    pub fn id(&self) -> u8 {
        match self {
            Self::Input => 0,
            Self::Encoded(scheme) => scheme.id(),
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        if id == 0 {
            Some(Self::Input)
        } else {
            Scheme::from_id(id).map(Self::Encoded)
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Encoded(scheme) => scheme.label(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Encoded(scheme) => scheme.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("input") {
            Some(Self::Input)
        } else {
            Scheme::from_name(name).map(Self::Encoded)
        }
    }

    pub fn scheme(&self) -> Option<Scheme> {
        match self {
            Self::Input => None,
            Self::Encoded(scheme) => Some(*scheme),
        }
    }
}

impl TryFrom<String> for Channel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value).ok_or_else(|| format!("unknown channel '{value}'"))
    }
}

impl From<Channel> for String {
    fn from(channel: Channel) -> Self {
        channel.name().to_string()
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::Encoded(Scheme::UnipolarNrz)
    }
}

impl From<Scheme> for Channel {
    fn from(scheme: Scheme) -> Self {
        Self::Encoded(scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_mapping_is_bijective() {
        for scheme in Scheme::ALL {
            assert_eq!(Scheme::from_id(scheme.id()), Some(scheme));
            assert_eq!(Scheme::from_name(scheme.name()), Some(scheme));
        }
        assert_eq!(Scheme::from_id(0), None);
        assert_eq!(Scheme::from_id(10), None);
    }

    #[test]
    fn test_samples_per_bit() {
        assert_eq!(Scheme::UnipolarRz.samples_per_bit(), 2);
        assert_eq!(Scheme::PolarRz.samples_per_bit(), 2);
        assert_eq!(Scheme::Manchester.samples_per_bit(), 2);
        assert_eq!(Scheme::Hdb3.samples_per_bit(), 1);
        assert_eq!(Scheme::B8zs.samples_per_bit(), 1);
        assert_eq!(Scheme::PseudoTernary.samples_per_bit(), 1);
    }

    #[test]
    fn test_channel_ids() {
        assert_eq!(Channel::from_id(0), Some(Channel::Input));
        assert_eq!(Channel::from_id(8), Some(Channel::Encoded(Scheme::Hdb3)));
        assert_eq!(Channel::Input.label(), "Input");
        assert_eq!(Channel::default().scheme(), Some(Scheme::UnipolarNrz));
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Scheme::from_name("HDB3"), Some(Scheme::Hdb3));
        assert_eq!(Scheme::from_name(" bipolar-ami "), Some(Scheme::BipolarAmi));
        assert_eq!(Scheme::from_name("nrz"), None);
    }

    #[test]
    fn test_channel_serde_by_name() {
        let json = serde_json::to_string(&Channel::Encoded(Scheme::B8zs)).unwrap();
        assert_eq!(json, r#""b8zs""#);

        let channel: Channel = serde_json::from_str(r#""input""#).unwrap();
        assert_eq!(channel, Channel::Input);

        assert!(serde_json::from_str::<Channel>(r#""nrzi""#).is_err());
    }
}
