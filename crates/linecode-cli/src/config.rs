//! Session configuration loading and validation.

use anyhow::{Context, Result};
use lib_dsp::psd::{SpectrumConfig, DEFAULT_PAD_LENGTH};
use lib_dsp::theory::{DEFAULT_GRID_START, DEFAULT_GRID_STEP, DEFAULT_GRID_STOP};
use lib_dsp::window::WindowType;
use lib_types::{Channel, Scheme, Volts};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Bit counts the display accepts.
pub const BITS_SHOWN_RANGE: RangeInclusive<usize> = 4..=32;

/// Peak amplitudes the display accepts, in volts.
pub const AMPLITUDE_RANGE: RangeInclusive<f64> = 1.0..=10.0;

/// Top-level session configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session name/description.
    #[serde(default = "default_name")]
    pub name: String,

    /// Bit pattern, repeated to fill `bits_shown`.
    pub pattern: String,

    /// Channel to display.
    #[serde(default)]
    pub channel: Channel,

    /// Number of bits on screen.
    #[serde(default = "default_bits_shown")]
    pub bits_shown: usize,

    /// Peak amplitude in volts.
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,

    /// Spectral view parameters.
    #[serde(default)]
    pub spectrum: SpectrumParams,

    /// Side-by-side comparison; replaces the single channel when set.
    #[serde(default)]
    pub compare: Option<CompareConfig>,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_name() -> String { "session".to_string() }
fn default_bits_shown() -> usize { 8 }
fn default_amplitude() -> f64 { 5.0 }

impl SessionConfig {
    /// A configuration with every default except the pattern.
    pub fn for_pattern(pattern: impl Into<String>) -> Self {
        Self {
            name: default_name(),
            pattern: pattern.into(),
            channel: Channel::default(),
            bits_shown: default_bits_shown(),
            amplitude: default_amplitude(),
            spectrum: SpectrumParams::default(),
            compare: None,
            output: OutputConfig::default(),
        }
    }

    pub fn amplitude(&self) -> Volts {
        Volts(self.amplitude)
    }

    pub fn spectrum_config(&self) -> SpectrumConfig {
        SpectrumConfig {
            pad_length: self.spectrum.pad_length,
            window: self.spectrum.window,
        }
    }
}

/// Spectral view parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpectrumParams {
    /// Compute spectra at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Zero-padded transform length.
    #[serde(default = "default_pad_length")]
    pub pad_length: usize,

    /// Window applied before the transform.
    #[serde(default)]
    pub window: WindowType,

    /// Theoretical grid start (cycles per bit).
    #[serde(default = "default_theory_start")]
    pub theory_start: f64,

    /// Theoretical grid end, inclusive.
    #[serde(default = "default_theory_stop")]
    pub theory_stop: f64,

    /// Theoretical grid step.
    #[serde(default = "default_theory_step")]
    pub theory_step: f64,
}

fn default_true() -> bool { true }
fn default_pad_length() -> usize { DEFAULT_PAD_LENGTH }
fn default_theory_start() -> f64 { DEFAULT_GRID_START }
fn default_theory_stop() -> f64 { DEFAULT_GRID_STOP }
fn default_theory_step() -> f64 { DEFAULT_GRID_STEP }

impl Default for SpectrumParams {
    fn default() -> Self {
        Self {
            enabled: true,
            pad_length: default_pad_length(),
            window: WindowType::default(),
            theory_start: default_theory_start(),
            theory_stop: default_theory_stop(),
            theory_step: default_theory_step(),
        }
    }
}

/// Two schemes to show side by side.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CompareConfig {
    pub first: Scheme,
    pub second: Scheme,
}

/// Output configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write input/output waveforms.
    #[serde(default = "default_true")]
    pub waveforms: bool,

    /// Write empirical and theoretical spectra.
    #[serde(default = "default_true")]
    pub spectrum: bool,

    /// Write violation/balancing annotations.
    #[serde(default = "default_true")]
    pub annotations: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            waveforms: true,
            spectrum: true,
            annotations: true,
        }
    }
}

/// Load configuration from a file.
pub fn load_config(path: &Path) -> Result<SessionConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content, path.extension().map_or(false, |e| e == "json"))?;
    validate_config(config)
}

/// Parse configuration text as JSON or TOML.
pub fn parse_config(content: &str, is_json: bool) -> Result<SessionConfig> {
    let config: SessionConfig = if is_json {
        serde_json::from_str(content).with_context(|| "Failed to parse config as JSON")?
    } else {
        toml::from_str(content).with_context(|| "Failed to parse config as TOML")?
    };
    Ok(config)
}

/// Validate configuration, clamping display ranges.
pub fn validate_config(mut config: SessionConfig) -> Result<SessionConfig> {
    if config.pattern.is_empty() {
        anyhow::bail!("Bit pattern must not be empty");
    }
    lib_linecode::parse_bits(&config.pattern)
        .with_context(|| format!("Invalid bit pattern {:?}", config.pattern))?;

    if !BITS_SHOWN_RANGE.contains(&config.bits_shown) {
        let clamped = config
            .bits_shown
            .clamp(*BITS_SHOWN_RANGE.start(), *BITS_SHOWN_RANGE.end());
        tracing::warn!(
            "bits_shown={} outside {:?}; using {}",
            config.bits_shown,
            BITS_SHOWN_RANGE,
            clamped
        );
        config.bits_shown = clamped;
    }

    if !config.amplitude.is_finite() {
        anyhow::bail!("Amplitude must be finite, got {}", config.amplitude);
    }
    if !AMPLITUDE_RANGE.contains(&config.amplitude) {
        let clamped = config
            .amplitude()
            .clamp(Volts(*AMPLITUDE_RANGE.start()), Volts(*AMPLITUDE_RANGE.end()))
            .0;
        tracing::warn!(
            "amplitude={} V outside {:?}; using {} V",
            config.amplitude,
            AMPLITUDE_RANGE,
            clamped
        );
        config.amplitude = clamped;
    }

    if let Some(compare) = config.compare {
        if compare.first == compare.second {
            anyhow::bail!(
                "Compare mode needs two different schemes (both are {})",
                compare.first
            );
        }
    }

    if config.spectrum.enabled {
        if config.spectrum.pad_length < 2 {
            anyhow::bail!(
                "spectrum.pad_length must be at least 2, got {}",
                config.spectrum.pad_length
            );
        }
        lib_dsp::frequency_grid(
            config.spectrum.theory_start,
            config.spectrum.theory_stop,
            config.spectrum.theory_step,
        )
        .context("Invalid theoretical frequency grid")?;
    }

    Ok(config)
}
